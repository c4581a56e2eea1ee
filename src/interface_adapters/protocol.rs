// Wire DTOs and the JSON snapshot feed for host-side observers.
// Internal session types stay serde-free; conversions live here.

use crate::domain::FacingDirection;
use crate::use_cases::types::{
    FrameSnapshot, PlayerSlot, PlayerSnapshot, RoundSnapshot, SessionNotice,
};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, warn};

/// Host-facing message wrapper, tagged for easy dispatch on the other side.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum HostMessage {
    // Snapshot of the world for a given tick.
    FrameSnapshot(FrameSnapshotDto),
    // Advisory session signals (game over, status line, save results).
    Notice(NoticeDto),
}

/// Flattened snapshot of one tick for wire transmission.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshotDto {
    pub tick: u64,
    pub players: Vec<PlayerStateDto>,
    pub rounds: Vec<RoundStateDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerStateDto {
    pub slot: u8,
    pub x: f32,
    pub y: f32,
    pub facing: &'static str,
    pub lives: u32,
    pub exploding: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundStateDto {
    pub owner: u8,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum NoticeDto {
    GameOver { winner: u8 },
    Status { frame_rate: u32, lives: [u32; 2] },
    Saved,
    SaveFailed { reason: String },
    Loaded,
    LoadFailed { reason: String },
}

fn slot_number(slot: PlayerSlot) -> u8 {
    match slot {
        PlayerSlot::One => 1,
        PlayerSlot::Two => 2,
    }
}

fn facing_label(facing: FacingDirection) -> &'static str {
    match facing {
        FacingDirection::Forward => "forward",
        FacingDirection::Backward => "backward",
        FacingDirection::Left => "left",
        FacingDirection::Right => "right",
    }
}

impl From<FrameSnapshot> for FrameSnapshotDto {
    fn from(snapshot: FrameSnapshot) -> Self {
        let players = PlayerSlot::BOTH
            .iter()
            .map(|slot| {
                let p: &PlayerSnapshot = &snapshot.players[slot.index()];
                PlayerStateDto {
                    slot: slot_number(*slot),
                    x: p.x,
                    y: p.y,
                    facing: facing_label(p.facing),
                    lives: p.lives,
                    exploding: p.exploding,
                }
            })
            .collect();
        let rounds = snapshot.rounds.iter().map(RoundStateDto::from).collect();
        Self {
            tick: snapshot.tick,
            players,
            rounds,
        }
    }
}

impl From<&RoundSnapshot> for RoundStateDto {
    fn from(round: &RoundSnapshot) -> Self {
        Self {
            owner: slot_number(round.owner),
            x: round.x,
            y: round.y,
        }
    }
}

impl From<SessionNotice> for NoticeDto {
    fn from(notice: SessionNotice) -> Self {
        match notice {
            SessionNotice::GameOver { winner } => NoticeDto::GameOver {
                winner: slot_number(winner),
            },
            SessionNotice::Status { frame_rate, lives } => {
                NoticeDto::Status { frame_rate, lives }
            }
            SessionNotice::Saved => NoticeDto::Saved,
            SessionNotice::SaveFailed { reason } => NoticeDto::SaveFailed { reason },
            SessionNotice::Loaded => NoticeDto::Loaded,
            SessionNotice::LoadFailed { reason } => NoticeDto::LoadFailed { reason },
        }
    }
}

/// Serialize each published snapshot once and republish the JSON text for
/// any number of observers.
pub async fn snapshot_feed(
    mut snapshot_rx: watch::Receiver<FrameSnapshot>,
    feed_tx: watch::Sender<String>,
) {
    loop {
        if snapshot_rx.changed().await.is_err() {
            warn!("snapshot channel closed; feed exiting");
            break;
        }
        let snapshot = snapshot_rx.borrow_and_update().clone();
        let message = HostMessage::FrameSnapshot(FrameSnapshotDto::from(snapshot));
        match serde_json::to_string(&message) {
            Ok(text) => {
                let _ = feed_tx.send(text);
            }
            Err(e) => error!(error = ?e, "failed to serialize frame snapshot"),
        }
    }
}
