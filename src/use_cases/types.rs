// Session-level commands, notices, and snapshot types.

use crate::domain::FacingDirection;

/// The two fixed seats in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Commands the host shell and the internal timers feed into the session.
#[derive(Debug, Clone, Copy)]
pub enum SessionCommand {
    /// Advance the slot's facing one step in the rotation cycle.
    Rotate(PlayerSlot),
    /// Attempt a shot, subject to the weapon cooldown.
    OpenFire(PlayerSlot),
    /// Blow the slot's own craft up and take a life.
    SelfDestruct(PlayerSlot),
    /// Write lives and positions to the save file.
    Save,
    /// Overwrite lives and positions from the save file.
    Load,
    /// Suspend or resume frame updates, e.g. on host minimize/restore.
    SetActive(bool),
    /// Internal: one explosion-animation step for the slot, sent by that
    /// slot's interval timer.
    ExplosionTick(PlayerSlot),
}

/// Advisory signals for the host shell; never consumed by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionNotice {
    GameOver { winner: PlayerSlot },
    Status { frame_rate: u32, lives: [u32; 2] },
    Saved,
    SaveFailed { reason: String },
    Loaded,
    LoadFailed { reason: String },
}

/// World state published after every simulated frame.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub players: [PlayerSnapshot; 2],
    pub rounds: Vec<RoundSnapshot>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub facing: FacingDirection,
    pub lives: u32,
    pub exploding: bool,
}

#[derive(Debug, Clone)]
pub struct RoundSnapshot {
    pub owner: PlayerSlot,
    pub x: f32,
    pub y: f32,
}
