// Framework bootstrap: logging, channel wiring, and task spawning.

use crate::domain::player::{FireMode, Player, PlayerSetup, SpriteSet};
use crate::domain::ports::KeyBindings;
use crate::domain::tuning::{PLAYER_ONE_SPAWN, PLAYER_TWO_SPAWN, PlayerTuning, WeaponTuning};
use crate::domain::{ScreenBounds, Vec2};
use crate::frameworks::config;
use crate::interface_adapters::headless::{IdleInput, LoggingAudio, TraceRender};
use crate::interface_adapters::protocol::snapshot_feed;
use crate::use_cases::backdrop::Backdrop;
use crate::use_cases::session::{GameSession, SessionDeps, SessionTiming, session_task};
use crate::use_cases::types::{FrameSnapshot, SessionCommand, SessionNotice};

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, mpsc, watch};

/// Visual asset ids the session hands to the renderer. Hosts register the
/// matching assets under the same ids before the session starts.
pub mod visuals {
    use crate::domain::ports::VisualHandle;

    pub const BACKDROP: VisualHandle = VisualHandle(0);
    pub const PLANE_ONE_FORWARD: VisualHandle = VisualHandle(1);
    pub const PLANE_ONE_BACKWARD: VisualHandle = VisualHandle(2);
    pub const PLANE_ONE_LEFT: VisualHandle = VisualHandle(3);
    pub const PLANE_ONE_RIGHT: VisualHandle = VisualHandle(4);
    pub const PLANE_TWO_FORWARD: VisualHandle = VisualHandle(5);
    pub const PLANE_TWO_BACKWARD: VisualHandle = VisualHandle(6);
    pub const PLANE_TWO_LEFT: VisualHandle = VisualHandle(7);
    pub const PLANE_TWO_RIGHT: VisualHandle = VisualHandle(8);
    pub const EXPLOSION: VisualHandle = VisualHandle(9);
    pub const ROUND: VisualHandle = VisualHandle(10);
}

const PLANE_ONE_SPRITES: SpriteSet = SpriteSet {
    forward: visuals::PLANE_ONE_FORWARD,
    backward: visuals::PLANE_ONE_BACKWARD,
    left: visuals::PLANE_ONE_LEFT,
    right: visuals::PLANE_ONE_RIGHT,
    explosion: visuals::EXPLOSION,
    round: visuals::ROUND,
};

const PLANE_TWO_SPRITES: SpriteSet = SpriteSet {
    forward: visuals::PLANE_TWO_FORWARD,
    backward: visuals::PLANE_TWO_BACKWARD,
    left: visuals::PLANE_TWO_LEFT,
    right: visuals::PLANE_TWO_RIGHT,
    explosion: visuals::EXPLOSION,
    round: visuals::ROUND,
};

pub fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Cloneable handles for talking to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    pub command_tx: mpsc::Sender<SessionCommand>,
    pub notice_tx: broadcast::Sender<SessionNotice>,
    pub snapshot_rx: watch::Receiver<FrameSnapshot>,
    /// Latest snapshot rendered to JSON by the feed task.
    pub feed_rx: watch::Receiver<String>,
    pub shutdown: Arc<Notify>,
}

impl SessionHandle {
    pub fn notices(&self) -> broadcast::Receiver<SessionNotice> {
        self.notice_tx.subscribe()
    }
}

/// Build the two players and the session at their session-start state.
pub fn build_session(bounds: ScreenBounds) -> GameSession {
    let player_tuning = PlayerTuning::default();
    let weapon_tuning = WeaponTuning::default();

    let one = Player::new(
        PlayerSetup {
            spawn: PLAYER_ONE_SPAWN,
            forward: Vec2::new(0.0, -1.0),
            fire_mode: FireMode::Steered,
            sprites: PLANE_ONE_SPRITES,
        },
        player_tuning,
        weapon_tuning,
    );
    let two = Player::new(
        PlayerSetup {
            spawn: PLAYER_TWO_SPAWN,
            forward: Vec2::new(0.0, 1.0),
            fire_mode: FireMode::FixedForward,
            sprites: PLANE_TWO_SPRITES,
        },
        player_tuning,
        weapon_tuning,
    );

    GameSession::new(
        [one, two],
        bounds,
        Backdrop::new(bounds.height),
        visuals::BACKDROP,
    )
}

/// Wire channels, spawn the session loop and the snapshot feed, and return
/// the handles the host needs. Must run inside a tokio runtime.
pub fn spawn_session(
    deps: SessionDeps,
    timing: SessionTiming,
    bounds: ScreenBounds,
    save_path: PathBuf,
) -> SessionHandle {
    // Channel wiring for the session loop.
    let (command_tx, command_rx) =
        mpsc::channel::<SessionCommand>(config::COMMAND_CHANNEL_CAPACITY);
    let (notice_tx, _notice_rx) =
        broadcast::channel::<SessionNotice>(config::NOTICE_BROADCAST_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(FrameSnapshot::default());
    let (feed_tx, feed_rx) = watch::channel(String::new());
    let shutdown = Arc::new(Notify::new());

    let session = build_session(bounds);

    // The session loop owns all mutable state and runs until shutdown.
    tokio::spawn(session_task(
        session,
        deps,
        timing,
        save_path,
        command_rx,
        command_tx.clone(),
        notice_tx.clone(),
        snapshot_tx,
        shutdown.clone(),
    ));

    // The feed task serializes each snapshot once in the adapter layer.
    tokio::spawn(snapshot_feed(snapshot_rx.clone(), feed_tx));

    SessionHandle {
        command_tx,
        notice_tx,
        snapshot_rx,
        feed_rx,
        shutdown,
    }
}

/// Headless entry point: run the session against trace/no-op adapters and
/// relay notices to the log until the game is decided.
pub async fn run_with_config() -> std::io::Result<()> {
    init_runtime();

    let bounds = ScreenBounds::new(config::screen_width(), config::screen_height());
    let timing = SessionTiming {
        tick_interval: config::TICK_INTERVAL,
        explosion_frame_interval: config::EXPLOSION_FRAME_INTERVAL,
        craft_collision_interval: config::CRAFT_COLLISION_INTERVAL,
    };
    let deps = SessionDeps {
        render: Box::new(TraceRender::default()),
        audio: Box::new(LoggingAudio),
        input: Box::new(IdleInput),
        bindings: [KeyBindings::arrows(), KeyBindings::wasd()],
    };

    let handle = spawn_session(deps, timing, bounds, config::save_path());
    tracing::info!(width = bounds.width, height = bounds.height, "session running");

    let mut notices = handle.notices();
    loop {
        match notices.recv().await {
            Ok(SessionNotice::GameOver { winner }) => {
                tracing::info!(?winner, "game over");
                break;
            }
            Ok(notice) => tracing::info!(?notice, "session notice"),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "notice stream lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    handle.shutdown.notify_one();
    Ok(())
}
