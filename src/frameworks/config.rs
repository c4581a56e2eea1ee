use std::{env, path::PathBuf, time::Duration};

// Runtime/session constants (not gameplay tuning).

pub fn screen_width() -> f32 {
    env::var("SCREEN_WIDTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(800.0)
}

pub fn screen_height() -> f32 {
    env::var("SCREEN_HEIGHT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(600.0)
}

pub fn save_path() -> PathBuf {
    env::var("SAVE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("save.txt"))
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const NOTICE_BROADCAST_CAPACITY: usize = 32;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
// Cadence of explosion animation steps, independent of the frame clock.
pub const EXPLOSION_FRAME_INTERVAL: Duration = Duration::from_millis(70);
// Cadence of the craft-vs-craft collision check.
pub const CRAFT_COLLISION_INTERVAL: Duration = Duration::from_millis(70);
