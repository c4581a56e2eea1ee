// Gameplay tuning for player craft. Keep this separate from runtime/session
// configuration (tick rates, channel sizes, file paths).

use crate::domain::geometry::Vec2;

/// Session-start position of player one.
pub const PLAYER_ONE_SPAWN: Vec2 = Vec2::new(100.0, 400.0);
/// Session-start position of player two.
pub const PLAYER_TWO_SPAWN: Vec2 = Vec2::new(600.0, 0.0);

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Velocity added per held steer direction per frame.
    pub steer_impulse: f32,

    /// Craft footprint in pixels, used for clamping and hit checks.
    pub width: f32,
    pub height: f32,

    /// Lives each craft starts the session with.
    pub starting_lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            steer_impulse: 1.1,
            width: 64.0,
            height: 64.0,
            starting_lives: 3,
        }
    }
}
