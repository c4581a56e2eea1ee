// Gameplay tuning for the weapon system. The cooldown is a per-frame
// countdown, never wall-clock time.

#[derive(Debug, Clone, Copy)]
pub struct WeaponTuning {
    /// Firing is allowed only while the countdown sits below this value.
    pub ready_below: u32,

    /// Countdown restored by every successful shot.
    pub reload_frames: u32,

    /// Countdown a fresh weapon starts with.
    pub initial_cooldown: u32,

    /// Distance a round travels per frame.
    pub round_speed: f32,

    /// Round footprint in pixels.
    pub round_width: f32,
    pub round_height: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            ready_below: 25,
            reload_frames: 100,
            initial_cooldown: 30,
            round_speed: 1.0,
            round_width: 8.0,
            round_height: 16.0,
        }
    }
}
