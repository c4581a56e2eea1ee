// Engine sound state machine driven by craft speed.
//
// Hysteresis between the two thresholds keeps the cues from flapping while
// a craft hovers around one speed.

/// Speed above which a stopped engine spools up.
pub const SPOOL_UP_SPEED: f32 = 35.0;
/// Speed below which a running engine spools down.
pub const SPOOL_DOWN_SPEED: f32 = 25.0;
/// Seconds between cabin-loop cues while the engine runs.
pub const CABIN_LOOP_SECONDS: f32 = 1.0;

/// Audio transitions the session forwards to the audio sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCue {
    SpoolUp,
    SpoolDown,
    CabinLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EngineState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSound {
    state: EngineState,
    timer: f32,
}

impl EngineSound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current craft speed once per frame. Returns the cue to play,
    /// if this frame crossed a transition.
    pub fn update(&mut self, speed: f32, dt: f32) -> Option<EngineCue> {
        self.timer += dt;
        match self.state {
            EngineState::Stopped => {
                if speed > SPOOL_UP_SPEED {
                    self.state = EngineState::Running;
                    self.timer = 0.0;
                    return Some(EngineCue::SpoolUp);
                }
                None
            }
            EngineState::Running => {
                if speed < SPOOL_DOWN_SPEED {
                    self.state = EngineState::Stopped;
                    self.timer = 0.0;
                    return Some(EngineCue::SpoolDown);
                }
                if self.timer > CABIN_LOOP_SECONDS {
                    self.timer = 0.0;
                    return Some(EngineCue::CabinLoop);
                }
                None
            }
        }
    }

    /// Silent return to the stopped state, used when an explosion sequence
    /// finishes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
