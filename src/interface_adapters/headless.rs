// Port implementations with no OS surface, for the headless binary and for
// tests that only care about simulation behavior.

use crate::domain::Vec2;
use crate::domain::ports::{AudioSink, InputSource, Key, RenderSurface, SoundCue, VisualHandle};

use tracing::trace;

/// Render surface that counts calls and logs draws at trace level.
#[derive(Debug, Default)]
pub struct TraceRender {
    pub frames_presented: u64,
    pub draws_this_frame: u32,
}

impl RenderSurface for TraceRender {
    fn clear(&mut self) {
        self.draws_this_frame = 0;
    }

    fn draw(&mut self, visual: VisualHandle, position: Vec2) {
        self.draws_this_frame += 1;
        trace!(visual = visual.0, x = position.x, y = position.y, "draw");
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

/// Audio sink that logs cues instead of playing them.
#[derive(Debug, Default)]
pub struct LoggingAudio;

impl AudioSink for LoggingAudio {
    fn play(&mut self, cue: SoundCue) {
        trace!(?cue, "audio cue");
    }
}

/// Input source reporting no keys held.
#[derive(Debug, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn key_down(&self, _key: Key) -> bool {
        false
    }
}
