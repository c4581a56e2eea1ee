// Ports the simulation reaches the host shell through. Implementations are
// injected at session construction.

use crate::domain::facing::SteerRequest;
use crate::domain::geometry::Vec2;

/// Opaque id of a visual asset pre-registered with the renderer. The core
/// never touches pixels or files behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(pub u32);

/// Sounds the session asks the host to play, fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    JetSpoolUp,
    JetSpoolDown,
    JetCabin,
    Explosion,
}

// Port for the drawing surface.
pub trait RenderSurface: Send {
    fn clear(&mut self);
    fn draw(&mut self, visual: VisualHandle, position: Vec2);
    fn present(&mut self);
}

// Port for fire-and-forget audio playback. No result is consumed.
pub trait AudioSink: Send {
    fn play(&mut self, cue: SoundCue);
}

/// Movement keys the session polls every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
}

// Port exposing current key state, polled once per frame.
pub trait InputSource: Send {
    fn key_down(&self, key: Key) -> bool;
}

/// Per-player mapping from held keys to steer directions.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
}

impl KeyBindings {
    /// Arrow-key layout, player one.
    pub fn arrows() -> Self {
        Self {
            forward: Key::Up,
            backward: Key::Down,
            left: Key::Left,
            right: Key::Right,
        }
    }

    /// WASD layout, player two.
    pub fn wasd() -> Self {
        Self {
            forward: Key::W,
            backward: Key::S,
            left: Key::A,
            right: Key::D,
        }
    }

    pub fn sample(&self, input: &dyn InputSource) -> SteerRequest {
        SteerRequest {
            forward: input.key_down(self.forward),
            backward: input.key_down(self.backward),
            left: input.key_down(self.left),
            right: input.key_down(self.right),
        }
    }
}
