// Shared doubles and wiring helpers for session integration tests.

use jet_duel::SessionHandle;
use jet_duel::domain::ScreenBounds;
use jet_duel::domain::Vec2;
use jet_duel::domain::ports::{
    AudioSink, InputSource, Key, KeyBindings, RenderSurface, SoundCue, VisualHandle,
};
use jet_duel::use_cases::session::{SessionDeps, SessionTiming};
use jet_duel::use_cases::types::{FrameSnapshot, SessionNotice};

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Input double the test can press and release keys on while the session
/// polls it.
#[derive(Clone, Default)]
pub struct SharedInput {
    held: Arc<Mutex<HashSet<Key>>>,
}

impl SharedInput {
    pub fn press(&self, key: Key) {
        self.held.lock().expect("input mutex poisoned").insert(key);
    }

    pub fn release(&self, key: Key) {
        self.held.lock().expect("input mutex poisoned").remove(&key);
    }
}

impl InputSource for SharedInput {
    fn key_down(&self, key: Key) -> bool {
        self.held.lock().expect("input mutex poisoned").contains(&key)
    }
}

/// Audio double that records every cue for later inspection.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    cues: Arc<Mutex<Vec<SoundCue>>>,
}

impl RecordingAudio {
    pub fn contains(&self, cue: SoundCue) -> bool {
        self.cues
            .lock()
            .expect("audio mutex poisoned")
            .contains(&cue)
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.cues.lock().expect("audio mutex poisoned").push(cue);
    }
}

/// Render double that only counts presented frames.
#[derive(Clone, Default)]
pub struct CountingRender {
    presents: Arc<AtomicU64>,
}

impl CountingRender {
    pub fn presents(&self) -> u64 {
        self.presents.load(Ordering::SeqCst)
    }
}

impl RenderSurface for CountingRender {
    fn clear(&mut self) {}
    fn draw(&mut self, _visual: VisualHandle, _position: Vec2) {}
    fn present(&mut self) {
        self.presents.fetch_add(1, Ordering::SeqCst);
    }
}

/// Short periods so integration scenarios settle in milliseconds.
pub fn fast_timing() -> SessionTiming {
    SessionTiming {
        tick_interval: Duration::from_millis(2),
        explosion_frame_interval: Duration::from_millis(3),
        craft_collision_interval: Duration::from_millis(50),
    }
}

pub struct TestSession {
    pub handle: SessionHandle,
    pub input: SharedInput,
    pub audio: RecordingAudio,
    pub render: CountingRender,
    pub save_path: PathBuf,
}

/// Spawn a default two-player session wired to the test doubles, saving to
/// a unique temp path. Must run inside a tokio runtime.
pub fn start() -> TestSession {
    let input = SharedInput::default();
    let audio = RecordingAudio::default();
    let render = CountingRender::default();
    let save_path = std::env::temp_dir().join(format!(
        "jet-duel-session-{}.txt",
        uuid::Uuid::new_v4()
    ));

    let deps = SessionDeps {
        render: Box::new(render.clone()),
        audio: Box::new(audio.clone()),
        input: Box::new(input.clone()),
        bindings: [KeyBindings::arrows(), KeyBindings::wasd()],
    };
    let handle = jet_duel::spawn_session(
        deps,
        fast_timing(),
        ScreenBounds::new(800.0, 600.0),
        save_path.clone(),
    );

    TestSession {
        handle,
        input,
        audio,
        render,
        save_path,
    }
}

/// Receive notices until one matches, skipping the rest. Panics after five
/// seconds so a wedged session fails the test instead of hanging it.
pub async fn next_notice_matching<F>(
    rx: &mut broadcast::Receiver<SessionNotice>,
    mut matches: F,
) -> SessionNotice
where
    F: FnMut(&SessionNotice) -> bool,
{
    loop {
        let received = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for a session notice");
        match received {
            Ok(notice) if matches(&notice) => return notice,
            Ok(_) => continue,
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => panic!("notice channel closed"),
        }
    }
}

/// Watch snapshots until the predicate holds.
pub async fn wait_for_state<F>(
    rx: &mut watch::Receiver<FrameSnapshot>,
    mut holds: F,
) -> FrameSnapshot
where
    F: FnMut(&FrameSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let snapshot = rx.borrow();
                if holds(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("timed out waiting for a matching snapshot")
}
