// The per-frame session update and the async loop that drives it.
//
// Three clocks stay separate: the frame interval runs movement, firing, and
// projectile collision; one spawned interval task per exploding player steps
// that player's animation; a third interval runs the craft-vs-craft check.

use crate::domain::engine_sound::EngineCue;
use crate::domain::ports::{
    AudioSink, InputSource, KeyBindings, RenderSurface, SoundCue, VisualHandle,
};
use crate::domain::{Player, ScreenBounds, SteerRequest, Vec2, collision};
use crate::interface_adapters::save_file::{self, SaveState};
use crate::use_cases::backdrop::Backdrop;
use crate::use_cases::types::{
    FrameSnapshot, PlayerSlot, PlayerSnapshot, RoundSnapshot, SessionCommand, SessionNotice,
};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Host collaborators the session drives, injected at construction.
pub struct SessionDeps {
    pub render: Box<dyn RenderSurface>,
    pub audio: Box<dyn AudioSink>,
    pub input: Box<dyn InputSource>,
    pub bindings: [KeyBindings; 2],
}

/// Periods for the session's independent clocks.
#[derive(Debug, Clone, Copy)]
pub struct SessionTiming {
    pub tick_interval: Duration,
    pub explosion_frame_interval: Duration,
    pub craft_collision_interval: Duration,
}

/// What one frame produced for the async shell to act on.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub notices: Vec<SessionNotice>,
    /// Players whose explosion just started this frame.
    pub hits: Vec<PlayerSlot>,
}

/// Once-per-second frame-rate sampling for the advisory status line.
#[derive(Debug, Default)]
struct FrameRateSample {
    elapsed: f32,
    frames: u32,
    last: u32,
}

impl FrameRateSample {
    /// Count a frame; when a one-second window closes with a different rate
    /// than the previous window, return the new rate.
    fn record(&mut self, dt: f32) -> Option<u32> {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < 1.0 {
            return None;
        }
        let rate = self.frames;
        self.elapsed = 0.0;
        self.frames = 0;
        if rate != self.last {
            self.last = rate;
            return Some(rate);
        }
        None
    }
}

pub struct GameSession {
    players: [Player; 2],
    bounds: ScreenBounds,
    backdrop: Backdrop,
    backdrop_visual: VisualHandle,
    active: bool,
    tick: u64,
    frame_rate: FrameRateSample,
    outcome: Option<PlayerSlot>,
}

impl GameSession {
    pub fn new(
        players: [Player; 2],
        bounds: ScreenBounds,
        backdrop: Backdrop,
        backdrop_visual: VisualHandle,
    ) -> Self {
        Self {
            players,
            bounds,
            backdrop,
            backdrop_visual,
            active: true,
            tick: 0,
            frame_rate: FrameRateSample::default(),
            outcome: None,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The winner, once either player has run out of lives.
    pub fn outcome(&self) -> Option<PlayerSlot> {
        self.outcome
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    /// One simulated frame. Does nothing while suspended or after the
    /// outcome has been announced.
    pub fn frame(
        &mut self,
        steer: [SteerRequest; 2],
        dt: f32,
        render: &mut dyn RenderSurface,
        audio: &mut dyn AudioSink,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.active || self.outcome.is_some() {
            return report;
        }

        // Clock and the advisory status sample.
        self.tick += 1;
        if let Some(frame_rate) = self.frame_rate.record(dt) {
            report.notices.push(SessionNotice::Status {
                frame_rate,
                lives: [self.players[0].lives, self.players[1].lives],
            });
        }

        // Decide the game before simulating anything else this frame.
        if let Some(winner) = self.decide() {
            self.outcome = Some(winner);
            info!(?winner, "game over");
            report.notices.push(SessionNotice::GameOver { winner });
            return report;
        }

        // Movement, then motion and engine cues.
        for (player, request) in self.players.iter_mut().zip(steer) {
            player.steer(request, self.bounds);
            if let Some(cue) = player.advance(dt) {
                audio.play(engine_cue_sound(cue));
            }
        }

        // Draw the scene: backdrop first, then each craft (the explosion
        // visual stays pinned where the hit happened).
        self.backdrop.advance(dt);
        render.clear();
        render.draw(self.backdrop_visual, Vec2::new(0.0, self.backdrop.offset()));
        for player in &self.players {
            let (visual, position) = player.current_visual();
            render.draw(visual, position);
        }

        // Rounds against the opposing craft, both directions.
        for slot in PlayerSlot::BOTH {
            let victim = slot.opponent();
            let target = self.players[victim.index()].entity.footprint();
            if self.players[slot.index()].weapon.mark_hits(target) {
                self.players[victim.index()].take_hit();
                audio.play(SoundCue::Explosion);
                report.hits.push(victim);
                info!(victim = ?victim, shooter = ?slot, "craft hit by round");
            }
        }

        // Advance, draw, and sweep each player's rounds, then present.
        for player in self.players.iter_mut() {
            let direction = player.fire_direction();
            player.weapon.advance(direction);
            player.weapon.tick_cooldown();
            player.weapon.sweep(self.bounds);
        }
        for player in &self.players {
            let visual = player.round_visual();
            for round in player.weapon.live_rounds() {
                render.draw(visual, round.entity.position);
            }
        }
        render.present();

        report
    }

    /// The lower-frequency craft-vs-craft check. On overlap both players
    /// explode, lose a life, and return to their session-start spawns.
    pub fn check_craft_collision(&mut self, audio: &mut dyn AudioSink) -> Vec<PlayerSlot> {
        if !self.active || self.outcome.is_some() {
            return Vec::new();
        }
        let a = self.players[0].entity.footprint();
        let b = self.players[1].entity.footprint();
        if !collision::overlaps(a, b) {
            return Vec::new();
        }
        for player in self.players.iter_mut() {
            player.take_hit();
            player.reset_to_spawn();
            audio.play(SoundCue::Explosion);
        }
        info!("craft collision; both players reset to spawn");
        PlayerSlot::BOTH.to_vec()
    }

    /// One explosion animation step for the slot. Returns true when the
    /// step completed the sequence.
    pub fn advance_explosion(&mut self, slot: PlayerSlot) -> bool {
        let player = &mut self.players[slot.index()];
        let complete = player.explosion.advance_frame();
        if complete {
            player.engine.reset();
        }
        complete
    }

    pub fn rotate(&mut self, slot: PlayerSlot) {
        self.players[slot.index()].rotate();
    }

    pub fn open_fire(&mut self, slot: PlayerSlot) -> bool {
        self.players[slot.index()].open_fire()
    }

    /// Manual craft destruction: explosion plus life loss, same as a hit.
    pub fn self_destruct(&mut self, slot: PlayerSlot, audio: &mut dyn AudioSink) {
        self.players[slot.index()].take_hit();
        audio.play(SoundCue::Explosion);
    }

    /// The slice of state that goes into a save: lives and positions only.
    pub fn capture(&self) -> SaveState {
        SaveState {
            lives: [self.players[0].lives, self.players[1].lives],
            positions: [self.players[0].entity.position, self.players[1].entity.position],
        }
    }

    /// Overwrite lives and positions from a loaded save. Facing, velocity,
    /// cooldown, and explosion state keep their current values.
    pub fn restore(&mut self, state: &SaveState) {
        for (i, player) in self.players.iter_mut().enumerate() {
            player.lives = state.lives[i];
            player.entity.position = state.positions[i];
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let players = [
            player_snapshot(&self.players[0]),
            player_snapshot(&self.players[1]),
        ];
        let mut rounds = Vec::new();
        for slot in PlayerSlot::BOTH {
            for round in self.players[slot.index()].weapon.live_rounds() {
                rounds.push(RoundSnapshot {
                    owner: slot,
                    x: round.entity.position.x,
                    y: round.entity.position.y,
                });
            }
        }
        FrameSnapshot {
            tick: self.tick,
            players,
            rounds,
        }
    }

    fn decide(&self) -> Option<PlayerSlot> {
        if self.players[0].lives == 0 {
            Some(PlayerSlot::Two)
        } else if self.players[1].lives == 0 {
            Some(PlayerSlot::One)
        } else {
            None
        }
    }
}

fn player_snapshot(player: &Player) -> PlayerSnapshot {
    PlayerSnapshot {
        x: player.entity.position.x,
        y: player.entity.position.y,
        facing: player.facing,
        lives: player.lives,
        exploding: player.explosion.is_exploding(),
    }
}

fn engine_cue_sound(cue: EngineCue) -> SoundCue {
    match cue {
        EngineCue::SpoolUp => SoundCue::JetSpoolUp,
        EngineCue::SpoolDown => SoundCue::JetSpoolDown,
        EngineCue::CabinLoop => SoundCue::JetCabin,
    }
}

/// Drive the session until shutdown. Owns all mutable session state; the
/// host talks to it over the command channel and observes the notice and
/// snapshot channels.
pub async fn session_task(
    mut session: GameSession,
    mut deps: SessionDeps,
    timing: SessionTiming,
    save_path: PathBuf,
    mut command_rx: mpsc::Receiver<SessionCommand>,
    command_tx: mpsc::Sender<SessionCommand>,
    notice_tx: broadcast::Sender<SessionNotice>,
    snapshot_tx: watch::Sender<FrameSnapshot>,
    shutdown: Arc<Notify>,
) {
    let mut frame_interval = tokio::time::interval(timing.tick_interval);
    let mut craft_interval = tokio::time::interval(timing.craft_collision_interval);
    let dt = timing.tick_interval.as_secs_f32();

    // One animation timer handle per player, live only while that player's
    // explosion sequence runs. Stopped exactly once, on the completing step.
    let mut tickers: [Option<JoinHandle<()>>; 2] = [None, None];

    loop {
        tokio::select! {
            _ = shutdown.notified() => break,

            _ = frame_interval.tick() => {
                let steer = [
                    deps.bindings[0].sample(&*deps.input),
                    deps.bindings[1].sample(&*deps.input),
                ];
                let report = session.frame(steer, dt, &mut *deps.render, &mut *deps.audio);
                for slot in report.hits {
                    start_ticker(&mut tickers, slot, &command_tx, timing.explosion_frame_interval);
                }
                for notice in report.notices {
                    let _ = notice_tx.send(notice);
                }
                let _ = snapshot_tx.send(session.snapshot());
            }

            command = command_rx.recv() => {
                let Some(command) = command else { break };
                match command {
                    SessionCommand::Rotate(slot) => session.rotate(slot),
                    SessionCommand::OpenFire(slot) => {
                        let fired = session.open_fire(slot);
                        debug!(?slot, fired, "fire command");
                    }
                    SessionCommand::SelfDestruct(slot) => {
                        session.self_destruct(slot, &mut *deps.audio);
                        start_ticker(&mut tickers, slot, &command_tx, timing.explosion_frame_interval);
                    }
                    SessionCommand::ExplosionTick(slot) => {
                        if session.advance_explosion(slot) {
                            stop_ticker(&mut tickers, slot);
                        }
                    }
                    SessionCommand::Save => {
                        let notice = match save_file::write_save(&save_path, &session.capture()) {
                            Ok(()) => {
                                info!(path = %save_path.display(), "session saved");
                                SessionNotice::Saved
                            }
                            Err(e) => {
                                warn!(error = %e, "save failed");
                                SessionNotice::SaveFailed { reason: e.to_string() }
                            }
                        };
                        let _ = notice_tx.send(notice);
                    }
                    SessionCommand::Load => {
                        let notice = match save_file::read_save(&save_path) {
                            Ok(state) => {
                                session.restore(&state);
                                info!(path = %save_path.display(), "session loaded");
                                SessionNotice::Loaded
                            }
                            Err(e) => {
                                warn!(error = %e, "load failed; session state unchanged");
                                SessionNotice::LoadFailed { reason: e.to_string() }
                            }
                        };
                        let _ = notice_tx.send(notice);
                    }
                    SessionCommand::SetActive(active) => session.set_active(active),
                }
            }

            _ = craft_interval.tick() => {
                for slot in session.check_craft_collision(&mut *deps.audio) {
                    start_ticker(&mut tickers, slot, &command_tx, timing.explosion_frame_interval);
                }
            }
        }
    }

    for ticker in tickers.iter_mut() {
        if let Some(handle) = ticker.take() {
            handle.abort();
        }
    }
}

/// Spawn the slot's animation timer unless one is already running (a
/// retrigger keeps the running timer and its cadence).
fn start_ticker(
    tickers: &mut [Option<JoinHandle<()>>; 2],
    slot: PlayerSlot,
    command_tx: &mpsc::Sender<SessionCommand>,
    period: Duration,
) {
    if tickers[slot.index()].is_some() {
        return;
    }
    let tx = command_tx.clone();
    tickers[slot.index()] = Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick of a fresh interval fires immediately; skip it so
        // animation steps are evenly spaced from the trigger.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(SessionCommand::ExplosionTick(slot)).await.is_err() {
                break;
            }
        }
    }));
}

fn stop_ticker(tickers: &mut [Option<JoinHandle<()>>; 2], slot: PlayerSlot) {
    if let Some(handle) = tickers[slot.index()].take() {
        handle.abort();
    }
}
