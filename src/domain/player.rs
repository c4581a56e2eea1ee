// Player: one craft's entity, facing, lives, weapon, and effect state.

use crate::domain::engine_sound::{EngineCue, EngineSound};
use crate::domain::entity::MovableEntity;
use crate::domain::explosion::ExplosionSequencer;
use crate::domain::facing::{FacingDirection, SteerRequest};
use crate::domain::geometry::{ScreenBounds, Vec2};
use crate::domain::ports::VisualHandle;
use crate::domain::tuning::{PlayerTuning, WeaponTuning};
use crate::domain::weapon::WeaponSystem;

/// Visual assets for one craft, resolved once at session setup. Rotation is
/// a lookup here, never a new allocation.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSet {
    pub forward: VisualHandle,
    pub backward: VisualHandle,
    pub left: VisualHandle,
    pub right: VisualHandle,
    pub explosion: VisualHandle,
    pub round: VisualHandle,
}

impl SpriteSet {
    pub fn for_facing(&self, facing: FacingDirection) -> VisualHandle {
        match facing {
            FacingDirection::Forward => self.forward,
            FacingDirection::Backward => self.backward,
            FacingDirection::Left => self.left,
            FacingDirection::Right => self.right,
        }
    }
}

/// How a player's rounds pick their travel direction each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    /// Rounds travel along the craft's current facing.
    Steered,
    /// Rounds always travel along the craft's fixed forward axis.
    FixedForward,
}

/// Construction-time identity of a player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSetup {
    pub spawn: Vec2,
    /// The craft's forward axis on screen. Opposing players face each other.
    pub forward: Vec2,
    pub fire_mode: FireMode,
    pub sprites: SpriteSet,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: MovableEntity,
    pub facing: FacingDirection,
    pub lives: u32,
    pub weapon: WeaponSystem,
    pub explosion: ExplosionSequencer,
    pub engine: EngineSound,
    sprites: SpriteSet,
    forward: Vec2,
    fire_mode: FireMode,
    spawn_position: Vec2,
    steer_impulse: f32,
}

impl Player {
    pub fn new(setup: PlayerSetup, tuning: PlayerTuning, weapon_tuning: WeaponTuning) -> Self {
        Self {
            entity: MovableEntity::new(setup.spawn, tuning.width, tuning.height),
            facing: FacingDirection::Forward,
            lives: tuning.starting_lives,
            weapon: WeaponSystem::new(weapon_tuning),
            explosion: ExplosionSequencer::new(),
            engine: EngineSound::new(),
            sprites: setup.sprites,
            forward: setup.forward,
            fire_mode: setup.fire_mode,
            spawn_position: setup.spawn,
            steer_impulse: tuning.steer_impulse,
        }
    }

    /// Movement step: clamp against the screen first (wall contact zeroes
    /// the clamped axis), then apply one impulse per held direction.
    pub fn steer(&mut self, request: SteerRequest, bounds: ScreenBounds) {
        self.entity.clamp_to(bounds);

        if request.left {
            self.entity.velocity.x -= self.steer_impulse;
        }
        if request.right {
            self.entity.velocity.x += self.steer_impulse;
        }
        if request.forward {
            self.entity.velocity.y -= self.steer_impulse;
        }
        if request.backward {
            self.entity.velocity.y += self.steer_impulse;
        }
    }

    /// Integrate motion and step the engine sound machine.
    pub fn advance(&mut self, dt: f32) -> Option<EngineCue> {
        self.entity.integrate(dt);
        let speed = self.entity.velocity.magnitude();
        self.engine.update(speed, dt)
    }

    /// One rotate command. Position and velocity are untouched; the visual
    /// swap falls out of the sprite-set lookup.
    pub fn rotate(&mut self) {
        self.facing = self.facing.rotated();
    }

    /// Direction this player's rounds travel this frame.
    pub fn fire_direction(&self) -> Vec2 {
        match self.fire_mode {
            FireMode::Steered => self.facing.travel(),
            FireMode::FixedForward => self.forward,
        }
    }

    /// Attempt a shot. The muzzle sits half a craft height ahead along the
    /// fire direction.
    pub fn open_fire(&mut self) -> bool {
        let direction = self.fire_direction();
        let muzzle = self.entity.position + direction * (self.entity.height / 2.0);
        self.weapon.try_fire(muzzle)
    }

    /// A hit: start the explosion where the craft is, stop the craft, and
    /// take a life.
    pub fn take_hit(&mut self) {
        self.explosion.trigger(self.entity.position);
        self.entity.velocity = Vec2::ZERO;
        self.lives = self.lives.saturating_sub(1);
    }

    /// Return to the session-start position. Velocity is left to the
    /// explosion trigger that accompanies every reset.
    pub fn reset_to_spawn(&mut self) {
        self.entity.position = self.spawn_position;
    }

    /// The visual and position to render this frame: the explosion stays
    /// pinned where it started even if the craft drifts.
    pub fn current_visual(&self) -> (VisualHandle, Vec2) {
        if self.explosion.is_exploding() {
            (self.sprites.explosion, self.explosion.position())
        } else {
            (self.sprites.for_facing(self.facing), self.entity.position)
        }
    }

    pub fn round_visual(&self) -> VisualHandle {
        self.sprites.round
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ScreenBounds = ScreenBounds::new(800.0, 600.0);

    fn sprites() -> SpriteSet {
        SpriteSet {
            forward: VisualHandle(1),
            backward: VisualHandle(2),
            left: VisualHandle(3),
            right: VisualHandle(4),
            explosion: VisualHandle(9),
            round: VisualHandle(10),
        }
    }

    fn player() -> Player {
        Player::new(
            PlayerSetup {
                spawn: Vec2::new(400.0, 300.0),
                forward: Vec2::new(0.0, -1.0),
                fire_mode: FireMode::Steered,
                sprites: sprites(),
            },
            PlayerTuning::default(),
            WeaponTuning {
                initial_cooldown: 0,
                ..WeaponTuning::default()
            },
        )
    }

    #[test]
    fn when_steering_then_each_held_direction_adds_one_impulse() {
        let mut p = player();
        p.steer(
            SteerRequest {
                forward: true,
                right: true,
                ..SteerRequest::NONE
            },
            BOUNDS,
        );
        assert_eq!(p.entity.velocity, Vec2::new(1.1, -1.1));
    }

    #[test]
    fn when_rotated_four_times_then_the_visual_sequence_cycles_back_to_forward() {
        let mut p = player();
        let mut visuals = Vec::new();
        for _ in 0..4 {
            p.rotate();
            visuals.push(p.current_visual().0);
        }
        assert_eq!(
            visuals,
            vec![
                VisualHandle(3),
                VisualHandle(2),
                VisualHandle(4),
                VisualHandle(1),
            ]
        );
        assert_eq!(p.facing, FacingDirection::Forward);
    }

    #[test]
    fn when_rotating_then_position_and_velocity_are_preserved() {
        let mut p = player();
        p.entity.velocity = Vec2::new(7.0, -2.0);
        let before = p.entity;
        p.rotate();
        assert_eq!(p.entity, before);
    }

    #[test]
    fn when_firing_then_the_round_spawns_half_a_height_ahead() {
        let mut p = player();
        assert!(p.open_fire());
        let round = p.weapon.live_rounds().next().expect("expected a round");
        // Facing forward, half of 64 ahead means 32 up the screen.
        assert_eq!(round.entity.position, Vec2::new(400.0, 268.0));
    }

    #[test]
    fn when_fire_mode_is_fixed_then_rounds_ignore_the_facing() {
        let mut p = Player::new(
            PlayerSetup {
                spawn: Vec2::new(400.0, 300.0),
                forward: Vec2::new(0.0, 1.0),
                fire_mode: FireMode::FixedForward,
                sprites: sprites(),
            },
            PlayerTuning::default(),
            WeaponTuning::default(),
        );
        p.rotate();
        assert_eq!(p.fire_direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn when_hit_then_lives_drop_velocity_zeroes_and_the_explosion_pins() {
        let mut p = player();
        p.entity.velocity = Vec2::new(9.0, 9.0);
        p.entity.position = Vec2::new(250.0, 120.0);
        p.take_hit();
        assert_eq!(p.lives, 2);
        assert_eq!(p.entity.velocity, Vec2::ZERO);
        assert!(p.explosion.is_exploding());
        assert_eq!(p.current_visual(), (VisualHandle(9), Vec2::new(250.0, 120.0)));
    }

    #[test]
    fn when_hit_at_zero_lives_then_lives_stay_at_zero() {
        let mut p = player();
        p.lives = 0;
        p.take_hit();
        assert_eq!(p.lives, 0);
    }

    #[test]
    fn when_steering_mid_explosion_then_the_craft_can_drift_again() {
        let mut p = player();
        p.take_hit();
        p.steer(
            SteerRequest {
                left: true,
                ..SteerRequest::NONE
            },
            BOUNDS,
        );
        assert_eq!(p.entity.velocity.x, -1.1);
    }
}
