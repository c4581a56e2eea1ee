// Weapon system: cooldown gating and the live projectile collection for
// one craft.

use crate::domain::collision;
use crate::domain::entity::MovableEntity;
use crate::domain::geometry::{Rect, ScreenBounds, Vec2};
use crate::domain::tuning::WeaponTuning;

/// How far past the screen a round may fly before the sweep drops it.
pub const OUT_OF_PLAY_MARGIN: f32 = 200.0;

/// One fired round. Spent rounds stay in the collection until the
/// end-of-frame sweep and never collide or render again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub entity: MovableEntity,
    pub spent: bool,
}

#[derive(Debug, Clone)]
pub struct WeaponSystem {
    cooldown: u32,
    projectiles: Vec<Projectile>,
    tuning: WeaponTuning,
}

impl WeaponSystem {
    pub fn new(tuning: WeaponTuning) -> Self {
        Self {
            cooldown: tuning.initial_cooldown,
            projectiles: Vec::new(),
            tuning,
        }
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn ready(&self) -> bool {
        self.cooldown < self.tuning.ready_below
    }

    /// Countdown step, once per frame. Stops at 1 rather than 0 so a weapon
    /// that has been idle long enough reads as ready without wrapping.
    pub fn tick_cooldown(&mut self) {
        if self.cooldown > 1 {
            self.cooldown -= 1;
        }
    }

    /// Spawn a round at the muzzle with zero velocity, if the cooldown
    /// allows it. Every successful shot restarts the countdown.
    pub fn try_fire(&mut self, muzzle: Vec2) -> bool {
        if !self.ready() {
            return false;
        }
        self.projectiles.push(Projectile {
            entity: MovableEntity::new(muzzle, self.tuning.round_width, self.tuning.round_height),
            spent: false,
        });
        self.cooldown = self.tuning.reload_frames;
        true
    }

    /// Displace every live round along `direction` for this frame and record
    /// the displacement as the round's velocity.
    pub fn advance(&mut self, direction: Vec2) {
        let step = direction * self.tuning.round_speed;
        for round in self.projectiles.iter_mut().filter(|r| !r.spent) {
            round.entity.velocity = step;
            round.entity.position += step;
        }
    }

    /// Mark every live round overlapping `target` as spent. Returns true if
    /// anything hit.
    pub fn mark_hits(&mut self, target: Rect) -> bool {
        let mut hit = false;
        for round in self.projectiles.iter_mut().filter(|r| !r.spent) {
            if collision::overlaps(round.entity.footprint(), target) {
                round.spent = true;
                hit = true;
            }
        }
        hit
    }

    /// Drop spent rounds and rounds that left the padded play field.
    pub fn sweep(&mut self, bounds: ScreenBounds) {
        self.projectiles.retain(|round| {
            let p = round.entity.position;
            !round.spent
                && p.x > -OUT_OF_PLAY_MARGIN
                && p.x < bounds.width + OUT_OF_PLAY_MARGIN
                && p.y > -OUT_OF_PLAY_MARGIN
                && p.y < bounds.height + OUT_OF_PLAY_MARGIN
        });
    }

    pub fn live_rounds(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|r| !r.spent)
    }

    pub fn round_count(&self) -> usize {
        self.projectiles.len()
    }
}
