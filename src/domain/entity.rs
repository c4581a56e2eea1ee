// Kinematics and boundary behavior shared by craft and projectiles.

use crate::domain::geometry::{Rect, ScreenBounds, Vec2};

/// A positioned, moving body with a renderable footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovableEntity {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
}

impl MovableEntity {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
        }
    }

    /// Advance position by the current velocity over `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Keep the footprint inside the screen. Contact with a wall is
    /// inelastic: velocity on the clamped axis drops to zero.
    pub fn clamp_to(&mut self, bounds: ScreenBounds) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        if self.position.x < half_w {
            self.position.x = half_w;
            self.velocity.x = 0.0;
        }
        if self.position.x > bounds.width - half_w {
            self.position.x = bounds.width - half_w;
            self.velocity.x = 0.0;
        }

        if self.position.y < half_h {
            self.position.y = half_h;
            self.velocity.y = 0.0;
        }
        if self.position.y > bounds.height - half_h {
            self.position.y = bounds.height - half_h;
            self.velocity.y = 0.0;
        }
    }

    pub fn footprint(&self) -> Rect {
        Rect::from_center(self.position, self.width, self.height)
    }
}
