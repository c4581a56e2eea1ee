// Domain layer: core simulation types and rules.

pub mod collision;
pub mod engine_sound;
pub mod entity;
pub mod explosion;
pub mod facing;
pub mod geometry;
pub mod player;
pub mod ports;
pub mod tuning;
pub mod weapon;

pub use entity::MovableEntity;
pub use facing::{FacingDirection, SteerRequest};
pub use geometry::{Rect, ScreenBounds, Vec2};
pub use player::{FireMode, Player, PlayerSetup, SpriteSet};
