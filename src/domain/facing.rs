// Facing-direction state machine and the per-frame steer request.

use crate::domain::geometry::Vec2;

/// The four discrete orientations a craft can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingDirection {
    #[default]
    Forward,
    Backward,
    Left,
    Right,
}

impl FacingDirection {
    /// One rotate command. The cycle is fixed:
    /// Forward -> Left -> Backward -> Right -> Forward.
    pub fn rotated(self) -> Self {
        match self {
            FacingDirection::Forward => FacingDirection::Left,
            FacingDirection::Left => FacingDirection::Backward,
            FacingDirection::Backward => FacingDirection::Right,
            FacingDirection::Right => FacingDirection::Forward,
        }
    }

    /// Screen-absolute travel direction for rounds fired at this facing.
    pub fn travel(self) -> Vec2 {
        match self {
            FacingDirection::Forward => Vec2::new(0.0, -1.0),
            FacingDirection::Backward => Vec2::new(0.0, 1.0),
            FacingDirection::Left => Vec2::new(-1.0, 0.0),
            FacingDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Movement directions a player is holding this frame. Any subset may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteerRequest {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl SteerRequest {
    pub const NONE: SteerRequest = SteerRequest {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };
}
