use super::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Rigid placement of a shape: rotation about its center, then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Local -> world: rotate by `rotation`, then translate.
    pub fn apply(self, point: Vec2) -> Vec2 {
        point.rotate(self.rotation) + self.position
    }

    /// World -> local: translate back, then rotate by `-rotation`.
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        (point - self.position).rotate(-self.rotation)
    }

    /// Rotates a direction into world space (no translation).
    pub fn apply_direction(self, direction: Vec2) -> Vec2 {
        direction.rotate(self.rotation)
    }
}
