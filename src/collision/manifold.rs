use crate::math::vec2::Vec2;

/// Identifies a body owned by the world: the floor, or an object by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyHandle {
    Floor,
    Object(usize),
}

/// Result of one narrow-phase test. Built fresh per test, consumed by the
/// resolver, then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManifold {
    /// First participant. For circle-box pairs this is always the circle,
    /// whatever order the pair was passed in.
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Unit normal pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration along `normal`, non-negative.
    pub depth: f64,
    /// Single world-space contact point.
    pub contact: Vec2,
}

impl CollisionManifold {
    /// True when the manifold lists the pair in the opposite order to `first`.
    pub fn is_swapped(&self, first: BodyHandle) -> bool {
        self.body_a != first
    }
}
