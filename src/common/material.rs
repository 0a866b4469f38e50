//! Defines physical material properties.

/// Represents the physical properties of a rigid body affecting collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
    /// Multiplier applied to angular velocity once per sub-step. Range [0, 1].
    pub angular_damping: f64,
}

impl Material {
    pub const ICE: Self = Self { restitution: 0.1, friction: 0.02, angular_damping: 0.99 };
    pub const RUBBER: Self = Self { restitution: 0.8, friction: 0.9, angular_damping: 0.99 };
    pub const WOOD: Self = Self { restitution: 0.2, friction: 0.5, angular_damping: 0.98 };
    pub const METAL: Self = Self { restitution: 0.3, friction: 0.3, angular_damping: 0.99 };
    pub const CONCRETE: Self = Self { restitution: 0.05, friction: 0.7, angular_damping: 0.95 };

    /// Creates a new material, clamping each coefficient into its valid range.
    pub fn new(restitution: f64, friction: f64, angular_damping: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
            angular_damping: angular_damping.clamp(0.0, 1.0),
        }
    }

    /// Restitution used for a contact: the less bouncy surface wins.
    pub fn combined_restitution(&self, other: &Self) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact: `sqrt(a^2 + b^2)`.
    pub fn combined_friction(&self, other: &Self) -> f64 {
        (self.friction * self.friction + other.friction * other.friction).sqrt()
    }
}

impl Default for Material {
    /// Low bounce, low friction, slight spin decay.
    fn default() -> Self {
        Material {
            restitution: 0.1,
            friction: 0.2,
            angular_damping: 0.99,
        }
    }
}
