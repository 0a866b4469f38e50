use crate::error::PhysicsError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Panics if `radius` is negative or not finite.
    pub fn new(radius: f64) -> Self {
        assert!(radius >= 0.0 && radius.is_finite(), "Circle radius must be finite and non-negative");
        Self { radius }
    }

    pub fn try_new(radius: f64) -> Result<Self, PhysicsError> {
        if radius >= 0.0 && radius.is_finite() {
            Ok(Self { radius })
        } else {
            Err(PhysicsError::InvalidDimension { what: "radius", value: radius })
        }
    }

    /// Moment of inertia of a solid disc about its center.
    pub fn inertia(&self, mass: f64) -> f64 {
        0.5 * mass * self.radius * self.radius
    }
}
