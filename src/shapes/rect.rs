use crate::error::PhysicsError;
use crate::math::vec2::Vec2;

/// Box shape given by its full width and height, centered on the body position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Panics if either dimension is negative or not finite.
    pub fn new(width: f64, height: f64) -> Self {
        match Self::try_new(width, height) {
            Ok(rect) => rect,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(width: f64, height: f64) -> Result<Self, PhysicsError> {
        if !(width >= 0.0 && width.is_finite()) {
            return Err(PhysicsError::InvalidDimension { what: "width", value: width });
        }
        if !(height >= 0.0 && height.is_finite()) {
            return Err(PhysicsError::InvalidDimension { what: "height", value: height });
        }
        Ok(Self { width, height })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Corners in local space, clockwise on screen (y down):
    /// top-left, top-right, bottom-right, bottom-left.
    /// Edge 0->1 runs along local x and edge 1->2 along local y.
    pub fn local_vertices(&self) -> [Vec2; 4] {
        let h = self.half_extents();
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
    }

    /// Moment of inertia of a solid rectangle about its center.
    pub fn inertia(&self, mass: f64) -> f64 {
        mass * (self.width * self.width + self.height * self.height) / 12.0
    }
}
