use crate::collision::AABB;
use crate::common::{Color, Material};
use crate::error::PhysicsError;
use crate::math::{Transform, Vec2};
use crate::shapes::{Circle, Rect, Shape, ShapeKind};

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    // Geometry (fixed at construction)
    shape: Shape,
    pub material: Material,
    /// Render tint, never read by the solver
    pub color: Color,

    // Placement; setters keep `vertices` in sync
    position: Vec2,
    angle: f64, // Radians

    pub velocity: Vec2,
    pub angular_velocity: f64, // Radians per second

    // Mass properties, computed once in `with_shape`
    mass: f64,
    inv_mass: f64,    // 0.0 for static
    inertia: f64,
    inv_inertia: f64, // 0.0 for static

    /// World-space corners of a box, same order as `Rect::local_vertices`.
    vertices: [Vec2; 4],
}

impl RigidBody {
    /// Creates a body from a shape. `mass <= 0` (or non-finite) makes it static:
    /// mass, inverse mass, inertia and inverse inertia are all exactly zero.
    pub fn with_shape(shape: Shape, position: Vec2, mass: f64) -> Self {
        let (mass, inv_mass, inertia, inv_inertia) = if mass > 0.0 && mass.is_finite() {
            let inertia = shape.inertia(mass);
            let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
            (mass, 1.0 / mass, inertia, inv_inertia)
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };

        let mut body = Self {
            shape,
            material: Material::default(),
            color: Color::default(),
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            vertices: [Vec2::ZERO; 4],
        };
        body.update_vertices();
        body
    }

    /// Box centered at `position` with full extents `size`.
    ///
    /// Panics on negative or non-finite dimensions; see [`RigidBody::try_new_box`].
    pub fn new_box(position: Vec2, size: Vec2, mass: f64) -> Self {
        Self::with_shape(Shape::Rect(Rect::new(size.x, size.y)), position, mass)
    }

    pub fn try_new_box(position: Vec2, size: Vec2, mass: f64) -> Result<Self, PhysicsError> {
        let rect = Rect::try_new(size.x, size.y)?;
        Ok(Self::with_shape(Shape::Rect(rect), position, mass))
    }

    /// Circle centered at `position`.
    ///
    /// Panics on a negative or non-finite radius; see [`RigidBody::try_new_circle`].
    pub fn new_circle(position: Vec2, radius: f64, mass: f64) -> Self {
        Self::with_shape(Shape::Circle(Circle::new(radius)), position, mass)
    }

    pub fn try_new_circle(position: Vec2, radius: f64, mass: f64) -> Result<Self, PhysicsError> {
        let circle = Circle::try_new(radius)?;
        Ok(Self::with_shape(Shape::Circle(circle), position, mass))
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.set_angle(angle);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Orientation in radians. The integrator keeps it wrapped to [-PI, PI],
    /// so a spinning body jumps from PI to -PI rather than accumulating turns.
    /// Values passed to [`set_angle`](Self::set_angle) are stored as given.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_vertices();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.update_vertices();
    }

    /// Moves the body by `offset` and refreshes the cached vertices.
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
        self.update_vertices();
    }

    /// Sets position and angle together with a single vertex refresh.
    pub(crate) fn set_placement(&mut self, position: Vec2, angle: f64) {
        self.position = position;
        self.angle = angle;
        self.update_vertices();
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// Full box extents, or the bounding square of a circle.
    pub fn size(&self) -> Vec2 {
        match &self.shape {
            Shape::Rect(rect) => rect.size(),
            Shape::Circle(circle) => Vec2::new(circle.radius * 2.0, circle.radius * 2.0),
        }
    }

    /// Circle radius; zero for boxes.
    pub fn radius(&self) -> f64 {
        match &self.shape {
            Shape::Circle(circle) => circle.radius,
            Shape::Rect(_) => 0.0,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// World-space box corners. Empty for circles.
    pub fn vertices(&self) -> &[Vec2] {
        match self.shape {
            Shape::Rect(_) => &self.vertices,
            Shape::Circle(_) => &[],
        }
    }

    /// Recomputes the cached world-space vertices from position and angle.
    pub fn update_vertices(&mut self) {
        if let Shape::Rect(rect) = &self.shape {
            let transform = Transform::new(self.position, self.angle);
            for (world, local) in self.vertices.iter_mut().zip(rect.local_vertices()) {
                *world = transform.apply(local);
            }
        }
    }

    /// Velocity of the material point at `point` (world space).
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        self.velocity + (point - self.position).cross_scalar(self.angular_velocity)
    }

    /// Applies `impulse` at lever arm `arm` (contact point minus center).
    pub fn apply_impulse(&mut self, impulse: Vec2, arm: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += arm.cross(impulse) * self.inv_inertia;
    }

    /// Calculates the world-space Axis-Aligned Bounding Box (AABB) for this body.
    pub fn aabb(&self) -> AABB {
        match &self.shape {
            Shape::Circle(circle) => {
                let radius_vec = Vec2::new(circle.radius, circle.radius);
                AABB::new(self.position - radius_vec, self.position + radius_vec)
            }
            Shape::Rect(_) => AABB::from_points(&self.vertices)
                .unwrap_or_else(|| AABB::new(self.position, self.position)),
        }
    }
}
