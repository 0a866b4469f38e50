use crate::collision::{self, BodyHandle, CollisionManifold};
use crate::config::{SolverSettings, WorldConfig};
use crate::error::PhysicsError;
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use log::debug;

/// Floor thickness; the floor's top edge sits at `ground_height`.
const FLOOR_THICKNESS: f64 = 1000.0;
/// Floor width as a multiple of the screen width.
const FLOOR_WIDTH_FACTOR: f64 = 10.0;

pub struct PhysicsWorld {
    objects: Vec<RigidBody>,
    /// Built once at construction; never replaced.
    floor: RigidBody,
    pub config: WorldConfig,
}

impl PhysicsWorld {
    /// Creates an empty world with default tuning for the given screen.
    ///
    /// Panics if `screen_width` or `ground_height` cannot describe a floor;
    /// see [`PhysicsWorld::with_config`].
    pub fn new(screen_width: f64, ground_height: f64) -> Self {
        let config = WorldConfig::for_screen(screen_width, ground_height);
        Self {
            objects: Vec::new(),
            floor: RigidBody::new_box(
                Self::floor_position(&config),
                Self::floor_size(&config),
                0.0,
            ),
            config,
        }
    }

    /// Creates an empty world from a validated configuration.
    pub fn with_config(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        if !config.ground_height.is_finite() {
            return Err(PhysicsError::InvalidDimension {
                what: "ground height",
                value: config.ground_height,
            });
        }

        let floor = RigidBody::try_new_box(Self::floor_position(&config), Self::floor_size(&config), 0.0)?;
        debug!(
            "world created: screen_width={}, ground_height={}, iterations={}, sub_steps={}",
            config.screen_width, config.ground_height, config.iterations, config.sub_steps
        );
        Ok(Self {
            objects: Vec::new(),
            floor,
            config,
        })
    }

    fn floor_position(config: &WorldConfig) -> Vec2 {
        Vec2::new(config.screen_width / 2.0, config.ground_height + FLOOR_THICKNESS / 2.0)
    }

    fn floor_size(config: &WorldConfig) -> Vec2 {
        Vec2::new(config.screen_width * FLOOR_WIDTH_FACTOR, FLOOR_THICKNESS)
    }

    /// Appends a body and returns its index. No overlap check is made.
    pub fn add_object(&mut self, body: RigidBody) -> usize {
        let index = self.objects.len();
        debug!("adding {:?} body #{} at {:?}", body.kind(), index, body.position());
        self.objects.push(body);
        index
    }

    /// Appends a body unless its bounding box overlaps an existing object's.
    pub fn try_add_object(&mut self, body: RigidBody) -> Result<usize, PhysicsError> {
        let bounds = body.aabb();
        if let Some(index) = self.objects.iter().position(|other| other.aabb().overlaps(&bounds)) {
            debug!("rejected spawn at {:?}: overlaps object #{}", body.position(), index);
            return Err(PhysicsError::Overlap { index });
        }
        Ok(self.add_object(body))
    }

    /// Removes every object. The floor stays.
    pub fn clear(&mut self) {
        debug!("clearing {} objects", self.objects.len());
        self.objects.clear();
    }

    pub fn objects(&self) -> &[RigidBody] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [RigidBody] {
        &mut self.objects
    }

    pub fn object(&self, index: usize) -> Option<&RigidBody> {
        self.objects.get(index)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn floor(&self) -> &RigidBody {
        &self.floor
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.config.iterations = iterations;
    }

    pub fn set_sub_steps(&mut self, sub_steps: usize) {
        self.config.sub_steps = sub_steps;
    }

    /// Advances the simulation by `dt` seconds, split into `sub_steps` slices.
    pub fn update(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }
        if let Err(e) = self.config.validate() {
            debug!("refusing to step: {}", e);
            return Err(e.into());
        }
        if dt == 0.0 {
            return Ok(());
        }

        let sub_dt = dt / self.config.sub_steps as f64;
        for _ in 0..self.config.sub_steps {
            self.sub_step(sub_dt);
        }
        Ok(())
    }

    fn sub_step(&mut self, dt: f64) {
        let Self { objects, floor, config } = self;

        // 1. Integrate each dynamic body, settle it against the floor, keep it on screen
        for (index, body) in objects.iter_mut().enumerate() {
            if body.is_static() {
                continue;
            }

            integrator::integrate(body, config.gravity, dt);

            let handle = BodyHandle::Object(index);
            if let Some(manifold) = collision::check_collision(body, handle, floor, BodyHandle::Floor) {
                resolve_ordered(&manifold, handle, body, floor, &config.solver);
            }

            Self::clamp_to_screen(body, config);
        }

        // 2. Pairwise passes, each contact resolved as soon as it is found
        let count = objects.len();
        for _ in 0..config.iterations {
            for i in 0..count {
                for j in (i + 1)..count {
                    let (left, right) = objects.split_at_mut(j);
                    let body_a = &mut left[i];
                    let body_b = &mut right[0];

                    if body_a.is_static() && body_b.is_static() {
                        continue;
                    }

                    let handle_a = BodyHandle::Object(i);
                    if let Some(manifold) =
                        collision::check_collision(body_a, handle_a, body_b, BodyHandle::Object(j))
                    {
                        resolve_ordered(&manifold, handle_a, body_a, body_b, &config.solver);
                    }
                }
            }
        }
    }

    /// Keeps the body's center within `[0, screen_width]`, bouncing it off the edge.
    fn clamp_to_screen(body: &mut RigidBody, config: &WorldConfig) {
        let position = body.position();
        let clamped_x = if position.x < 0.0 {
            0.0
        } else if position.x > config.screen_width {
            config.screen_width
        } else {
            return;
        };

        body.set_position(Vec2::new(clamped_x, position.y));
        body.velocity.x *= config.solver.wall_bounce;
    }
}

/// Resolves `manifold` with the bodies in the manifold's own order.
/// `first` is the handle `body_first` was passed to the detector under.
fn resolve_ordered(
    manifold: &CollisionManifold,
    first: BodyHandle,
    body_first: &mut RigidBody,
    body_second: &mut RigidBody,
    settings: &SolverSettings,
) {
    if manifold.is_swapped(first) {
        collision::resolve_collision(manifold, body_second, body_first, settings);
    } else {
        collision::resolve_collision(manifold, body_first, body_second, settings);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        let config = WorldConfig::default();
        Self::new(config.screen_width, config.ground_height)
    }
}
