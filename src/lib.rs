pub mod collision;
pub mod common;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{BodyHandle, CollisionManifold};
pub use common::{Color, Material};
pub use config::{SolverSettings, WorldConfig};
pub use error::{ConfigError, PhysicsError};
pub use math::vec2::Vec2;
pub use objects::rigid_body::RigidBody;
pub use shapes::{Circle, Rect, Shape, ShapeKind};
pub use world::PhysicsWorld;
