pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod resolution;

// Re-export key types
pub use aabb::AABB;
pub use detection::*;
pub use manifold::*;
pub use resolution::*;
