//! Errors surfaced at the API boundary. The solver itself never fails; it
//! handles degenerate numerics with explicit branches.

use thiserror::Error;

/// Invalid world configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("solver iterations must be at least 1")]
    ZeroIterations,
    #[error("sub-steps must be at least 1")]
    ZeroSubSteps,
    #[error("gravity must be finite, got ({x}, {y})")]
    NonFiniteGravity { x: f64, y: f64 },
    #[error("screen width must be finite and non-negative, got {0}")]
    InvalidScreenWidth(f64),
    #[error("failed to load configuration: {0}")]
    Load(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e.to_string())
    }
}

/// Errors returned by world and body construction/stepping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    #[error("invalid {what}: {value}")]
    InvalidDimension { what: &'static str, value: f64 },
    #[error("new body overlaps existing object {index}")]
    Overlap { index: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
