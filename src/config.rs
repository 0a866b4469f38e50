//! World and solver configuration
//!
//! Configuration can be built in code, or loaded with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `impulse2d.toml` in the given directory (optional)
//! 3. Environment variables (`IMPULSE2D_SECTION__KEY`)

use crate::error::ConfigError;
use crate::math::Vec2;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up by [`WorldConfig::load_from`].
pub const CONFIG_FILE_NAME: &str = "impulse2d.toml";
/// Prefix for environment overrides, e.g. `IMPULSE2D_ITERATIONS=20`.
pub const ENV_PREFIX: &str = "IMPULSE2D_";

/// Tuning constants of the contact resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Penetration left uncorrected to avoid jitter
    pub slop: f64,
    /// Fraction of the remaining penetration removed per resolution
    pub correction_percent: f64,
    /// Closing speeds below this are resolved with zero restitution
    pub restitution_velocity_threshold: f64,
    /// Squared tangential speed under which friction is skipped
    pub tangent_epsilon: f64,
    /// Horizontal velocity factor applied when a body hits a screen edge
    pub wall_bounce: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            slop: 0.01,
            correction_percent: 0.8,
            restitution_velocity_threshold: 120.0,
            tangent_epsilon: 0.0001,
            wall_bounce: -0.5,
        }
    }
}

/// Externally mutable world parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity acceleration (positive y = down the screen)
    pub gravity: Vec2,
    /// Pairwise resolution passes per sub-step
    pub iterations: usize,
    /// Integration slices per `update` call
    pub sub_steps: usize,
    /// Horizontal extent bodies are clamped into
    pub screen_width: f64,
    /// Y coordinate of the floor's top surface at construction time
    pub ground_height: f64,
    pub solver: SolverSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 980.0),
            iterations: 15,
            sub_steps: 3,
            screen_width: 800.0,
            ground_height: 650.0,
            solver: SolverSettings::default(),
        }
    }
}

impl WorldConfig {
    /// Defaults for the given screen dimensions.
    pub fn for_screen(screen_width: f64, ground_height: f64) -> Self {
        Self {
            screen_width,
            ground_height,
            ..Self::default()
        }
    }

    /// Load configuration from `dir/impulse2d.toml` plus environment overrides.
    pub fn load_from<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);

        let mut figment = Figment::from(Serialized::defaults(WorldConfig::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(&path));
        }
        // IMPULSE2D_SOLVER__SLOP=0.02 -> solver.slop
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: WorldConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an inline TOML document (no environment overrides).
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = Figment::from(Serialized::defaults(WorldConfig::default()))
            .merge(Toml::string(toml))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the solver cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.sub_steps == 0 {
            return Err(ConfigError::ZeroSubSteps);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity {
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        if !self.screen_width.is_finite() || self.screen_width < 0.0 {
            return Err(ConfigError::InvalidScreenWidth(self.screen_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, Vec2::new(0.0, 980.0));
        assert_eq!(config.iterations, 15);
        assert_eq!(config.sub_steps, 3);
        assert_eq!(config.solver.slop, 0.01);
        assert_eq!(config.solver.correction_percent, 0.8);
        assert_eq!(config.solver.wall_bounce, -0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let mut config = WorldConfig::default();
        config.iterations = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));

        let mut config = WorldConfig::default();
        config.sub_steps = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSubSteps));
    }

    #[test]
    fn test_validate_rejects_non_finite_gravity() {
        let mut config = WorldConfig::default();
        config.gravity = Vec2::new(f64::NAN, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteGravity { .. })
        ));
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = WorldConfig::from_toml_str(
            r#"
            iterations = 4
            screen_width = 1024.0

            [gravity]
            x = 0.0
            y = 500.0

            [solver]
            slop = 0.05
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.iterations, 4);
        assert_eq!(config.sub_steps, 3); // untouched default
        assert_eq!(config.screen_width, 1024.0);
        assert_eq!(config.gravity, Vec2::new(0.0, 500.0));
        assert_eq!(config.solver.slop, 0.05);
        assert_eq!(config.solver.correction_percent, 0.8);
    }

    #[test]
    fn test_from_toml_invalid_values() {
        let err = WorldConfig::from_toml_str("sub_steps = 0").unwrap_err();
        assert_eq!(err, ConfigError::ZeroSubSteps);

        let err = WorldConfig::from_toml_str("iterations = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_load_from_directory_without_file_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();

            let config = WorldConfig::load_from(jail.directory()).expect("defaults load");
            assert_eq!(config, WorldConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_directory_reads_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(CONFIG_FILE_NAME, "iterations = 7\nground_height = 400.0\n")?;

            let config = WorldConfig::load_from(jail.directory()).expect("file load");
            assert_eq!(config.iterations, 7);
            assert_eq!(config.ground_height, 400.0);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(CONFIG_FILE_NAME, "iterations = 7\n")?;
            jail.set_env("IMPULSE2D_ITERATIONS", 20);
            jail.set_env("IMPULSE2D_SOLVER__SLOP", 0.02);

            let config = WorldConfig::load_from(jail.directory()).expect("env load");
            assert_eq!(config.iterations, 20);
            assert_eq!(config.solver.slop, 0.02);
            assert_eq!(config.sub_steps, 3);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_rejects_invalid_env_value() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("IMPULSE2D_SUB_STEPS", 0);

            let err = WorldConfig::load_from(jail.directory()).unwrap_err();
            assert_eq!(err, ConfigError::ZeroSubSteps);
            Ok(())
        });
    }
}
