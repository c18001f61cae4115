//! Game configuration
//!
//! Stored as RON. Lookup order:
//! 1. `<config dir>/star-catcher/config.ron` (native only)
//! 2. `assets/config.ron`
//! 3. built-in defaults
//!
//! Missing fields take their default, so a file only needs the values it
//! overrides.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bundled config shipped next to the assets
pub const ASSETS_CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Star Catcher".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Fixed simulation ticks per second
    pub tick_rate: f32,
    /// Rebounds slower than this (px/s) are zeroed
    pub rest_speed: f32,
    /// Catch-up cap after a slow frame
    pub max_steps_per_frame: u32,
}

impl PhysicsConfig {
    /// Length of one fixed tick in seconds.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            tick_rate: 60.0,
            rest_speed: 10.0,
            max_steps_per_frame: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Spawn a bomb for every collected star
    pub enabled: bool,
    /// Touching a bomb ends the game
    pub lethal: bool,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lethal: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub hazards: HazardConfig,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Start with physics body outlines visible
    pub debug: bool,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        if self.window.title.trim().is_empty() {
            return Err(ConfigError::Validation("window title is empty".to_string()));
        }
        if !p.gravity.is_finite() || p.gravity <= 0.0 {
            return Err(ConfigError::Validation(format!("gravity must be positive, got {}", p.gravity)));
        }
        if !p.tick_rate.is_finite() || p.tick_rate <= 0.0 {
            return Err(ConfigError::Validation(format!("tick_rate must be positive, got {}", p.tick_rate)));
        }
        if !p.rest_speed.is_finite() || p.rest_speed < 0.0 {
            return Err(ConfigError::Validation(format!("rest_speed must be >= 0, got {}", p.rest_speed)));
        }
        if p.max_steps_per_frame == 0 {
            return Err(ConfigError::Validation("max_steps_per_frame must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GameConfig = ron::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Per-user override location.
#[cfg(not(target_arch = "wasm32"))]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("star-catcher").join("config.ron"))
}

#[cfg(target_arch = "wasm32")]
pub fn user_config_path() -> Option<PathBuf> {
    None
}

/// Config from the standard lookup order, falling back to defaults.
pub fn load_or_default() -> GameConfig {
    let mut candidates: Vec<PathBuf> = user_config_path().into_iter().collect();
    candidates.push(PathBuf::from(ASSETS_CONFIG_PATH));
    load_first(&candidates)
}

/// First candidate that exists and loads cleanly. A file that exists but is
/// broken is reported and skipped.
pub fn load_first(candidates: &[PathBuf]) -> GameConfig {
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_config(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => warn!("Ignoring config {}: {}", path.display(), e),
        }
    }
    GameConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.physics.gravity, 300.0);
        assert_eq!(config.physics.tick_rate, 60.0);
        assert!(config.hazards.enabled);
        assert!(!config.hazards.lethal);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pretty_file_round_trips() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.ron");
        let mut config = GameConfig::default();
        config.seed = Some(42);
        config.hazards.lethal = true;

        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        fs::write(&path, ron::ser::to_string_pretty(&config, pretty).expect("serialize")).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let config: GameConfig = ron::from_str("(physics: (gravity: 500.0), debug: true)").expect("parse");
        assert_eq!(config.physics.gravity, 500.0);
        assert_eq!(config.physics.tick_rate, 60.0);
        assert!(config.debug);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.physics.tick_rate = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = GameConfig::default();
        config.physics.gravity = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.physics.max_steps_per_frame = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_first_skips_broken_files() {
        let dir = tempdir().expect("tempdir");
        let broken = dir.path().join("broken.ron");
        let invalid = dir.path().join("invalid.ron");
        let good = dir.path().join("good.ron");
        fs::write(&broken, "(physics: (").expect("write");
        fs::write(&invalid, "(physics: (gravity: -1.0))").expect("write");
        fs::write(&good, "(seed: Some(7))").expect("write");

        let missing = dir.path().join("missing.ron");
        let config = load_first(&[missing, broken, invalid, good]);
        assert_eq!(config.seed, Some(7));

        assert_eq!(load_first(&[]), GameConfig::default());
    }
}
