use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fastest accepted speed; anything above is clamped
pub const MAX_SPEED: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("width ({0}) must be positive")]
    ZeroWidth(usize),
    #[error("height ({0}) must be positive")]
    ZeroHeight(usize),
    #[error("speed ({0}) must be a positive number")]
    InvalidSpeed(f32),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Ticks are `500 / speed` milliseconds apart
    pub speed: f32,
    /// Let the pathfinding agent steer instead of the keyboard
    pub autonomous: bool,
    /// Seed for target placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            speed: 7.0,
            autonomous: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.min(MAX_SPEED);
        self
    }

    pub fn with_autonomous(mut self, autonomous: bool) -> Self {
        self.autonomous = autonomous;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.speed = config.speed.min(MAX_SPEED);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 {
            return Err(ConfigError::ZeroWidth(self.grid_width));
        }
        if self.grid_height == 0 {
            return Err(ConfigError::ZeroHeight(self.grid_height));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    /// Delay between two game ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis((500.0 / self.speed).max(1.0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.speed, 7.0);
        assert!(!config.autonomous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_autonomous(true).with_seed(4);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(config.autonomous);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_validation() {
        assert_eq!(GameConfig::new(0, 5).validate(), Err(ConfigError::ZeroWidth(0)));
        assert_eq!(GameConfig::new(5, 0).validate(), Err(ConfigError::ZeroHeight(0)));
        assert_eq!(
            GameConfig::new(5, 5).with_speed(-1.0).validate(),
            Err(ConfigError::InvalidSpeed(-1.0))
        );
    }

    #[test]
    fn test_speed_clamp_and_interval() {
        let config = GameConfig::default().with_speed(5000.0);
        assert_eq!(config.speed, MAX_SPEED);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));

        let config = GameConfig::default().with_speed(5.0);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_from_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"grid_width": 8, "autonomous": true, "seed": 3}}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, 20);
        assert!(config.autonomous);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::from_json_file(file.path()).is_err());
    }
}
