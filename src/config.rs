//! Game configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default board width.
pub const DEFAULT_WIDTH: u16 = 4;
/// Default board height.
pub const DEFAULT_HEIGHT: u16 = 4;
/// Default chance that a spawned tile is a 4.
pub const DEFAULT_FOUR_TILE_PROBABILITY: f64 = 0.1;
/// Default settle delay in seconds.
pub const DEFAULT_SETTLE_DELAY: f64 = 0.1;

/// Recognized game options.
///
/// Missing fields in a config file fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: u16,
    /// Board height in cells.
    pub height: u16,
    /// Chance in `[0, 1]` that a spawned tile is a 4 instead of a 2.
    pub four_tile_probability: f64,
    /// Seconds between a changing move and its unlock/spawn/game-over step.
    pub settle_delay: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            four_tile_probability: DEFAULT_FOUR_TILE_PROBABILITY,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl GameConfig {
    /// Check every option is in range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.four_tile_probability) {
            return Err(ConfigError::FourTileProbability(self.four_tile_probability));
        }
        if Duration::try_from_secs_f64(self.settle_delay).is_err() {
            return Err(ConfigError::SettleDelay(self.settle_delay));
        }
        Ok(())
    }

    /// The settle delay as a `Duration` (zero if out of range).
    #[must_use]
    pub fn settle_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.settle_delay).unwrap_or(Duration::ZERO)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 4);
        assert_eq!(config.height, 4);
        assert_eq!(config.settle_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimension { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        for p in [-0.1, 1.01, f64::NAN] {
            let config = GameConfig {
                four_tile_probability: p,
                ..GameConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::FourTileProbability(_))));
        }
    }

    #[test]
    fn test_accepts_probability_bounds() {
        for p in [0.0, 1.0] {
            let config = GameConfig {
                four_tile_probability: p,
                ..GameConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_bad_delay() {
        for delay in [-1.0, f64::NAN, f64::INFINITY] {
            let config = GameConfig {
                settle_delay: delay,
                ..GameConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::SettleDelay(_))));
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "width": 5 }"#).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert!((config.four_tile_probability - DEFAULT_FOUR_TILE_PROBABILITY).abs() < f64::EPSILON);
    }
}
