//! Error types for tilemerge.

use std::fmt;
use std::io;

/// Configuration rejected at load or validation time.
#[derive(Debug)]
pub enum ConfigError {
    /// Width or height is zero.
    ZeroDimension {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Four-tile probability outside `[0, 1]` or NaN.
    FourTileProbability(f64),
    /// Settle delay negative, NaN, or too large for a `Duration`.
    SettleDelay(f64),
    /// The config file could not be read.
    Io(io::Error),
    /// The config file is not valid JSON for [`GameConfig`](crate::GameConfig).
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension { width, height } => {
                write!(f, "board must be at least 1x1, got {width}x{height}")
            }
            ConfigError::FourTileProbability(p) => {
                write!(f, "four-tile probability must be within [0, 1], got {p}")
            }
            ConfigError::SettleDelay(secs) => {
                write!(f, "settle delay must be a non-negative number of seconds, got {secs}")
            }
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = ConfigError::ZeroDimension { width: 0, height: 4 };
        assert_eq!(err.to_string(), "board must be at least 1x1, got 0x4");

        let err = ConfigError::FourTileProbability(1.5);
        assert!(err.to_string().contains("1.5"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_source_preserved() {
        let err = ConfigError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.to_string().contains("missing"));
        assert!(err.source().is_some());
    }
}
