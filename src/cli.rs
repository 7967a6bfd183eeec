//! CLI command implementations for tilemerge.

pub(crate) mod best;
pub(crate) mod play;
pub(crate) mod simulate;

mod output;

use clap::{Args, ValueEnum};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tilemerge::autoplay::Policy;
use tilemerge::{ConfigError, FileHighScoreStore, GameConfig};

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Move policy for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    /// Random direction order each move.
    Random,
    /// Keep tiles packed into the bottom-left corner.
    Corner,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => Policy::Random,
            PolicyArg::Corner => Policy::Corner,
        }
    }
}

/// Game options shared by `play` and `simulate`.
///
/// Flags override values from `--config`, which override the defaults.
#[derive(Args, Debug, Clone)]
pub(crate) struct ConfigArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width
    #[arg(long)]
    width: Option<u16>,

    /// Board height
    #[arg(long)]
    height: Option<u16>,

    /// Chance that a spawned tile is a 4 (0.0-1.0)
    #[arg(long)]
    four_probability: Option<f64>,

    /// Seconds between a move and the next spawn
    #[arg(long)]
    settle_delay: Option<f64>,
}

impl ConfigArgs {
    /// Build the effective game config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result is invalid.
    pub(crate) fn resolve(&self) -> Result<GameConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(p) = self.four_probability {
            config.four_tile_probability = p;
        }
        if let Some(delay) = self.settle_delay {
            config.settle_delay = delay;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Seed from the wall clock when none was given.
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_nanos()).ok())
            .unwrap_or(42)
    })
}

/// High-score store at `path`, or the default location.
pub(crate) fn highscore_store(path: Option<PathBuf>) -> Result<FileHighScoreStore, CliError> {
    match path {
        Some(path) => Ok(FileHighScoreStore::new(path)),
        None => FileHighScoreStore::default_location()
            .map_err(|e| CliError::new(format!("Failed to locate high-score file: {e}"))),
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}
