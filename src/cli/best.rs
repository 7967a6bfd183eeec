//! Best command implementation.

use super::{CliError, highscore_store};
use std::path::PathBuf;
use tilemerge::{HighScoreStore, Scoreboard};

/// Execute the best command.
///
/// # Errors
///
/// Returns an error if the high-score file cannot be read or written.
pub(crate) fn execute(highscore: Option<PathBuf>, reset: bool) -> Result<(), CliError> {
    let store = highscore_store(highscore)?;

    if reset {
        let mut scores = Scoreboard::new(store);
        scores.reset_best()?;
        println!("Best score reset ({})", scores.store().path().display());
        return Ok(());
    }

    let best = store.load_best().map_err(|e| {
        CliError::new(format!("Failed to read {}: {e}", store.path().display()))
    })?;
    println!("Best score: {best}");

    Ok(())
}
