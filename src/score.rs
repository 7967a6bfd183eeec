//! Score accumulation and best-score persistence.
//!
//! The engine only ever talks to a [`ScoreSink`]; where the best score lives
//! is behind [`HighScoreStore`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

/// Receives merge notifications from the engine.
pub trait ScoreSink {
    /// A merge produced a tile with `new_value`; that many points are awarded.
    fn on_merge(&mut self, new_value: u32);

    /// A new game is starting.
    fn on_new_game(&mut self) {}
}

/// Storage for the best score across games.
pub trait HighScoreStore {
    /// Read the stored best score (0 when nothing has been stored).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load_best(&self) -> io::Result<u64>;

    /// Overwrite the stored best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save_best(&mut self, best: u64) -> io::Result<()>;
}

/// In-memory best score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    best: u64,
}

impl MemoryHighScoreStore {
    /// Start with a given best score.
    #[must_use]
    pub const fn with_best(best: u64) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_best(&self) -> io::Result<u64> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> io::Result<()> {
        self.best = best;
        Ok(())
    }
}

/// On-disk layout of the high-score file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreFile {
    best: u64,
}

/// File name of the high-score file inside the data directory.
const HIGHSCORE_FILE: &str = "highscore.json";

/// Best score persisted as JSON in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    /// Store the best score at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the best score in `~/.tilemerge/highscore.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// data directory cannot be created.
    pub fn default_location() -> io::Result<Self> {
        Ok(Self::new(data_dir()?.join(HIGHSCORE_FILE)))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_best(&self) -> io::Result<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let file: HighScoreFile = serde_json::from_str(&text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(file.best)
    }

    fn save_best(&mut self, best: u64) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreFile { best })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

/// Get the path to the tilemerge data directory (~/.tilemerge).
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or directory creation fails.
pub fn data_dir() -> io::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "cannot determine home directory"))?;

    let dir = Path::new(&home).join(".tilemerge");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Current score plus best score, written through to a store.
///
/// The best is saved whenever the current score passes it.
#[derive(Debug, Clone)]
pub struct Scoreboard<H> {
    score: u64,
    best: u64,
    store: H,
}

impl<H: HighScoreStore> Scoreboard<H> {
    /// Create a scoreboard, reading the best score from `store`.
    ///
    /// A store that cannot be read is logged and treated as best = 0.
    pub fn new(store: H) -> Self {
        let best = store.load_best().unwrap_or_else(|e| {
            warn!("could not read best score: {e}");
            0
        });
        Self {
            score: 0,
            best,
            store,
        }
    }

    /// Reset the stored best score to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn reset_best(&mut self) -> io::Result<()> {
        self.store.save_best(0)?;
        self.best = 0;
        Ok(())
    }
}

impl<H> Scoreboard<H> {
    /// Points scored this game.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen, including the current game.
    #[must_use]
    pub const fn best(&self) -> u64 {
        self.best
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &H {
        &self.store
    }
}

impl<H: HighScoreStore> ScoreSink for Scoreboard<H> {
    fn on_merge(&mut self, new_value: u32) {
        self.score = self.score.saturating_add(u64::from(new_value));
        if self.score > self.best {
            self.best = self.score;
            if let Err(e) = self.store.save_best(self.best) {
                warn!("could not save best score: {e}");
            }
        }
    }

    fn on_new_game(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_accumulates() {
        let mut board = Scoreboard::new(MemoryHighScoreStore::default());
        board.on_merge(4);
        board.on_merge(8);
        assert_eq!(board.score(), 12);
        assert_eq!(board.best(), 12);
        assert_eq!(board.store().load_best().unwrap(), 12);
    }

    #[test]
    fn test_best_only_grows() {
        let mut board = Scoreboard::new(MemoryHighScoreStore::with_best(100));
        board.on_merge(64);
        assert_eq!(board.best(), 100);
        assert_eq!(board.store().load_best().unwrap(), 100);

        board.on_merge(64);
        assert_eq!(board.best(), 128);
        assert_eq!(board.store().load_best().unwrap(), 128);
    }

    #[test]
    fn test_new_game_keeps_best() {
        let mut board = Scoreboard::new(MemoryHighScoreStore::default());
        board.on_merge(32);
        board.on_new_game();
        assert_eq!(board.score(), 0);
        assert_eq!(board.best(), 32);
    }

    #[test]
    fn test_reset_best() {
        let mut board = Scoreboard::new(MemoryHighScoreStore::with_best(50));
        board.reset_best().unwrap();
        assert_eq!(board.best(), 0);
        assert_eq!(board.store().load_best().unwrap(), 0);
    }
}
