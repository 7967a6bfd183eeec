// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Tilemerge: a sliding-tile merge puzzle engine.
//!
//! Tiles on a rectangular grid slide in one of four directions. Two tiles of
//! equal value that meet merge into one of double the value; each tile takes
//! part in at most one merge per move. After a move that changed the board a
//! short settle delay passes, a new tile spawns, and the game ends once the
//! board is full with no merge left.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI: play (TUI) / simulate / best │
//! ├─────────────────────────────────────┤
//! │   Autoplay runner   │   Scoreboard  │
//! ├─────────────────────────────────────┤
//! │   GameState (phases, settle, spawn) │
//! ├─────────────────────────────────────┤
//! │   Board: Grid + TileArena + moves   │
//! └─────────────────────────────────────┘
//! ```

pub mod autoplay;
pub mod config;
pub mod engine;
pub mod error;
pub mod score;

pub use config::GameConfig;
pub use error::ConfigError;

// Re-export key engine types at crate root for convenience
pub use engine::{Board, Coord, Direction, GameState, MoveOutcome, Phase, Tile, TileId};
pub use score::{
    FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, ScoreSink, Scoreboard,
};
