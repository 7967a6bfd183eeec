//! Board engine for tilemerge.
//!
//! Implements the puzzle rules:
//! - Grid of cells with bounds-checked adjacency
//! - Tiles held in a generational arena, linked to cells by handle
//! - Directional moves with per-move merge locking
//! - Settle timer and the move state machine
//! - Invariant checks for the cell/tile links

mod board;
mod grid;
mod invariants;
mod moves;
mod settle;
mod state;
mod tile;

pub use board::Board;
pub use grid::{Cell, CellId, Coord, Direction, Grid};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use moves::{MoveOutcome, apply_move, scan_order};
pub use settle::SettleTimer;
pub use state::{GameState, Phase, SpawnStats};
pub use tile::{Tile, TileId};

pub(crate) use tile::TileArena;
