//! Directional move resolution.
//!
//! Tiles are processed starting from the edge they move toward, so every tile
//! only ever slides into or merges with cells that are already final for this
//! move. Together with the survivor lock this gives the classic behaviour:
//! `[2,2,2,2]` slid left becomes `[4,4,_,_]`, never `[8,_,_,_]`.

use crate::engine::{Board, Coord, Direction, TileId};
use crate::score::ScoreSink;

/// Summary of a single directional move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether any tile changed position or value.
    pub changed: bool,
    /// Number of merges performed.
    pub merges: u32,
    /// Points awarded (sum of merged tiles' new values).
    pub points: u64,
}

/// What happened to a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileStep {
    Stayed,
    Slid,
    Merged(u32),
}

/// Coordinates in the order tiles must be processed for `direction`.
///
/// - up: rows top-to-bottom, columns left-to-right
/// - down: rows bottom-to-top, columns left-to-right
/// - left: columns left-to-right, rows top-to-bottom
/// - right: columns right-to-left, rows top-to-bottom
pub fn scan_order(width: u16, height: u16, direction: Direction) -> impl Iterator<Item = Coord> {
    let outer = match direction {
        Direction::Up | Direction::Down => height,
        Direction::Left | Direction::Right => width,
    };
    let inner = match direction {
        Direction::Up | Direction::Down => width,
        Direction::Left | Direction::Right => height,
    };

    (0..outer).flat_map(move |o| {
        (0..inner).map(move |i| match direction {
            Direction::Up => Coord::new(i, o),
            Direction::Down => Coord::new(i, height - 1 - o),
            Direction::Left => Coord::new(o, i),
            Direction::Right => Coord::new(width - 1 - o, i),
        })
    })
}

/// Slide every tile on `board` toward `direction`, merging equal neighbours.
///
/// Each merge reports the survivor's new value to `sink`. The board is left
/// untouched when nothing can move.
pub fn apply_move<S: ScoreSink + ?Sized>(
    board: &mut Board,
    direction: Direction,
    sink: &mut S,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    for coord in scan_order(board.width(), board.height(), direction) {
        let Some(id) = board.tile_id_at(coord) else {
            continue;
        };

        match move_tile(board, id, direction) {
            TileStep::Stayed => {}
            TileStep::Slid => outcome.changed = true,
            TileStep::Merged(value) => {
                outcome.changed = true;
                outcome.merges += 1;
                outcome.points += u64::from(value);
                sink.on_merge(value);
            }
        }
    }

    outcome
}

fn move_tile(board: &mut Board, id: TileId, direction: Direction) -> TileStep {
    let Some(start) = board.tile(id).and_then(|tile| tile.cell()) else {
        return TileStep::Stayed;
    };

    let mut target = None;
    let mut next = board.grid().adjacent_cell(start, direction);

    while let Some(cell) = next {
        if let Some(other) = board.grid().cell(cell).occupant() {
            if board.can_merge(id, other) {
                return board.merge(other, id).map_or(TileStep::Stayed, TileStep::Merged);
            }
            break;
        }
        target = Some(cell);
        next = board.grid().adjacent_cell(cell, direction);
    }

    match target {
        Some(cell) => {
            board.relocate(id, cell);
            TileStep::Slid
        }
        None => TileStep::Stayed,
    }
}
