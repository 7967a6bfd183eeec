//! Board invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger. A violation means a cell/tile link was broken
//! on one side only, or a tile was lost without going through a merge.

use crate::engine::Board;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = board.grid();
    let mut occupied = 0usize;

    // Every occupant points back at its cell
    for (cell_id, cell) in grid.cells() {
        let Some(tile_id) = cell.occupant() else {
            continue;
        };
        occupied += 1;

        match board.tile(tile_id) {
            None => violations.push(InvariantViolation {
                message: format!("Cell at {:?} holds a discarded tile", cell.coord()),
            }),
            Some(tile) if tile.cell() != Some(cell_id) => violations.push(InvariantViolation {
                message: format!(
                    "Cell at {:?} holds a tile that points at {:?}",
                    cell.coord(),
                    tile.cell()
                ),
            }),
            Some(_) => {}
        }
    }

    // Every live tile sits on a cell that points back at it
    for &tile_id in board.live_tiles() {
        let Some(tile) = board.tile(tile_id) else {
            violations.push(InvariantViolation {
                message: format!("Live list holds discarded tile {tile_id:?}"),
            });
            continue;
        };

        match tile.cell() {
            None => violations.push(InvariantViolation {
                message: format!("Live tile {tile_id:?} is not on any cell"),
            }),
            Some(cell_id) if grid.cell(cell_id).occupant() != Some(tile_id) => {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile {tile_id:?} points at {:?} which holds {:?}",
                        grid.cell(cell_id).coord(),
                        grid.cell(cell_id).occupant()
                    ),
                });
            }
            Some(_) => {}
        }

        if tile.value() < 2 || !tile.value().is_power_of_two() {
            violations.push(InvariantViolation {
                message: format!("Tile {tile_id:?} has value {}", tile.value()),
            });
        }
    }

    // Tile count matches occupancy
    if board.tile_count() != occupied {
        violations.push(InvariantViolation {
            message: format!(
                "{} live tiles but {} occupied cells",
                board.tile_count(),
                occupied
            ),
        });
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Coord;

    #[test]
    fn test_valid_board_passes() {
        let board = Board::from_values(3, 3, &[2, 0, 4, 0, 8, 0, 16, 0, 2]).unwrap();
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_empty_board_passes() {
        let board = Board::new(4, 4).unwrap();
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_one_sided_detach_detected() {
        let mut board = Board::from_values(2, 1, &[2, 4]).unwrap();
        let cell = board.grid().cell_at(Coord::new(0, 0)).unwrap();
        // Break the link on the cell side only
        board.grid_mut().cell_mut(cell).set_occupant(None);

        let violations = check_invariants(&board);
        assert!(!violations.is_empty());
        assert!(violations.iter().any(|v| v.message.contains("points at")));
        assert!(violations.iter().any(|v| v.message.contains("occupied cells")));
    }

    #[test]
    fn test_cell_pointing_at_wrong_tile_detected() {
        let mut board = Board::from_values(2, 1, &[2, 4]).unwrap();
        let left = board.grid().cell_at(Coord::new(0, 0)).unwrap();
        let right_tile = board.tile_id_at(Coord::new(1, 0)).unwrap();
        board.grid_mut().cell_mut(left).set_occupant(Some(right_tile));

        let violations = check_invariants(&board);
        assert!(violations.iter().any(|v| v.message.contains("Cell at")));
    }

    #[test]
    fn test_non_power_of_two_detected() {
        let board = Board::from_values(2, 1, &[3, 0]).unwrap();
        let violations = check_invariants(&board);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("value 3"));
    }

    #[test]
    #[should_panic(expected = "Board invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut board = Board::from_values(1, 1, &[2]).unwrap();
        let cell = board.grid().cell_at(Coord::new(0, 0)).unwrap();
        board.grid_mut().cell_mut(cell).set_occupant(None);
        assert_invariants(&board);
    }
}
