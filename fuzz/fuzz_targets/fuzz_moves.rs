#![no_main]

//! Move sequence fuzzer.
//!
//! Builds an arbitrary board, then plays an arbitrary sequence of moves,
//! each followed by a settle. After every step it checks:
//! 1. Cell/tile links are consistent
//! 2. Tile count drops by exactly the number of merges
//! 3. Total value is conserved by the move itself
//! 4. No tile is left locked after settling

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilemerge::engine::check_invariants;
use tilemerge::{Board, Direction, GameConfig, GameState, MemoryHighScoreStore, Phase, Scoreboard};

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    width: u8,
    height: u8,
    /// Tile exponents, row-major; 0 is an empty cell.
    cells: Vec<u8>,
    moves: Vec<u8>,
    seed: u64,
}

fuzz_target!(|input: MovesInput| {
    let width = u16::from(input.width % 8) + 1;
    let height = u16::from(input.height % 8) + 1;
    let size = usize::from(width) * usize::from(height);

    let values: Vec<u32> = (0..size)
        .map(|i| match input.cells.get(i).map(|e| e % 12) {
            None | Some(0) => 0,
            Some(e) => 1u32 << e,
        })
        .collect();

    let Some(board) = Board::from_values(width, height, &values) else {
        return;
    };

    let Ok(mut game) = GameState::from_board(
        GameConfig::default(),
        board,
        input.seed,
        Scoreboard::new(MemoryHighScoreStore::default()),
    ) else {
        return;
    };

    for &m in input.moves.iter().take(256) {
        let Some(direction) = Direction::from_u8(m % 4) else {
            continue;
        };

        let count = game.board().tile_count();
        let total = game.board().total_value();

        if game.apply_move(direction) {
            let outcome = game.last_move();
            assert_eq!(game.board().tile_count() + outcome.merges as usize, count);
            assert_eq!(game.board().total_value(), total);
            game.settle_now();
        }

        let violations = check_invariants(game.board());
        assert!(violations.is_empty(), "invariant violations: {violations:?}");

        let board = game.board();
        assert!(board.live_tiles().iter().all(|&id| board.tile(id).is_some_and(|t| !t.is_locked())));

        if game.phase() == Phase::GameOver {
            assert!(game.is_game_over());
            break;
        }
    }
});
