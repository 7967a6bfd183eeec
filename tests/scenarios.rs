//! End-to-end move scenarios through the public API.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use tilemerge::engine::apply_move;
use tilemerge::{
    Board, Coord, Direction, GameConfig, GameState, MemoryHighScoreStore, Phase, ScoreSink,
    Scoreboard,
};

/// Records every merge notification.
#[derive(Debug, Default)]
struct MergeLog(Vec<u32>);

impl ScoreSink for MergeLog {
    fn on_merge(&mut self, new_value: u32) {
        self.0.push(new_value);
    }
}

fn board(width: u16, height: u16, values: &[u32]) -> Board {
    Board::from_values(width, height, values).unwrap()
}

#[test]
fn two_twos_merge_left_on_empty_4x4() {
    let mut game = GameState::new(
        GameConfig::default(),
        1,
        Scoreboard::new(MemoryHighScoreStore::default()),
    )
    .unwrap();
    game.place_tile(Coord::new(0, 0), 2).unwrap();
    game.place_tile(Coord::new(1, 0), 2).unwrap();

    assert!(game.apply_move(Direction::Left));

    assert_eq!(game.board().tile_count(), 1);
    let tile = game.board().tile_at(Coord::new(0, 0)).unwrap();
    assert_eq!(tile.value(), 4);
    assert_eq!(game.score_sink().score(), 4);
    assert_eq!(game.last_move().merges, 1);

    // Settling spawns exactly one new tile
    game.update(Duration::from_millis(99));
    assert_eq!(game.phase(), Phase::Settling);
    game.update(Duration::from_millis(1));
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.board().tile_count(), 2);
}

#[test]
fn row_of_four_twos_makes_two_fours() {
    let mut b = board(4, 1, &[2, 2, 2, 2]);
    let mut log = MergeLog::default();

    let outcome = apply_move(&mut b, Direction::Left, &mut log);

    assert!(outcome.changed);
    assert_eq!(outcome.merges, 2);
    assert_eq!(b.values(), vec![4, 4, 0, 0]);
    assert_eq!(log.0, vec![4, 4]);
}

#[test]
fn row_of_four_twos_right() {
    let mut b = board(4, 1, &[2, 2, 2, 2]);
    let outcome = apply_move(&mut b, Direction::Right, &mut MergeLog::default());
    assert_eq!(outcome.merges, 2);
    assert_eq!(b.values(), vec![0, 0, 4, 4]);
}

#[test]
fn merged_tile_does_not_merge_again_in_same_move() {
    // [4, 2, 2] left: the 2s make a 4, which must not then join the leading 4
    let mut b = board(3, 1, &[4, 2, 2]);
    let before = b.total_value();

    let outcome = apply_move(&mut b, Direction::Left, &mut MergeLog::default());

    assert_eq!(outcome.merges, 1);
    assert_eq!(b.values(), vec![4, 4, 0]);
    assert_eq!(b.total_value(), before);
}

#[test]
fn three_equal_in_a_column_merge_once() {
    let mut b = board(1, 3, &[2, 2, 2]);
    let outcome = apply_move(&mut b, Direction::Up, &mut MergeLog::default());
    assert_eq!(outcome.merges, 1);
    assert_eq!(b.values(), vec![4, 2, 0]);

    let mut b = board(1, 3, &[2, 2, 2]);
    let outcome = apply_move(&mut b, Direction::Down, &mut MergeLog::default());
    assert_eq!(outcome.merges, 1);
    assert_eq!(b.values(), vec![0, 2, 4]);
}

#[test]
fn full_board_without_merges_is_game_over() {
    #[rustfmt::skip]
    let dead = board(4, 4, &[
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 2, 4,
        4, 2, 4, 2,
    ]);
    assert!(dead.is_full());
    assert!(dead.is_game_over());

    for direction in Direction::ALL {
        let mut copy = dead.clone();
        let outcome = apply_move(&mut copy, direction, &mut MergeLog::default());
        assert!(!outcome.changed);
        assert_eq!(copy, dead);
    }
}

#[test]
fn full_board_with_one_pair_is_not_game_over() {
    #[rustfmt::skip]
    let live = board(4, 4, &[
        2, 4, 2, 4,
        4, 2, 4, 2,
        2, 4, 2, 4,
        4, 2, 4, 4,
    ]);
    assert!(live.is_full());
    assert!(!live.is_game_over());

    let mut copy = live.clone();
    assert!(apply_move(&mut copy, Direction::Left, &mut MergeLog::default()).changed);
}

#[test]
fn board_with_a_gap_is_not_game_over() {
    let b = board(2, 2, &[2, 4, 4, 0]);
    assert!(!b.is_game_over());
}

#[test]
fn no_op_move_leaves_board_identical() {
    let mut b = board(3, 3, &[2, 4, 8, 0, 0, 0, 0, 0, 0]);
    let before = b.clone();

    let outcome = apply_move(&mut b, Direction::Up, &mut MergeLog::default());

    assert!(!outcome.changed);
    assert_eq!(outcome.merges, 0);
    assert_eq!(b, before);
}

#[test]
fn game_played_to_the_end_keeps_best_score() {
    let config = GameConfig {
        settle_delay: 0.0,
        ..GameConfig::default()
    };
    let mut game = GameState::new(config, 99, Scoreboard::new(MemoryHighScoreStore::default()))
        .unwrap();
    game.new_game();

    'play: while game.phase() != Phase::GameOver {
        for direction in [Direction::Down, Direction::Left, Direction::Right, Direction::Up] {
            if game.apply_move(direction) {
                game.update(Duration::ZERO);
                continue 'play;
            }
        }
        panic!("no direction changed a board that is not game over");
    }

    assert!(game.is_game_over());
    assert!(game.board().is_full());
    assert!(game.score_sink().score() > 0);
    assert_eq!(game.score_sink().best(), game.score_sink().score());

    let best = game.score_sink().best();
    game.new_game();
    assert_eq!(game.score_sink().score(), 0);
    assert_eq!(game.score_sink().best(), best);
}
