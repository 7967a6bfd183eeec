//! Benchmarks for the move engine and complete headless games.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tilemerge::autoplay::{AutoplayConfig, Policy, run_game};
use tilemerge::engine::apply_move;
use tilemerge::{Board, Direction, MemoryHighScoreStore, Scoreboard};

#[rustfmt::skip]
const CROWDED: [u32; 16] = [
    2, 2, 4, 4,
    8, 0, 8, 16,
    2, 4, 0, 4,
    32, 32, 2, 2,
];

fn bench_single_move(c: &mut Criterion) {
    let board = Board::from_values(4, 4, &CROWDED).unwrap();

    c.bench_function("move_4x4_all_directions", |b| {
        b.iter(|| {
            for direction in Direction::ALL {
                let mut copy = board.clone();
                let mut sink = Scoreboard::new(MemoryHighScoreStore::default());
                black_box(apply_move(&mut copy, black_box(direction), &mut sink));
            }
        });
    });
}

fn bench_full_game(c: &mut Criterion) {
    let random = AutoplayConfig::default();
    let corner = AutoplayConfig {
        policy: Policy::Corner,
        ..AutoplayConfig::default()
    };

    c.bench_function("game_4x4_random", |b| {
        b.iter(|| black_box(run_game(black_box(42), &random)));
    });

    c.bench_function("game_4x4_corner", |b| {
        b.iter(|| black_box(run_game(black_box(42), &corner)));
    });
}

criterion_group!(benches, bench_single_move, bench_full_game);
criterion_main!(benches);
