//! Headless game runner.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`
//!
//! Each game owns its own [`GameState`], so batches can run in parallel with
//! rayon without sharing anything between workers. Settle delays are skipped:
//! every accepted move is settled immediately.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;

use crate::config::GameConfig;
use crate::engine::{Direction, GameState, Phase, SpawnStats};
use crate::error::ConfigError;
use crate::score::{MemoryHighScoreStore, Scoreboard};

/// Salt mixed into the game seed for the policy's own RNG.
const POLICY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// How the runner chooses moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Try the four directions in a fresh random order each move.
    Random,
    /// Prefer down, then left, then right, then up.
    Corner,
}

impl Policy {
    const CORNER_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    fn order(self, rng: &mut StdRng) -> [Direction; 4] {
        match self {
            Policy::Random => {
                let mut order = Direction::ALL;
                order.shuffle(rng);
                order
            }
            Policy::Corner => Self::CORNER_ORDER,
        }
    }
}

/// Configuration for headless runs.
#[derive(Debug, Clone, Copy)]
pub struct AutoplayConfig {
    /// Board and spawn options.
    pub game: GameConfig,
    /// Move selection policy.
    pub policy: Policy,
    /// Stop after this many accepted moves even if the game is not over.
    pub max_moves: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            policy: Policy::Random,
            max_moves: 100_000,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// Seed the game was played with.
    pub seed: u64,
    /// Final score.
    pub score: u64,
    /// Accepted moves.
    pub moves: u32,
    /// Largest tile on the final board.
    pub max_tile: u32,
    /// Whether the game ended in game over (false if the move cap hit first).
    pub game_over: bool,
    /// Spawned tile counts.
    pub spawns: SpawnStats,
}

/// Play a single game to completion.
///
/// # Errors
///
/// Returns an error if the game configuration is invalid.
pub fn run_game(seed: u64, config: &AutoplayConfig) -> Result<GameResult, ConfigError> {
    let mut state = GameState::new(
        config.game,
        seed,
        Scoreboard::new(MemoryHighScoreStore::default()),
    )?;
    let mut policy_rng = StdRng::seed_from_u64(seed ^ POLICY_SEED_SALT);
    let mut moves = 0u32;

    state.new_game();

    while state.phase() != Phase::GameOver && moves < config.max_moves {
        let accepted = config
            .policy
            .order(&mut policy_rng)
            .into_iter()
            .any(|direction| state.apply_move(direction));

        if !accepted {
            break;
        }

        state.settle_now();
        moves += 1;
    }

    Ok(GameResult {
        seed,
        score: state.score_sink().score(),
        moves,
        max_tile: state.board().max_value(),
        game_over: state.phase() == Phase::GameOver,
        spawns: state.spawn_stats(),
    })
}

/// Aggregate statistics over many games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    /// Games completed.
    pub games_played: u64,
    /// Sum of final scores.
    pub total_score: u64,
    /// Best final score (and the seed that produced it).
    pub best: Option<(u64, u64)>,
    /// Number of games per final max tile.
    pub max_tiles: BTreeMap<u32, u64>,
    /// Total accepted moves.
    pub total_moves: u64,
    /// Spawn counts over all games.
    pub spawns: SpawnStats,
}

impl BatchStats {
    /// Fold one game result in.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_score += result.score;
        self.total_moves += u64::from(result.moves);
        *self.max_tiles.entry(result.max_tile).or_insert(0) += 1;
        self.spawns.merge(&result.spawns);

        if self.best.is_none_or(|(score, _)| result.score > score) {
            self.best = Some((result.score, result.seed));
        }
    }

    /// Combine another partial aggregate into this one.
    pub fn merge(&mut self, other: &BatchStats) {
        self.games_played += other.games_played;
        self.total_score += other.total_score;
        self.total_moves += other.total_moves;
        for (&tile, &count) in &other.max_tiles {
            *self.max_tiles.entry(tile).or_insert(0) += count;
        }
        self.spawns.merge(&other.spawns);

        if let Some((score, seed)) = other.best
            && self.best.is_none_or(|(best, _)| score > best)
        {
            self.best = Some((score, seed));
        }
    }

    /// Mean final score (0.0 when no games were played).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }

    /// Fraction of games whose max tile reached at least `value`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reach_rate(&self, value: u32) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let reached: u64 = self.max_tiles.range(value..).map(|(_, &count)| count).sum();
        reached as f64 / self.games_played as f64
    }
}

/// Play `games` games with seeds `base_seed, base_seed + 1, ...` in parallel.
///
/// `on_game` is called once per finished game, from worker threads.
///
/// # Errors
///
/// Returns an error if the game configuration is invalid.
pub fn run_batch<F>(
    base_seed: u64,
    games: u64,
    config: &AutoplayConfig,
    on_game: F,
) -> Result<BatchStats, ConfigError>
where
    F: Fn(&GameResult) + Sync,
{
    config.game.validate()?;

    // Lock-free fold/reduce: each worker accumulates its own stats
    (0..games)
        .into_par_iter()
        .try_fold(BatchStats::default, |mut local, i| -> Result<_, ConfigError> {
            let result = run_game(base_seed.wrapping_add(i), config)?;
            on_game(&result);
            local.add_result(&result);
            Ok(local)
        })
        .try_reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })
}
