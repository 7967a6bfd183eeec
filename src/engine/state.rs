//! Game state management.
//!
//! A move runs `Idle -> Moving -> Settling -> Idle` (or `GameOver`). The
//! board is mutated synchronously inside [`GameState::apply_move`]; the only
//! suspension point is the settle delay, advanced by [`GameState::update`]
//! on the caller's frame tick. Input arriving outside `Idle` is dropped.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::engine::{
    Board, Coord, Direction, MoveOutcome, SettleTimer, TileId, apply_move, assert_invariants,
};
use crate::error::ConfigError;
use crate::score::ScoreSink;

/// Phase of the move state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for directional input.
    Idle,
    /// The board is being mutated by a move.
    Moving,
    /// A move changed the board; waiting for the settle delay.
    Settling,
    /// The board is full with no merges left.
    GameOver,
}

/// Counts of spawned tile values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnStats {
    /// Tiles spawned with value 2.
    pub twos: u64,
    /// Tiles spawned with value 4.
    pub fours: u64,
}

impl SpawnStats {
    /// Total tiles spawned.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.twos + self.fours
    }

    /// Fraction of spawned tiles that were 4s (0.0 when nothing spawned).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn four_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.fours as f64 / total as f64
        }
    }

    /// Add another set of counts into this one.
    pub fn merge(&mut self, other: &SpawnStats) {
        self.twos += other.twos;
        self.fours += other.fours;
    }
}

/// Complete game state: board, randomness, score sink and move phase.
#[derive(Debug, Clone)]
pub struct GameState<S> {
    config: GameConfig,
    board: Board,
    rng: StdRng,
    phase: Phase,
    settle: SettleTimer,
    sink: S,
    spawns: SpawnStats,
    last_move: MoveOutcome,
    moves: u64,
}

impl<S: ScoreSink> GameState<S> {
    /// Create a game with an empty board.
    ///
    /// Call [`new_game`](Self::new_game) to place the opening tiles.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: GameConfig, seed: u64, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height).ok_or(ConfigError::ZeroDimension {
            width: config.width,
            height: config.height,
        })?;
        Ok(Self::assemble(config, board, seed, sink))
    }

    /// Create a game around an existing board.
    ///
    /// The board's dimensions override `config.width`/`config.height`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn from_board(
        mut config: GameConfig,
        board: Board,
        seed: u64,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.width = board.width();
        config.height = board.height();
        config.validate()?;

        let mut state = Self::assemble(config, board, seed, sink);
        if state.board.is_game_over() {
            state.phase = Phase::GameOver;
        }
        Ok(state)
    }

    fn assemble(config: GameConfig, board: Board, seed: u64, sink: S) -> Self {
        Self {
            settle: SettleTimer::new(config.settle_duration()),
            config,
            board,
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::Idle,
            sink,
            spawns: SpawnStats::default(),
            last_move: MoveOutcome::default(),
            moves: 0,
        }
    }

    /// Start over: reset the score sink, clear the board and spawn two tiles.
    ///
    /// Any pending settle is discarded along with the board it belonged to.
    pub fn new_game(&mut self) {
        self.settle.reset();
        self.sink.on_new_game();
        self.board.clear();
        self.spawns = SpawnStats::default();
        self.last_move = MoveOutcome::default();
        self.moves = 0;

        self.spawn_tile();
        self.spawn_tile();

        self.phase = if self.board.is_game_over() {
            Phase::GameOver
        } else {
            Phase::Idle
        };
    }

    /// Slide all tiles toward `direction`.
    ///
    /// Returns whether the board changed. Input outside [`Phase::Idle`] is
    /// dropped and reports `false`.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Idle {
            debug!("dropping {direction:?} input while {:?}", self.phase);
            return false;
        }

        self.phase = Phase::Moving;
        let outcome = apply_move(&mut self.board, direction, &mut self.sink);
        assert_invariants(&self.board);
        self.last_move = outcome;

        if outcome.changed {
            self.moves += 1;
            self.phase = Phase::Settling;
            self.settle.schedule();
            debug!(
                "move {direction:?}: {} merges, {} points",
                outcome.merges, outcome.points
            );
        } else {
            self.phase = Phase::Idle;
        }

        outcome.changed
    }

    /// Advance the settle timer by one frame of `dt`.
    pub fn update(&mut self, dt: Duration) {
        if self.phase == Phase::Settling && self.settle.advance(dt) {
            self.finish_settle();
        }
    }

    /// Complete a pending settle immediately, as if the delay had elapsed.
    pub fn settle_now(&mut self) {
        if self.phase == Phase::Settling {
            self.settle.reset();
            self.finish_settle();
        }
    }

    fn finish_settle(&mut self) {
        self.board.unlock_all();

        if !self.board.is_full() {
            self.spawn_tile();
        }

        if self.board.is_game_over() {
            self.phase = Phase::GameOver;
            info!(
                "game over after {} moves, max tile {}",
                self.moves,
                self.board.max_value()
            );
        } else {
            self.phase = Phase::Idle;
        }
    }

    /// Spawn a 2 (or a 4 with the configured probability) on a random empty
    /// cell.
    ///
    /// On a full board this logs a warning and does nothing.
    pub fn spawn_tile(&mut self) -> Option<TileId> {
        let Some(cell) = self.board.grid().random_empty_cell(&mut self.rng) else {
            warn!("spawn requested on a full board");
            return None;
        };

        let value = if self.rng.random_bool(self.config.four_tile_probability) {
            self.spawns.fours += 1;
            4
        } else {
            self.spawns.twos += 1;
            2
        };

        self.board.place_in(cell, value)
    }

    /// Place a tile with an explicit value, e.g. to set up a position.
    ///
    /// Returns `None` if the coordinate is outside the board, occupied, or
    /// `value` is not a power of two of at least 2.
    pub fn place_tile(&mut self, coord: Coord, value: u32) -> Option<TileId> {
        self.board.place(coord, value)
    }

    /// Remove every tile from the board and return to [`Phase::Idle`].
    ///
    /// A pending settle is dropped along with the tiles it would have unlocked.
    pub fn clear_board(&mut self) {
        self.settle.reset();
        self.board.clear();
        self.phase = Phase::Idle;
    }

    /// True iff the board is full and no adjacent pair can merge.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }
}

impl<S> GameState<S> {
    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current state machine phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a move is in progress (moving or settling).
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.phase, Phase::Moving | Phase::Settling)
    }

    /// Time left before a pending settle completes.
    #[must_use]
    pub fn settle_remaining(&self) -> Option<Duration> {
        self.settle.remaining()
    }

    /// The injected score sink.
    #[must_use]
    pub const fn score_sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the injected score sink.
    pub fn score_sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Spawn counts since the last [`new_game`](GameState::new_game).
    #[must_use]
    pub const fn spawn_stats(&self) -> SpawnStats {
        self.spawns
    }

    /// Outcome of the most recent accepted move.
    #[must_use]
    pub const fn last_move(&self) -> MoveOutcome {
        self.last_move
    }

    /// Number of moves that changed the board this game.
    #[must_use]
    pub const fn moves_made(&self) -> u64 {
        self.moves
    }
}
