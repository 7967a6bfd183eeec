//! Output formatting utilities for CLI.

// Display statistics only; precision loss on huge game counts is acceptable
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use tilemerge::autoplay::BatchStats;

/// Max tiles whose reach rate is reported in text output.
const MILESTONES: [u32; 4] = [256, 512, 1024, 2048];

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total games played.
    games_played: u64,
    /// Mean final score.
    avg_score: f64,
    /// Best final score (null if no games).
    best_score: Option<u64>,
    /// Seed of the best game.
    best_seed: Option<u64>,
    /// Mean accepted moves per game.
    avg_moves: f64,
    /// Fraction of spawned tiles that were 4s.
    four_fraction: f64,
    /// Games per final max tile, ascending.
    max_tiles: Vec<JsonMaxTile>,
}

/// JSON-serializable histogram bucket.
#[derive(Debug, Serialize)]
pub(super) struct JsonMaxTile {
    /// Max tile value.
    tile: u32,
    /// Games that ended with this max tile.
    games: u64,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            games_played: stats.games_played,
            avg_score: stats.mean_score(),
            best_score: stats.best.map(|(score, _)| score),
            best_seed: stats.best.map(|(_, seed)| seed),
            avg_moves: avg_moves(stats),
            four_fraction: stats.spawns.four_fraction(),
            max_tiles: stats
                .max_tiles
                .iter()
                .map(|(&tile, &games)| JsonMaxTile { tile, games })
                .collect(),
        }
    }
}

fn avg_moves(stats: &BatchStats) -> f64 {
    if stats.games_played == 0 {
        return 0.0;
    }
    stats.total_moves as f64 / stats.games_played as f64
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Simulation Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str(&format!("Average Score: {:.1}\n", stats.mean_score()));
    if let Some((score, seed)) = stats.best {
        output.push_str(&format!("Best Score:    {score} (seed {seed})\n"));
    }
    output.push_str(&format!("Average Moves: {:.0}\n", avg_moves(stats)));
    output.push_str(&format!(
        "Four Tiles:    {:.2}% of spawns\n\n",
        stats.spawns.four_fraction() * 100.0
    ));

    output.push_str("Max Tile Distribution:\n");
    for (tile, games) in &stats.max_tiles {
        let pct = if stats.games_played == 0 {
            0.0
        } else {
            *games as f64 / stats.games_played as f64 * 100.0
        };
        output.push_str(&format!("  {tile:>6}: {games} ({pct:.1}%)\n"));
    }

    output.push_str("\nReached:\n");
    for tile in MILESTONES {
        output.push_str(&format!("  {tile:>6}: {:.1}%\n", stats.reach_rate(tile) * 100.0));
    }

    output
}

/// Format the max-tile histogram as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("max_tile,games,fraction\n");

    // Data rows
    for (tile, games) in &stats.max_tiles {
        let fraction = if stats.games_played == 0 {
            0.0
        } else {
            *games as f64 / stats.games_played as f64
        };
        output.push_str(&format!("{tile},{games},{fraction:.4}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge::autoplay::GameResult;
    use tilemerge::engine::SpawnStats;

    fn sample_stats() -> BatchStats {
        let mut stats = BatchStats::default();
        for (seed, score, max_tile) in [(1, 1000, 128), (2, 3000, 256), (3, 2000, 256)] {
            stats.add_result(&GameResult {
                seed,
                score,
                moves: 100,
                max_tile,
                game_over: true,
                spawns: SpawnStats { twos: 9, fours: 1 },
            });
        }
        stats
    }

    #[test]
    fn test_csv_rows() {
        let csv = format_batch_csv(&sample_stats());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, ["max_tile,games,fraction", "128,1,0.3333", "256,2,0.6667"]);
    }

    #[test]
    fn test_text_mentions_best_seed() {
        let text = format_batch_text(&sample_stats());
        assert!(text.contains("Best Score:    3000 (seed 2)"));
        assert!(text.contains("Four Tiles:    10.00%"));
    }

    #[test]
    fn test_json_fields() {
        let json = serde_json::to_value(JsonBatchResult::from_stats(&sample_stats())).unwrap_or_default();
        assert_eq!(json["games_played"], 3);
        assert_eq!(json["best_score"], 3000);
        assert_eq!(json["max_tiles"][1]["tile"], 256);
    }
}
