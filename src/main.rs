//! Tilemerge CLI - play the puzzle in the terminal or run headless batches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Tilemerge - a sliding-tile merge puzzle
#[derive(Parser, Debug)]
#[command(name = "tilemerge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        #[command(flatten)]
        config: cli::ConfigArgs,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// High-score file (default: ~/.tilemerge/highscore.json)
        #[arg(long)]
        highscore: Option<PathBuf>,
    },

    /// Play many games headless and aggregate statistics
    Simulate {
        #[command(flatten)]
        config: cli::ConfigArgs,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Move selection policy
        #[arg(long, default_value = "random")]
        policy: cli::PolicyArg,

        /// Maximum moves per game (default: 100000)
        #[arg(short = 'm', long)]
        max_moves: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Show or reset the stored best score
    Best {
        /// High-score file (default: ~/.tilemerge/highscore.json)
        #[arg(long)]
        highscore: Option<PathBuf>,

        /// Reset the best score to zero
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            config,
            seed,
            highscore,
        } => cli::play::execute(&config, seed, highscore),

        Commands::Simulate {
            config,
            games,
            seed,
            threads,
            policy,
            max_moves,
            format,
            progress,
        } => cli::simulate::execute(
            &config, games, seed, threads, policy, max_moves, format, progress,
        ),

        Commands::Best { highscore, reset } => cli::best::execute(highscore, reset),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
