//! Simulate command implementation.

use super::output::{JsonBatchResult, format_batch_csv, format_batch_text};
use super::{CliError, ConfigArgs, PolicyArg, SimulateFormat, seed_or_clock};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Instant;
use tilemerge::autoplay::{AutoplayConfig, run_batch};

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the config is invalid or output fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    config: &ConfigArgs,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    policy: PolicyArg,
    max_moves: Option<u32>,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    let mut autoplay = AutoplayConfig {
        game: config.resolve()?,
        policy: policy.into(),
        ..AutoplayConfig::default()
    };
    if let Some(m) = max_moves {
        autoplay.max_moves = m;
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_clock(seed);
    info!("simulating {games} games from seed {base_seed} with {:?}", autoplay.policy);

    // Progress bar
    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        Some(ProgressBar::new(games).with_style(style))
    } else {
        None
    };

    let start = Instant::now();

    let stats = run_batch(base_seed, games, &autoplay, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        SimulateFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBatchResult::from_stats(&stats))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SimulateFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
