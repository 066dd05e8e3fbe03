// In app/src/runner.rs

use anyhow::{Context, Result};
use core_types::TradeInstruction;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use strategies::StrategyRegistry;

/// The outcome of running one strategy over one candle file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub instrument: Option<String>,
    pub granularity: Option<String>,
    pub strategy: String,
    pub candles: usize,
    pub trades: Vec<TradeInstruction>,
}

/// Loads one candle file and runs `strategy` over it.
pub fn run_file(
    registry: &StrategyRegistry,
    strategy: &str,
    path: &Path,
    complete_only: bool,
) -> Result<FileReport> {
    let mut set = market_data::load_candles(path)
        .with_context(|| format!("Failed to load candles from {}", path.display()))?;
    if complete_only {
        set = set.complete_only();
    }

    let trades = registry
        .execute(strategy, &set.candles)
        .with_context(|| format!("Strategy '{}' failed on {}", strategy, path.display()))?;

    tracing::info!(file = %path.display(), candles = set.candles.len(), trades = trades.len(), "Processed candle file.");

    Ok(FileReport {
        file: path.display().to_string(),
        instrument: set.instrument.map(|i| i.0),
        granularity: set.granularity,
        strategy: strategy.to_string(),
        candles: set.candles.len(),
        trades,
    })
}

/// Runs `strategy` over every file in parallel. Each file is independent;
/// results come back in input order.
pub fn run_files(
    registry: &StrategyRegistry,
    strategy: &str,
    files: &[PathBuf],
    complete_only: bool,
) -> Vec<Result<FileReport>> {
    files
        .par_iter()
        .map(|path| run_file(registry, strategy, path, complete_only))
        .collect()
}
