// In app/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strategies::StrategyRegistry;
use strategies::macd::MacdSeries;
use strategies::types::MacdSettings;
use tracing_subscriber::prelude::*;
mod runner;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "MACD divergence signals for forex candle data.")]
struct Cli {
    /// Directory holding `base.toml` and the per-environment overrides.
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a strategy over one or more candle files and prints the trades.
    Signals {
        /// The registered strategy to run.
        #[arg(short, long, default_value = "macd_divergence")]
        strategy: String,

        /// Candle JSON files, in the provider or flat chart format.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Prints the MACD series of a candle file, one JSON row per bar.
    Indicators {
        file: PathBuf,

        #[arg(long, default_value_t = 12)]
        fast_period: u32,

        #[arg(long, default_value_t = 26)]
        slow_period: u32,

        #[arg(long, default_value_t = 9)]
        signal_period: u32,
    },

    /// Lists the registered strategy names.
    Strategies,
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = match &cli.config_dir {
        Some(dir) => {
            let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
            app_config::load_settings_from(dir, &environment)
        }
        None => app_config::load_settings(),
    }
    .context("Failed to load application settings")?;

    // --- Tracing Setup ---
    // Logs go to stderr so stdout stays machine-readable.
    let parsed_level = parse_log_level(&settings.app.log_level);
    let level = parsed_level.unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    if parsed_level.is_none() {
        tracing::warn!(log_level = %settings.app.log_level, "Unrecognized app.log_level; falling back to info.");
    }

    tracing::info!(environment = %settings.app.environment, "Starting forex-signals");

    let registry = if settings.strategies.is_empty() {
        tracing::info!("No strategies configured; using the built-in defaults.");
        StrategyRegistry::with_defaults()
    } else {
        strategies::factory::build_registry(&settings.strategies)
            .context("Failed to build strategies from settings")?
    };

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Signals { strategy, files } => {
            handle_signals(&registry, &strategy, &files, settings.data.complete_only)?;
        }
        Commands::Indicators {
            file,
            fast_period,
            slow_period,
            signal_period,
        } => {
            let macd = MacdSettings { fast_period, slow_period, signal_period };
            handle_indicators(&file, &macd, settings.data.complete_only)?;
        }
        Commands::Strategies => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Handles the logic for the `signals` subcommand.
fn handle_signals(
    registry: &StrategyRegistry,
    strategy: &str,
    files: &[PathBuf],
    complete_only: bool,
) -> Result<()> {
    if !registry.contains(strategy) {
        let known: Vec<&str> = registry.names().collect();
        anyhow::bail!("Unknown strategy '{}'. Registered strategies: {:?}", strategy, known);
    }

    let results = runner::run_files(registry, strategy, files, complete_only);

    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => println!("{}", serde_json::to_string(&report)?),
            Err(e) => {
                failed += 1;
                tracing::error!(error = ?e, "A candle file could not be processed.");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} candle files failed", failed, files.len());
    }
    Ok(())
}

/// Handles the logic for the `indicators` subcommand.
fn handle_indicators(file: &PathBuf, settings: &MacdSettings, complete_only: bool) -> Result<()> {
    let mut set = market_data::load_candles(file)
        .with_context(|| format!("Failed to load candles from {}", file.display()))?;
    if complete_only {
        set = set.complete_only();
    }

    let series = MacdSeries::from_candles(&set.candles, settings)?;
    for row in series.rows() {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

/// Parses `app.log_level`, ignoring case and surrounding whitespace.
fn parse_log_level(raw: &str) -> Option<tracing::Level> {
    raw.trim().parse::<tracing::Level>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_parse_case_insensitively() {
        assert_eq!(parse_log_level("debug"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level(" WARN "), Some(tracing::Level::WARN));
        assert_eq!(parse_log_level("trace"), Some(tracing::Level::TRACE));
    }

    #[test]
    fn misspelled_log_level_is_reported() {
        assert_eq!(parse_log_level("debgu"), None);
        assert_eq!(parse_log_level(""), None);
    }
}
