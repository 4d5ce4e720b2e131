//! Farecast - Hybrid Ride Price Recommendation
//!
//! Combines a historical base-price estimate with a Q-learning-derived
//! multiplier to recommend a ride price.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use farecast_core::AppConfig;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

mod commands;
mod logging;

use commands::predict::PredictArgs;
use commands::stats::StatsArgs;
use logging::{init_logging, LogFormat};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "farecast", version, about = "Ride price recommendation from historical data and Q-learning")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend a price for a ride
    Predict(PredictArgs),
    /// Train and report policy statistics
    Stats(StatsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, Level::INFO);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Predict(args) => commands::predict::run(&config, args),
        Command::Stats(args) => commands::stats::run(&config, args),
    }
}

/// Load configuration: an explicit `--config` path must exist; otherwise the
/// env-var or default path is used when present, falling back to defaults.
fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let path = std::env::var("FARECAST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        AppConfig::load(Path::new(&path))
            .with_context(|| format!("Failed to load config from {}", path))
    } else {
        info!("Config file not found, using defaults");
        Ok(AppConfig::default())
    }
}
