//! CLI command implementations

pub mod predict;
pub mod stats;

use anyhow::{Context, Result};
use clap::ValueEnum;
use farecast_core::AppConfig;
use farecast_data::{load_rides, preprocess, to_samples, RideRecord};
use farecast_rl::{train, DynamicPricingEnv, PricePolicy, TrainingSummary};
use std::path::Path;

/// Output format shared by the commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Everything the commands need after the one-time training pass
pub struct TrainedPipeline {
    pub records: Vec<RideRecord>,
    pub policy: PricePolicy,
    pub summary: TrainingSummary,
}

/// Load, preprocess, and train once.
///
/// Training is a blocking batch computation; the resulting policy snapshot
/// is immutable and answers any number of lookups afterwards.
pub fn train_pipeline(config: &AppConfig) -> Result<TrainedPipeline> {
    let dataset_path = Path::new(&config.data.dataset_path);
    let raw = load_rides(dataset_path)
        .with_context(|| format!("Failed to load dataset from {}", dataset_path.display()))?;
    let records = preprocess(&raw).context("Failed to preprocess dataset")?;

    let samples = to_samples(&records);
    let mut env = DynamicPricingEnv::new(samples).context("Failed to build environment")?;
    let (agent, summary) = train(&mut env, &config.training).context("Training failed")?;

    Ok(TrainedPipeline {
        records,
        policy: agent.into_policy(),
        summary,
    })
}
