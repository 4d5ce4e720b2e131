//! Predict CLI command implementation

use super::{train_pipeline, OutputFormat};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use farecast_core::{RideState, VehicleClass};
use farecast_pricing::estimate_base_price;
use farecast_rl::Recommendation;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Current number of riders requesting trips (demand)
    #[arg(long)]
    pub riders: u32,

    /// Current number of available drivers (supply)
    #[arg(long)]
    pub drivers: u32,

    /// Vehicle class for the ride
    #[arg(long, value_enum)]
    pub vehicle: VehicleArg,

    /// Expected ride duration in minutes
    #[arg(long)]
    pub duration: u32,

    /// Base price override; skips the historical estimator
    #[arg(long)]
    pub historical_cost: Option<f64>,

    /// Output format
    #[arg(long, short, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VehicleArg {
    Economy,
    Premium,
    Luxury,
}

impl From<VehicleArg> for VehicleClass {
    fn from(v: VehicleArg) -> Self {
        match v {
            VehicleArg::Economy => VehicleClass::Economy,
            VehicleArg::Premium => VehicleClass::Premium,
            VehicleArg::Luxury => VehicleClass::Luxury,
        }
    }
}

#[derive(Serialize)]
struct Prediction {
    state: RideState,
    base_price: f64,
    multiplier: f64,
    learned: bool,
    final_price: f64,
}

pub fn run(config: &farecast_core::AppConfig, args: PredictArgs) -> Result<()> {
    let pipeline = train_pipeline(config)?;
    let vehicle = VehicleClass::from(args.vehicle);

    let base_price = match args.historical_cost {
        Some(cost) => cost,
        None => estimate_base_price(&pipeline.records, vehicle, args.duration, &config.pricing)
            .context("Failed to estimate a base price")?,
    };

    let state = RideState::from_inputs(args.riders, args.drivers, vehicle);
    let recommendation = pipeline.policy.recommend(&state);
    if let Recommendation::Unseen = recommendation {
        info!(%state, "State not seen during training; applying neutral multiplier");
    }

    let multiplier = recommendation.multiplier();
    let prediction = Prediction {
        state,
        base_price,
        multiplier,
        learned: recommendation.is_learned(),
        final_price: base_price * multiplier,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&prediction)?),
        OutputFormat::Text => print_text(&prediction),
    }

    Ok(())
}

fn print_text(prediction: &Prediction) {
    println!("State:       {}", prediction.state);
    println!("Base price:  {:.2}", prediction.base_price);
    if prediction.learned {
        println!("Multiplier:  {:.2}x", prediction.multiplier);
    } else {
        println!(
            "Multiplier:  {:.2}x (state unseen in training, neutral fallback)",
            prediction.multiplier
        );
    }
    println!("Final price: {:.2}", prediction.final_price);
}
