//! Stats CLI command for inspecting the trained pricing policy

use super::{train_pipeline, OutputFormat};
use anyhow::Result;
use clap::Args;
use farecast_core::{PriceAction, RideState};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Output format
    #[arg(long, short, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PolicyStats {
    episodes: usize,
    steps: usize,
    total_reward: f64,
    final_epsilon: f64,
    states_visited: usize,
    state_space_size: usize,
    mean_q_value: f64,
    /// How often each action is the greedy choice, in canonical action order
    action_distribution: Vec<ActionShare>,
}

#[derive(Serialize)]
struct ActionShare {
    action: &'static str,
    multiplier: f64,
    states: usize,
}

pub fn run(config: &farecast_core::AppConfig, args: StatsArgs) -> Result<()> {
    let pipeline = train_pipeline(config)?;

    let distribution = pipeline.policy.action_distribution();
    let stats = PolicyStats {
        episodes: pipeline.summary.episodes,
        steps: pipeline.summary.steps,
        total_reward: pipeline.summary.total_reward,
        final_epsilon: pipeline.summary.final_epsilon,
        states_visited: pipeline.policy.len(),
        state_space_size: RideState::state_space_size(),
        mean_q_value: pipeline.policy.mean_q_value(),
        action_distribution: PriceAction::all()
            .iter()
            .map(|action| ActionShare {
                action: action.as_str(),
                multiplier: action.multiplier(),
                states: distribution.get(action).copied().unwrap_or(0),
            })
            .collect(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => print_text(&stats),
    }

    Ok(())
}

fn print_text(stats: &PolicyStats) {
    println!("Training");
    println!("  episodes:      {}", stats.episodes);
    println!("  steps:         {}", stats.steps);
    println!("  total reward:  {:.2}", stats.total_reward);
    println!("  final epsilon: {:.4}", stats.final_epsilon);
    println!("Policy");
    println!(
        "  states visited: {} / {}",
        stats.states_visited, stats.state_space_size
    );
    println!("  mean Q-value:   {:.4}", stats.mean_q_value);
    println!("  greedy action distribution:");
    for share in &stats.action_distribution {
        println!(
            "    {:<8} ({:.1}x): {} states",
            share.action, share.multiplier, share.states
        );
    }
}
