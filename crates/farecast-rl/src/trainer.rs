//! Training loop.
//!
//! Drives the agent through repeated full episodes over the environment,
//! decaying exploration once per episode. Runs for exactly the configured
//! number of episodes; there is no early stopping or convergence check, and
//! any step error aborts the whole run.

use crate::agent::QLearningAgent;
use crate::env::DynamicPricingEnv;
use crate::error::Result;
use farecast_core::TrainingConfig;
use tracing::{debug, info};

/// Aggregate counters from a completed training run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub steps: usize,
    pub total_reward: f64,
    pub final_epsilon: f64,
    pub states_visited: usize,
}

/// Train a fresh agent over the environment.
///
/// Update order is significant: episodes run in sequence and each episode
/// walks the dataset in row order, so the same config, seed, and dataset
/// always produce the same table.
pub fn train(
    env: &mut DynamicPricingEnv,
    config: &TrainingConfig,
) -> Result<(QLearningAgent, TrainingSummary)> {
    let mut agent = QLearningAgent::new(config, config.seed);
    let mut total_steps = 0;
    let mut total_reward = 0.0;

    for episode in 0..config.episodes {
        let mut state = env.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let action = agent.act(&state);
            let step = env.step(action)?;
            agent.learn(state, action, step.reward, step.next_state);

            episode_reward += step.reward;
            episode_steps += 1;

            match step.next_state {
                Some(next) => state = next,
                None => break,
            }
        }

        agent.decay_epsilon(config.epsilon_decay);
        total_steps += episode_steps;
        total_reward += episode_reward;

        debug!(
            episode = episode + 1,
            steps = episode_steps,
            reward = episode_reward,
            epsilon = agent.epsilon(),
            "Episode complete"
        );
    }

    let summary = TrainingSummary {
        episodes: config.episodes,
        steps: total_steps,
        total_reward,
        final_epsilon: agent.epsilon(),
        states_visited: agent.table().len(),
    };

    info!(
        episodes = summary.episodes,
        steps = summary.steps,
        states_visited = summary.states_visited,
        final_epsilon = summary.final_epsilon,
        "Training complete"
    );

    Ok((agent, summary))
}
