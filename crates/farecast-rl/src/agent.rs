//! Tabular Q-learning agent.
//!
//! Epsilon-greedy action selection over an explicit Q-table, updated with
//! the standard temporal-difference rule. The RNG is owned and seedable so
//! identical runs reproduce identical tables.

use crate::policy::PricePolicy;
use crate::q_table::QTable;
use farecast_core::{PriceAction, RideState, TrainingConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Q-learning agent over discretized ride states
pub struct QLearningAgent {
    table: QTable,
    learning_rate: f64,
    discount: f64,
    epsilon: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent from hyperparameters and an explicit RNG seed
    pub fn new(config: &TrainingConfig, seed: u64) -> Self {
        Self {
            table: QTable::new(),
            learning_rate: config.learning_rate,
            discount: config.discount,
            epsilon: config.epsilon,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action for a state.
    ///
    /// With probability epsilon, a uniformly random action (exploration);
    /// otherwise the greedy action with ties broken by lowest index.
    pub fn act(&mut self, state: &RideState) -> PriceAction {
        if self.rng.gen::<f64>() < self.epsilon {
            let index = self.rng.gen_range(0..PriceAction::COUNT);
            PriceAction::all()[index]
        } else {
            self.table.best_action(*state)
        }
    }

    /// Apply the Q-learning update for one transition.
    ///
    /// target = reward for a terminal transition, otherwise
    /// reward + gamma * max_a' Q(next_state, a'). Both the current and the
    /// next state get zero-initialized vectors on first access.
    pub fn learn(
        &mut self,
        state: RideState,
        action: PriceAction,
        reward: f64,
        next_state: Option<RideState>,
    ) {
        let target = match next_state {
            Some(next) => reward + self.discount * self.table.max_value(next),
            None => reward,
        };

        let values = self.table.get_or_insert_default(state);
        let current = values[action.index()];
        values[action.index()] = current + self.learning_rate * (target - current);
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Multiply epsilon by a decay factor (applied once per episode)
    pub fn decay_epsilon(&mut self, factor: f64) {
        self.epsilon *= factor;
    }

    /// The learned table
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Freeze the learned table into a read-only serving policy
    pub fn into_policy(self) -> PricePolicy {
        PricePolicy::new(self.table.into_entries())
    }
}
