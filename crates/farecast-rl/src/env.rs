//! Episodic pricing environment.
//!
//! Replays the historical dataset row by row as a deterministic sequence of
//! (state, reward) transitions. Each episode walks every row exactly once in
//! row order; the same sequence is replayed identically across episodes.

use crate::error::{Result, RlError};
use farecast_core::{PriceAction, RideSample, RideState};

/// Historical costs already include the platform markup; dividing by this
/// constant recovers a base-cost proxy for the reward signal.
pub const HISTORICAL_MARKUP: f64 = 1.2;

/// Rewards are clamped to this magnitude to avoid runaway Q-updates
pub const REWARD_CLAMP: f64 = 50.0;

/// Result of a single environment step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State under the advanced cursor; `None` exactly when the episode ended
    pub next_state: Option<RideState>,
    /// Clamped revenue delta for the chosen multiplier
    pub reward: f64,
    pub done: bool,
}

/// Deterministic replay of the dataset as an MDP-like episode.
///
/// The backing samples are read-only; the only mutable state is the row
/// cursor and the termination flag.
pub struct DynamicPricingEnv {
    samples: Vec<RideSample>,
    cursor: usize,
    done: bool,
}

impl DynamicPricingEnv {
    /// Create an environment over a non-empty sample set.
    ///
    /// An empty dataset is a contract violation: training over it would
    /// silently run zero-length episodes, so it is rejected here.
    pub fn new(samples: Vec<RideSample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(RlError::EmptyDataset);
        }
        Ok(Self {
            samples,
            cursor: 0,
            done: false,
        })
    }

    /// Number of rows in one episode
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Restart the episode: cursor back to row 0, termination flag cleared.
    ///
    /// Returns the initial state. Callable repeatedly; every call restarts
    /// the same deterministic sequence.
    pub fn reset(&mut self) -> RideState {
        self.cursor = 0;
        self.done = false;
        self.samples[0].state
    }

    /// Apply one price action to the current row.
    ///
    /// Computes the reward for the row under the cursor, advances the
    /// cursor, and signals termination when the dataset is exhausted.
    /// Stepping a finished episode is a contract violation and fails
    /// explicitly rather than indexing out of bounds.
    pub fn step(&mut self, action: PriceAction) -> Result<Step> {
        if self.done {
            return Err(RlError::EpisodeFinished);
        }

        let row = &self.samples[self.cursor];
        let reward = compute_reward(row.historical_cost, action.multiplier());

        self.cursor += 1;
        if self.cursor >= self.samples.len() {
            self.done = true;
        }

        let next_state = if self.done {
            None
        } else {
            Some(self.samples[self.cursor].state)
        };

        Ok(Step {
            next_state,
            reward,
            done: self.done,
        })
    }
}

/// Reward = revenue minus base cost, clamped.
///
/// The base cost is the historical cost with the markup stripped; revenue is
/// that base scaled by the chosen multiplier.
fn compute_reward(historical_cost: f64, multiplier: f64) -> f64 {
    let base_cost = historical_cost / HISTORICAL_MARKUP;
    let revenue = base_cost * multiplier;
    (revenue - base_cost).clamp(-REWARD_CLAMP, REWARD_CLAMP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farecast_core::VehicleClass;

    fn sample(riders: u32, drivers: u32, cost: f64) -> RideSample {
        RideSample::new(
            RideState::from_inputs(riders, drivers, VehicleClass::Economy),
            cost,
        )
    }

    #[test]
    fn test_empty_dataset_rejected() {
        assert!(matches!(
            DynamicPricingEnv::new(Vec::new()),
            Err(RlError::EmptyDataset)
        ));
    }

    #[test]
    fn test_single_row_episode() {
        let mut env = DynamicPricingEnv::new(vec![sample(10, 5, 100.0)]).unwrap();

        let initial = env.reset();
        assert_eq!(
            initial,
            RideState::from_inputs(10, 5, VehicleClass::Economy)
        );

        let step = env.step(PriceAction::Hold).unwrap();
        assert!(step.done);
        assert_eq!(step.next_state, None);
    }

    #[test]
    fn test_step_after_done_fails() {
        let mut env = DynamicPricingEnv::new(vec![sample(10, 5, 100.0)]).unwrap();
        env.reset();
        env.step(PriceAction::Hold).unwrap();

        assert!(matches!(
            env.step(PriceAction::Hold),
            Err(RlError::EpisodeFinished)
        ));
    }

    #[test]
    fn test_reset_replays_identical_sequence() {
        let rows = vec![sample(10, 5, 100.0), sample(50, 20, 120.0)];
        let mut env = DynamicPricingEnv::new(rows).unwrap();

        let first = env.reset();
        let step = env.step(PriceAction::Discount).unwrap();

        let first_again = env.reset();
        let step_again = env.step(PriceAction::Discount).unwrap();

        assert_eq!(first, first_again);
        assert_eq!(step, step_again);
    }

    #[test]
    fn test_reward_computation() {
        // base = 100 / 1.2, reward = base * 0.8 - base = -base * 0.2
        let reward = compute_reward(100.0, 0.8);
        let base = 100.0 / 1.2;
        assert!((reward - (base * 0.8 - base)).abs() < 1e-9);

        // Hold is revenue-neutral
        assert_eq!(compute_reward(100.0, 1.0), 0.0);
    }

    #[test]
    fn test_reward_clamped() {
        for action in PriceAction::all() {
            let reward = compute_reward(1_000_000.0, action.multiplier());
            assert!((-REWARD_CLAMP..=REWARD_CLAMP).contains(&reward));
        }
        assert_eq!(compute_reward(1_000_000.0, 1.4), REWARD_CLAMP);
        assert_eq!(compute_reward(1_000_000.0, 0.8), -REWARD_CLAMP);
    }

    #[test]
    fn test_episode_walks_rows_in_order() {
        let rows = vec![
            sample(10, 5, 100.0),
            sample(50, 20, 120.0),
            sample(100, 40, 90.0),
        ];
        let mut env = DynamicPricingEnv::new(rows.clone()).unwrap();

        let mut states = vec![env.reset()];
        loop {
            let step = env.step(PriceAction::Hold).unwrap();
            match step.next_state {
                Some(s) => states.push(s),
                None => break,
            }
        }

        let expected: Vec<RideState> = rows.iter().map(|r| r.state).collect();
        assert_eq!(states, expected);
    }
}
