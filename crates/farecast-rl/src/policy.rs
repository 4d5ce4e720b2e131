//! Frozen serving policy.
//!
//! After training, the agent's Q-table is frozen into a read-only snapshot.
//! Lookups never mutate the table, so post-training prediction requests need
//! no synchronization. An unseen state is a defined, recoverable condition
//! reported as [`Recommendation::Unseen`], never a crash.

use crate::q_table::QValues;
use farecast_core::{PriceAction, RideState};
use std::collections::HashMap;

/// Fallback multiplier applied when a queried state was never visited
/// during training
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Outcome of a policy lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    /// The state was seen during training; apply the greedy action
    Learned(PriceAction),
    /// The state never occurred in the dataset; apply the neutral multiplier
    Unseen,
}

impl Recommendation {
    /// The price multiplier to apply
    pub fn multiplier(&self) -> f64 {
        match self {
            Recommendation::Learned(action) => action.multiplier(),
            Recommendation::Unseen => NEUTRAL_MULTIPLIER,
        }
    }

    pub fn is_learned(&self) -> bool {
        matches!(self, Recommendation::Learned(_))
    }
}

/// Immutable snapshot of a trained Q-table
#[derive(Debug, Clone, PartialEq)]
pub struct PricePolicy {
    table: HashMap<RideState, QValues>,
}

impl PricePolicy {
    pub fn new(table: HashMap<RideState, QValues>) -> Self {
        Self { table }
    }

    /// Action-value vector for a state, `None` when the state is unseen
    pub fn action_values(&self, state: &RideState) -> Option<&QValues> {
        self.table.get(state)
    }

    /// Recommend a multiplier for a state.
    ///
    /// Greedy over the learned Q-vector (ties to the lowest index), or the
    /// explicit unseen-state signal when the table has no entry.
    pub fn recommend(&self, state: &RideState) -> Recommendation {
        match self.table.get(state) {
            Some(values) => {
                let mut best = 0;
                for (i, value) in values.iter().enumerate() {
                    if *value > values[best] {
                        best = i;
                    }
                }
                Recommendation::Learned(
                    PriceAction::from_index(best).unwrap_or(PriceAction::Hold),
                )
            }
            None => Recommendation::Unseen,
        }
    }

    /// Number of states seen during training
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RideState, &QValues)> {
        self.table.iter()
    }

    /// How often each action is the greedy choice across seen states
    pub fn action_distribution(&self) -> HashMap<PriceAction, usize> {
        let mut distribution = HashMap::new();
        for state in self.table.keys() {
            if let Recommendation::Learned(action) = self.recommend(state) {
                *distribution.entry(action).or_insert(0) += 1;
            }
        }
        distribution
    }

    /// Mean Q-value across all seen state-action pairs
    pub fn mean_q_value(&self) -> f64 {
        let count = self.table.len() * PriceAction::COUNT;
        if count == 0 {
            return 0.0;
        }
        let total: f64 = self.table.values().flat_map(|v| v.iter()).sum();
        total / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farecast_core::{DemandLevel, LoyaltyTier, SupplyLevel};

    fn state() -> RideState {
        RideState::new(DemandLevel::Low, SupplyLevel::Low, LoyaltyTier::Regular)
    }

    fn other_state() -> RideState {
        RideState::new(DemandLevel::VeryHigh, SupplyLevel::Low, LoyaltyTier::Gold)
    }

    fn policy_with(values: QValues) -> PricePolicy {
        let mut table = HashMap::new();
        table.insert(state(), values);
        PricePolicy::new(table)
    }

    #[test]
    fn test_unseen_state_signals_fallback() {
        let policy = policy_with([0.0; 4]);

        let rec = policy.recommend(&other_state());
        assert_eq!(rec, Recommendation::Unseen);
        assert_eq!(rec.multiplier(), NEUTRAL_MULTIPLIER);
        assert!(policy.action_values(&other_state()).is_none());
    }

    #[test]
    fn test_learned_state_recommends_argmax() {
        let policy = policy_with([-1.0, 0.5, 3.0, 2.0]);

        let rec = policy.recommend(&state());
        assert_eq!(rec, Recommendation::Learned(PriceAction::Raise));
        assert_eq!(rec.multiplier(), 1.2);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        let policy = policy_with([2.0, 2.0, 1.0, 0.0]);
        assert_eq!(
            policy.recommend(&state()),
            Recommendation::Learned(PriceAction::Discount)
        );
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let policy = policy_with([1.0, 2.0, 3.0, 4.0]);

        let first = *policy.action_values(&state()).unwrap();
        let second = *policy.action_values(&state()).unwrap();
        assert_eq!(first, second);
        assert_eq!(policy.len(), 1);

        // Unseen lookups do not create entries either
        policy.recommend(&other_state());
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_action_distribution() {
        let mut table = HashMap::new();
        table.insert(state(), [5.0, 0.0, 0.0, 0.0]);
        table.insert(other_state(), [0.0, 0.0, 0.0, 5.0]);
        let policy = PricePolicy::new(table);

        let dist = policy.action_distribution();
        assert_eq!(dist.get(&PriceAction::Discount), Some(&1));
        assert_eq!(dist.get(&PriceAction::Surge), Some(&1));
        assert_eq!(dist.get(&PriceAction::Hold), None);
    }

    #[test]
    fn test_mean_q_value() {
        let policy = policy_with([1.0, 2.0, 3.0, 4.0]);
        assert!((policy.mean_q_value() - 2.5).abs() < 1e-12);
    }
}
