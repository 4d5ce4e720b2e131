//! Action-value table.
//!
//! An explicit mapping from ride state to a fixed-length Q-vector indexed by
//! the canonical action ordering. Entries are created lazily on first access
//! through [`QTable::get_or_insert_default`] rather than by an implicit
//! default-valued map, so "seen" states are always enumerable.

use farecast_core::{PriceAction, RideState};
use std::collections::HashMap;

/// Q-vector: one value per action, in `PriceAction::all()` order
pub type QValues = [f64; PriceAction::COUNT];

/// State -> action-value mapping with lazy zero-initialized entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    entries: HashMap<RideState, QValues>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only lookup; never creates an entry
    pub fn get(&self, state: &RideState) -> Option<&QValues> {
        self.entries.get(state)
    }

    /// Q-vector for a state, creating an all-zero vector on first access
    pub fn get_or_insert_default(&mut self, state: RideState) -> &mut QValues {
        self.entries
            .entry(state)
            .or_insert([0.0; PriceAction::COUNT])
    }

    /// Maximum action value for a state, creating its entry if unseen.
    ///
    /// Used for the bootstrap target max_a' Q(s',a'); a fresh state yields 0.
    pub fn max_value(&mut self, state: RideState) -> f64 {
        let values = self.get_or_insert_default(state);
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state, ties broken by lowest index.
    ///
    /// The first strict maximum wins, so the result is deterministic for a
    /// given table regardless of map iteration order.
    pub fn best_action(&mut self, state: RideState) -> PriceAction {
        let values = self.get_or_insert_default(state);
        let mut best = 0;
        for (i, value) in values.iter().enumerate() {
            if *value > values[best] {
                best = i;
            }
        }
        PriceAction::from_index(best).unwrap_or(PriceAction::Hold)
    }

    /// Number of states seen so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RideState, &QValues)> {
        self.entries.iter()
    }

    /// Consume the table into its backing map (for the policy snapshot)
    pub fn into_entries(self) -> HashMap<RideState, QValues> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farecast_core::{DemandLevel, LoyaltyTier, SupplyLevel};

    fn state() -> RideState {
        RideState::new(DemandLevel::Low, SupplyLevel::Low, LoyaltyTier::Regular)
    }

    #[test]
    fn test_lazy_zero_initialization() {
        let mut table = QTable::new();
        assert!(table.get(&state()).is_none());

        let values = table.get_or_insert_default(state());
        assert_eq!(*values, [0.0; PriceAction::COUNT]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_does_not_create_entries() {
        let table = QTable::new();
        assert!(table.get(&state()).is_none());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_max_value_of_unseen_state_is_zero() {
        let mut table = QTable::new();
        assert_eq!(table.max_value(state()), 0.0);
        // The access created the entry
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_best_action_ties_break_to_lowest_index() {
        let mut table = QTable::new();

        // All zeros: lowest index wins
        assert_eq!(table.best_action(state()), PriceAction::Discount);

        // Two-way tie at the maximum: the earlier action wins
        let values = table.get_or_insert_default(state());
        *values = [1.0, 5.0, 5.0, 0.0];
        assert_eq!(table.best_action(state()), PriceAction::Hold);
    }

    #[test]
    fn test_best_action_picks_maximum() {
        let mut table = QTable::new();
        let values = table.get_or_insert_default(state());
        *values = [-1.0, 0.5, 3.0, 2.0];
        assert_eq!(table.best_action(state()), PriceAction::Raise);
    }
}
