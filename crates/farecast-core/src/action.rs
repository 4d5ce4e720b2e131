//! Price actions available to the agent.
//!
//! The action list is fixed for the lifetime of the system: four multipliers
//! applied to the base price. Environment, agent, and serving layer all index
//! Q-vectors by the ordering of [`PriceAction::all`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete price adjustment, one of four fixed multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceAction {
    /// 0.8x - undercut the base price
    Discount,
    /// 1.0x - charge the base price
    Hold,
    /// 1.2x - moderate increase
    Raise,
    /// 1.4x - maximum increase
    Surge,
}

impl PriceAction {
    /// Number of actions; Q-vectors have exactly this length
    pub const COUNT: usize = 4;

    /// The canonical ordered action list
    pub fn all() -> &'static [PriceAction; Self::COUNT] {
        &[
            PriceAction::Discount,
            PriceAction::Hold,
            PriceAction::Raise,
            PriceAction::Surge,
        ]
    }

    /// The price multiplier this action applies
    pub fn multiplier(&self) -> f64 {
        match self {
            PriceAction::Discount => 0.8,
            PriceAction::Hold => 1.0,
            PriceAction::Raise => 1.2,
            PriceAction::Surge => 1.4,
        }
    }

    /// Position of this action in the canonical ordering
    pub fn index(&self) -> usize {
        match self {
            PriceAction::Discount => 0,
            PriceAction::Hold => 1,
            PriceAction::Raise => 2,
            PriceAction::Surge => 3,
        }
    }

    /// Action at the given index, `None` when out of range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceAction::Discount => "discount",
            PriceAction::Hold => "hold",
            PriceAction::Raise => "raise",
            PriceAction::Surge => "surge",
        }
    }
}

impl fmt::Display for PriceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
