//! State discretization for the pricing Q-table.
//!
//! Maps raw ride inputs (rider count, driver count, vehicle class) into the
//! discrete state triple used as the Q-table key. Training rows and live
//! queries go through the same mapping, so both draw keys from the same
//! 4 x 3 x 3 state space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Demand bucket derived from the rider count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemandLevel {
    /// 30 riders or fewer
    Low,
    /// 31-60 riders
    Medium,
    /// 61-90 riders
    High,
    /// More than 90 riders
    VeryHigh,
}

impl DemandLevel {
    /// Bucket a rider count using the fixed thresholds
    pub fn from_rider_count(riders: u32) -> Self {
        if riders <= 30 {
            DemandLevel::Low
        } else if riders <= 60 {
            DemandLevel::Medium
        } else if riders <= 90 {
            DemandLevel::High
        } else {
            DemandLevel::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DemandLevel::Low => "low",
            DemandLevel::Medium => "medium",
            DemandLevel::High => "high",
            DemandLevel::VeryHigh => "very_high",
        }
    }
}

/// Supply bucket derived from the driver count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyLevel {
    /// 15 drivers or fewer
    Low,
    /// 16-30 drivers
    Medium,
    /// More than 30 drivers
    High,
}

impl SupplyLevel {
    /// Bucket a driver count using the fixed thresholds
    pub fn from_driver_count(drivers: u32) -> Self {
        if drivers <= 15 {
            SupplyLevel::Low
        } else if drivers <= 30 {
            SupplyLevel::Medium
        } else {
            SupplyLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyLevel::Low => "low",
            SupplyLevel::Medium => "medium",
            SupplyLevel::High => "high",
        }
    }
}

/// Customer loyalty tier, derived from the vehicle class as a proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoyaltyTier {
    Regular,
    Silver,
    Gold,
}

impl LoyaltyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoyaltyTier::Regular => "regular",
            LoyaltyTier::Silver => "silver",
            LoyaltyTier::Gold => "gold",
        }
    }
}

/// Vehicle class as it appears in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    Economy,
    Premium,
    Luxury,
}

impl VehicleClass {
    /// Numeric encoding used by the dataset (0/1/2)
    pub fn code(&self) -> u8 {
        match self {
            VehicleClass::Economy => 0,
            VehicleClass::Premium => 1,
            VehicleClass::Luxury => 2,
        }
    }

    /// Decode the dataset's numeric encoding
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(VehicleClass::Economy),
            1 => Some(VehicleClass::Premium),
            2 => Some(VehicleClass::Luxury),
            _ => None,
        }
    }

    /// Loyalty tier proxy: Economy -> Regular, Premium -> Silver, Luxury -> Gold
    pub fn loyalty_tier(&self) -> LoyaltyTier {
        match self {
            VehicleClass::Economy => LoyaltyTier::Regular,
            VehicleClass::Premium => LoyaltyTier::Silver,
            VehicleClass::Luxury => LoyaltyTier::Gold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Economy => "Economy",
            VehicleClass::Premium => "Premium",
            VehicleClass::Luxury => "Luxury",
        }
    }
}

impl FromStr for VehicleClass {
    type Err = String;

    /// Accepts the dataset's string labels and the numeric codes some
    /// exports use instead
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Economy" | "economy" | "0" => Ok(VehicleClass::Economy),
            "Premium" | "premium" | "1" => Ok(VehicleClass::Premium),
            "Luxury" | "luxury" | "2" => Ok(VehicleClass::Luxury),
            other => Err(format!("Invalid vehicle class: {}", other)),
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete state key for the Q-table.
///
/// A plain value triple: equality and hashing are all that matter, there is
/// no identity beyond the bucket values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideState {
    pub demand: DemandLevel,
    pub supply: SupplyLevel,
    pub loyalty: LoyaltyTier,
}

impl RideState {
    pub fn new(demand: DemandLevel, supply: SupplyLevel, loyalty: LoyaltyTier) -> Self {
        Self {
            demand,
            supply,
            loyalty,
        }
    }

    /// Discretize raw inputs into the canonical state triple.
    ///
    /// The single entry point for both historical rows and live queries.
    pub fn from_inputs(riders: u32, drivers: u32, vehicle: VehicleClass) -> Self {
        Self {
            demand: DemandLevel::from_rider_count(riders),
            supply: SupplyLevel::from_driver_count(drivers),
            loyalty: vehicle.loyalty_tier(),
        }
    }

    /// Total number of possible state combinations
    pub fn state_space_size() -> usize {
        4 * 3 * 3 // demand * supply * loyalty
    }
}

impl fmt::Display for RideState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.demand.as_str(),
            self.supply.as_str(),
            self.loyalty.as_str()
        )
    }
}

/// One training row: a discretized state plus the historical ride cost the
/// environment derives its reward from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RideSample {
    pub state: RideState,
    pub historical_cost: f64,
}

impl RideSample {
    pub fn new(state: RideState, historical_cost: f64) -> Self {
        Self {
            state,
            historical_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_thresholds() {
        assert_eq!(DemandLevel::from_rider_count(0), DemandLevel::Low);
        assert_eq!(DemandLevel::from_rider_count(30), DemandLevel::Low);
        assert_eq!(DemandLevel::from_rider_count(31), DemandLevel::Medium);
        assert_eq!(DemandLevel::from_rider_count(60), DemandLevel::Medium);
        assert_eq!(DemandLevel::from_rider_count(61), DemandLevel::High);
        assert_eq!(DemandLevel::from_rider_count(90), DemandLevel::High);
        assert_eq!(DemandLevel::from_rider_count(91), DemandLevel::VeryHigh);
    }

    #[test]
    fn test_supply_thresholds() {
        assert_eq!(SupplyLevel::from_driver_count(0), SupplyLevel::Low);
        assert_eq!(SupplyLevel::from_driver_count(15), SupplyLevel::Low);
        assert_eq!(SupplyLevel::from_driver_count(16), SupplyLevel::Medium);
        assert_eq!(SupplyLevel::from_driver_count(30), SupplyLevel::Medium);
        assert_eq!(SupplyLevel::from_driver_count(31), SupplyLevel::High);
    }

    #[test]
    fn test_loyalty_from_vehicle_code() {
        assert_eq!(
            VehicleClass::from_code(0).unwrap().loyalty_tier(),
            LoyaltyTier::Regular
        );
        assert_eq!(
            VehicleClass::from_code(1).unwrap().loyalty_tier(),
            LoyaltyTier::Silver
        );
        assert_eq!(
            VehicleClass::from_code(2).unwrap().loyalty_tier(),
            LoyaltyTier::Gold
        );
        assert_eq!(VehicleClass::from_code(3), None);
    }

    #[test]
    fn test_vehicle_class_parsing() {
        assert_eq!(
            "Economy".parse::<VehicleClass>().unwrap(),
            VehicleClass::Economy
        );
        assert_eq!(
            "premium".parse::<VehicleClass>().unwrap(),
            VehicleClass::Premium
        );
        assert_eq!("2".parse::<VehicleClass>().unwrap(), VehicleClass::Luxury);
        assert!("Sedan".parse::<VehicleClass>().is_err());
    }

    #[test]
    fn test_from_inputs() {
        let state = RideState::from_inputs(10, 5, VehicleClass::Economy);
        assert_eq!(
            state,
            RideState::new(DemandLevel::Low, SupplyLevel::Low, LoyaltyTier::Regular)
        );

        let state = RideState::from_inputs(50, 20, VehicleClass::Premium);
        assert_eq!(
            state,
            RideState::new(DemandLevel::Medium, SupplyLevel::Medium, LoyaltyTier::Silver)
        );

        let state = RideState::from_inputs(100, 40, VehicleClass::Luxury);
        assert_eq!(
            state,
            RideState::new(DemandLevel::VeryHigh, SupplyLevel::High, LoyaltyTier::Gold)
        );
    }

    #[test]
    fn test_states_with_equal_buckets_are_equal_keys() {
        // Different raw inputs, same buckets
        let a = RideState::from_inputs(35, 20, VehicleClass::Economy);
        let b = RideState::from_inputs(58, 29, VehicleClass::Economy);
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_space_size() {
        assert_eq!(RideState::state_space_size(), 36);
    }
}
