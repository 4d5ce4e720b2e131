//! Base-price estimation via a median fallback chain.
//!
//! The estimate narrows from the most specific cohort that has data to the
//! least: same vehicle class within a duration window, then the coarse
//! duration bin, then the vehicle class alone, then the whole dataset.

use crate::error::{PricingError, Result};
use farecast_core::{BasePriceConfig, VehicleClass};
use farecast_data::RideRecord;
use tracing::debug;

/// Estimate a base price for a ride.
///
/// Returns the first non-empty median in the fallback chain. Only an empty
/// record set has no answer: the final fallback is the global median.
pub fn estimate_base_price(
    records: &[RideRecord],
    vehicle: VehicleClass,
    duration_min: u32,
    config: &BasePriceConfig,
) -> Result<f64> {
    if records.is_empty() {
        return Err(PricingError::NoData);
    }

    let lo = duration_min.saturating_sub(config.duration_window);
    let hi = duration_min + config.duration_window;
    let windowed = costs(records, |r| {
        r.vehicle == vehicle && (lo..=hi).contains(&r.duration_min)
    });
    if let Some(price) = median(windowed) {
        debug!(cohort = "duration_window", price, "Base price estimated");
        return Ok(price);
    }

    let bin = config.coarse_bin.max(1);
    let target_bin = (duration_min / bin) * bin;
    let binned = costs(records, |r| {
        r.vehicle == vehicle && (r.duration_min / bin) * bin == target_bin
    });
    if let Some(price) = median(binned) {
        debug!(cohort = "coarse_bin", price, "Base price estimated");
        return Ok(price);
    }

    let by_vehicle = costs(records, |r| r.vehicle == vehicle);
    if let Some(price) = median(by_vehicle) {
        debug!(cohort = "vehicle", price, "Base price estimated");
        return Ok(price);
    }

    let global = costs(records, |_| true);
    debug!(cohort = "global", "Base price estimated");
    median(global).ok_or(PricingError::NoData)
}

fn costs(records: &[RideRecord], predicate: impl Fn(&RideRecord) -> bool) -> Vec<f64> {
    records
        .iter()
        .filter(|r| predicate(r))
        .map(|r| r.historical_cost)
        .collect()
}

/// Median of a sample; the mean of the two middle values for even sizes
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).expect("historical costs are finite"));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
