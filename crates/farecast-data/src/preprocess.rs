//! Missing-value imputation and discretization.
//!
//! Numeric holes are filled with the column mean, missing vehicle classes
//! with the column mode. A column with no usable values at all cannot be
//! imputed and fails loudly.

use crate::error::{DataError, Result};
use crate::loader::RawRideRecord;
use farecast_core::{RideSample, RideState, VehicleClass};
use tracing::debug;

/// A fully populated ride record, ready for bucketing and estimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideRecord {
    pub riders: u32,
    pub drivers: u32,
    pub vehicle: VehicleClass,
    pub duration_min: u32,
    pub historical_cost: f64,
}

/// Clean raw records into fully populated ones.
///
/// Vehicle strings are parsed into [`VehicleClass`]; unparseable values are
/// rejected rather than silently dropped.
pub fn preprocess(raw: &[RawRideRecord]) -> Result<Vec<RideRecord>> {
    if raw.is_empty() {
        return Err(DataError::Empty);
    }

    let vehicles = parse_vehicles(raw)?;

    let mean_riders = column_mean(raw.iter().map(|r| r.riders), "Number_of_Riders")?;
    let mean_drivers = column_mean(raw.iter().map(|r| r.drivers), "Number_of_Drivers")?;
    let mean_duration = column_mean(raw.iter().map(|r| r.duration_min), "Expected_Ride_Duration")?;
    let mean_cost = float_column_mean(
        raw.iter().map(|r| r.historical_cost),
        "Historical_Cost_of_Ride",
    )?;
    let mode_vehicle = vehicle_mode(&vehicles)?;

    let mut imputed = 0usize;
    let records = raw
        .iter()
        .zip(vehicles)
        .map(|(row, vehicle)| {
            let mut holes = 0;
            let record = RideRecord {
                riders: row.riders.unwrap_or_else(|| {
                    holes += 1;
                    mean_riders
                }),
                drivers: row.drivers.unwrap_or_else(|| {
                    holes += 1;
                    mean_drivers
                }),
                vehicle: vehicle.unwrap_or_else(|| {
                    holes += 1;
                    mode_vehicle
                }),
                duration_min: row.duration_min.unwrap_or_else(|| {
                    holes += 1;
                    mean_duration
                }),
                historical_cost: row.historical_cost.unwrap_or_else(|| {
                    holes += 1;
                    mean_cost
                }),
            };
            if holes > 0 {
                imputed += 1;
            }
            record
        })
        .collect();

    if imputed > 0 {
        debug!(rows = imputed, "Imputed missing values");
    }

    Ok(records)
}

/// Discretize cleaned records into environment samples.
///
/// Loyalty is derived from the vehicle class, not read from the file; this
/// is the same proxy the discretizer applies to live queries.
pub fn to_samples(records: &[RideRecord]) -> Vec<RideSample> {
    records
        .iter()
        .map(|r| {
            RideSample::new(
                RideState::from_inputs(r.riders, r.drivers, r.vehicle),
                r.historical_cost,
            )
        })
        .collect()
}

fn parse_vehicles(raw: &[RawRideRecord]) -> Result<Vec<Option<VehicleClass>>> {
    raw.iter()
        .map(|row| {
            row.vehicle_type
                .as_deref()
                .map(|s| {
                    s.parse::<VehicleClass>()
                        .map_err(|message| DataError::InvalidValue {
                            column: "Vehicle_Type",
                            message,
                        })
                })
                .transpose()
        })
        .collect()
}

fn column_mean(values: impl Iterator<Item = Option<u32>>, column: &'static str) -> Result<u32> {
    let present: Vec<u32> = values.flatten().collect();
    if present.is_empty() {
        return Err(DataError::MissingValues(column));
    }
    let sum: u64 = present.iter().map(|&v| v as u64).sum();
    Ok((sum as f64 / present.len() as f64).round() as u32)
}

fn float_column_mean(
    values: impl Iterator<Item = Option<f64>>,
    column: &'static str,
) -> Result<f64> {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        return Err(DataError::MissingValues(column));
    }
    Ok(present.iter().sum::<f64>() / present.len() as f64)
}

/// Most frequent vehicle class; ties resolve to the lowest code
fn vehicle_mode(vehicles: &[Option<VehicleClass>]) -> Result<VehicleClass> {
    let mut counts = [0usize; 3];
    for vehicle in vehicles.iter().flatten() {
        counts[vehicle.code() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .max_by_key(|&(code, &count)| (count, std::cmp::Reverse(code)))
        .and_then(|(code, _)| VehicleClass::from_code(code as u8))
        .ok_or(DataError::MissingValues("Vehicle_Type"))
}
