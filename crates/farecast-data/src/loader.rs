//! Historical ride data loading from CSV

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One CSV row as exported, holes and all.
///
/// Every field is optional: real exports of this dataset have missing cells,
/// which preprocessing imputes before training.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRideRecord {
    #[serde(rename = "Number_of_Riders")]
    pub riders: Option<u32>,

    #[serde(rename = "Number_of_Drivers")]
    pub drivers: Option<u32>,

    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: Option<String>,

    #[serde(rename = "Expected_Ride_Duration")]
    pub duration_min: Option<u32>,

    #[serde(rename = "Historical_Cost_of_Ride")]
    pub historical_cost: Option<f64>,
}

/// Load the ride CSV into raw records
pub fn load_rides(path: &Path) -> Result<Vec<RawRideRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawRideRecord = row?;
        records.push(record);
    }

    info!(
        count = records.len(),
        path = %path.display(),
        "Loaded ride records"
    );

    Ok(records)
}
