//! Farecast Data
//!
//! Dataset provider: loads the historical ride CSV, imputes missing values,
//! and discretizes cleaned records into the training samples the environment
//! replays.

pub mod error;
pub mod loader;
pub mod preprocess;

pub use error::{DataError, Result};
pub use loader::{load_rides, RawRideRecord};
pub use preprocess::{preprocess, to_samples, RideRecord};
