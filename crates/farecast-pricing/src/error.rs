//! Pricing error types

use thiserror::Error;

/// Pricing result type alias
pub type Result<T> = std::result::Result<T, PricingError>;

/// Base-price estimation errors
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("No historical data to estimate a base price from")]
    NoData,
}
