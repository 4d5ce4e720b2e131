//! Data layer error types

use thiserror::Error;

/// Data result type alias
pub type Result<T> = std::result::Result<T, DataError>;

/// Dataset loading and preprocessing errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset contains no rows")]
    Empty,

    #[error("Column {0} has no usable values; cannot impute")]
    MissingValues(&'static str),

    #[error("Invalid value in column {column}: {message}")]
    InvalidValue {
        column: &'static str,
        message: String,
    },
}
