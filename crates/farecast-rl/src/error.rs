//! RL error types

use thiserror::Error;

/// RL result type alias
pub type Result<T> = std::result::Result<T, RlError>;

/// Errors from the environment and training loop
#[derive(Error, Debug)]
pub enum RlError {
    #[error("Cannot build an environment from an empty dataset")]
    EmptyDataset,

    #[error("Episode already finished; call reset() before stepping again")]
    EpisodeFinished,
}
