//! Error types for voltaic-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The system has no unique solution: an open circuit, a floating
    /// subnetwork, or a non-finite element value.
    #[error("singular system: {0}")]
    SingularMatrix(String),

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Core(#[from] voltaic_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
