//! Error type for the configuration and loading boundary
//!
//! The numeric engine itself never fails; these errors come from reading
//! scenario files, debt lists, and from inverse solvers asked to divide by
//! an empty horizon.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Horizon must cover at least one period")]
    ZeroHorizon,
}

pub type Result<T> = std::result::Result<T, EngineError>;
