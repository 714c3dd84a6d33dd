//! Error types for quality validation

use std::time::Duration;

use thiserror::Error;

/// Error type for a single judge call
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JudgeError {
    #[error("Judge unavailable: {0}")]
    Unavailable(String),

    #[error("Judge timed out after {0:?}")]
    Timeout(Duration),

    #[error("Judge request failed: {0}")]
    Request(String),
}

/// Error type for validation under the strict malformed-response policy
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error(transparent)]
    Judge(#[from] JudgeError),

    #[error("Malformed judge response: {0}")]
    Malformed(String),
}
