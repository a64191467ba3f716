//! Assessment domain errors

use thiserror::Error;

/// Failures of the bounded worker pool
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("worker task failed: {completed} of {expected} jobs completed")]
    WorkerFailed { completed: usize, expected: usize },
}

/// Errors that can occur while assessing a claim
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// Nothing to analyze; the request is rejected before any fetch
    #[error("images list is empty")]
    EmptyImages,

    #[error("batch processing failed: {0}")]
    Pool(#[from] PoolError),
}

impl AssessmentError {
    /// True when the caller sent an unusable request
    pub fn is_client_error(&self) -> bool {
        matches!(self, AssessmentError::EmptyImages)
    }
}
