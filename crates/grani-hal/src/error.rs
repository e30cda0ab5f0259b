//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend is not accepting jobs right now.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Backend is processing other work.
    #[error("Backend busy: {0}")]
    BackendBusy(String),

    /// The account lacks execution credits for the request.
    #[error("Insufficient credits: {remaining} remaining, {required} required")]
    InsufficientCredits {
        /// Credits left on the account.
        remaining: u32,
        /// Credits the request would consume.
        required: u32,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Job submission failed.
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// Job execution failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job was cancelled.
    #[error("Job cancelled")]
    JobCancelled,

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout waiting for job.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// Requested program exceeds the backend's qubit ceiling.
    #[error("Program exceeds backend capacity: {0}")]
    CircuitTooLarge(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl HalError {
    /// Whether the condition is expected to clear on its own, making a
    /// fixed-delay retry of the same request reasonable.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            HalError::BackendUnavailable(_)
                | HalError::BackendBusy(_)
                | HalError::InsufficientCredits { .. }
                | HalError::Network(_)
        )
    }
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
