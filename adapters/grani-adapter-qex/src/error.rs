//! Error types for the Quantum Experience adapter.

use thiserror::Error;

/// Result type for Quantum Experience operations.
pub type QexResult<T> = Result<T, QexError>;

/// Errors that can occur when talking to the Quantum Experience service.
#[derive(Debug, Error)]
pub enum QexError {
    /// Missing API token.
    #[error("Quantum Experience token not found. Set QEX_TOKEN or configure one explicitly.")]
    MissingToken,

    /// Invalid API token.
    #[error("Invalid Quantum Experience token")]
    InvalidToken,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error.
    #[error("Quantum Experience API error: {message}")]
    Api {
        /// Error code from the API.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Device is offline or in maintenance.
    #[error("Device not available: {0}")]
    DeviceUnavailable(String),

    /// Device is processing other work.
    #[error("Device busy: {0}")]
    DeviceBusy(String),

    /// The account lacks execution credits for the request.
    #[error("Insufficient credits: {remaining} remaining, {required} required")]
    InsufficientCredits {
        /// Credits left on the account.
        remaining: u32,
        /// Credits the request needs.
        required: u32,
    },

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job failed on the service.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Job was cancelled.
    #[error("Job was cancelled: {0}")]
    JobCancelled(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unrecognized job status string from the API.
    #[error("Unknown job status '{0}'")]
    UnknownStatus(String),
}

impl From<QexError> for grani_hal::HalError {
    fn from(e: QexError) -> Self {
        match e {
            QexError::MissingToken | QexError::InvalidToken => {
                grani_hal::HalError::AuthenticationFailed(e.to_string())
            }
            QexError::Http(inner) => grani_hal::HalError::Network(inner),
            QexError::DeviceUnavailable(msg) => grani_hal::HalError::BackendUnavailable(msg),
            QexError::DeviceBusy(msg) => grani_hal::HalError::BackendBusy(msg),
            QexError::InsufficientCredits {
                remaining,
                required,
            } => grani_hal::HalError::InsufficientCredits {
                remaining,
                required,
            },
            QexError::JobNotFound(id) => grani_hal::HalError::JobNotFound(id),
            QexError::JobFailed(msg) => grani_hal::HalError::JobFailed(msg),
            QexError::JobCancelled(_) => grani_hal::HalError::JobCancelled,
            QexError::Json(inner) => grani_hal::HalError::Serialization(inner),
            QexError::Api { .. } | QexError::UnknownStatus(_) => {
                grani_hal::HalError::Backend(e.to_string())
            }
        }
    }
}
