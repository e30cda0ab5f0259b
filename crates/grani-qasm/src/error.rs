//! Error types for QASM emission.

use grani_ir::QubitId;
use thiserror::Error;

/// Errors that can occur while emitting QASM.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A measurement has no classical bit to write into.
    #[error("Measurement on {qubit:?} has no classical target")]
    MissingClbit {
        /// The measured qubit.
        qubit: QubitId,
    },
}

/// Result type for emission operations.
pub type EmitResult<T> = Result<T, EmitError>;
