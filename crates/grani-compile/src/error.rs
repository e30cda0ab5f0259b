//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during synthesis.
///
/// Every variant is a recoverable, typed condition; compilation never
/// terminates the process. Transient remote-service failures are not part
/// of this taxonomy, they belong to the execution layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The coupling map is missing or empty.
    #[error("Coupling map is empty")]
    EmptyCouplingMap,

    /// Qubit ids in the coupling map are not dense from 0.
    #[error("Coupling map qubit ids must be contiguous from 0: missing id {missing}")]
    NonContiguousQubits {
        /// The first id absent from the map.
        missing: u32,
    },

    /// The requested qubit count exceeds the backend capacity.
    #[error("Requested {requested} qubits but the backend capacity is {capacity}")]
    CapacityExceeded {
        /// Number of qubits requested (including any reserved slot).
        requested: usize,
        /// The backend qubit ceiling.
        capacity: usize,
    },

    /// No coupling edge exists in either direction for a required pair.
    #[error("No coupling path between control {control} and target {target}")]
    NoCouplingPath {
        /// The control qubit.
        control: u32,
        /// The target qubit.
        target: u32,
    },

    /// The routing tree does not cover the requested qubits.
    #[error("Routing tree covers {placed} qubits but {total} are required")]
    RoutingIncomplete {
        /// Qubits placed in the tree.
        placed: usize,
        /// Qubits required.
        total: usize,
    },

    /// Unknown algorithm tag.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Oracle alias or bitstring is malformed.
    #[error("Invalid oracle: {0}")]
    InvalidOracle(String),

    /// IR error during circuit construction.
    #[error("IR error: {0}")]
    Ir(#[from] grani_ir::IrError),

    /// Emission error while lowering to textual form.
    #[error("Emit error: {0}")]
    Emit(#[from] grani_qasm::EmitError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
