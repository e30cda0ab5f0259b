//! OpenQASM 2.0 emission for Grani circuits.
//!
//! Compiled circuits are lowered to textual QASM 2.0 for submission to
//! remote execution services. Only emission is provided; circuits are
//! never read back from QASM.
//!
//! # Example
//!
//! ```rust
//! use grani_ir::{Circuit, ClbitId, QubitId};
//! use grani_qasm::emit_qasm2;
//!
//! let mut circuit = Circuit::with_size("pair", 2, 2);
//! circuit.basis_change(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! let qasm = emit_qasm2(&circuit).unwrap();
//! assert!(qasm.starts_with("OPENQASM 2.0;"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::emit_qasm2;
pub use error::{EmitError, EmitResult};
