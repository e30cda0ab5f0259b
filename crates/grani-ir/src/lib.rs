//! Grani Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Grani. It forms the foundation of the synthesis stack.
//!
//! # Overview
//!
//! The circuit IR uses a DAG (Directed Acyclic Graph) representation
//! internally, which enables dependency-aware optimization passes. The
//! high-level [`Circuit`] API provides a convenient builder pattern for
//! constructing circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] with the native u2/u3/cx family
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building an Entangled Pair
//!
//! ```rust
//! use grani_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("pair", 2, 2);
//!
//! // Basis change on the root, then entangle.
//! circuit.basis_change(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! circuit.measure(QubitId(0), ClbitId(0)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.depth() >= 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`  | 1 | Identity gate |
//! | `U2` | 1 | u2(φ, λ): one X90 pulse with frame changes |
//! | `U3` | 1 | Universal single-qubit gate u3(θ, φ, λ) |
//! | `CX` | 2 | Controlled-NOT (CNOT) |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
