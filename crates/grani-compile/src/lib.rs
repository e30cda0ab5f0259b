//! Grani Hardware-Aware Synthesis Engine
//!
//! This crate turns an algorithm request into a circuit that respects a
//! device's directed coupling graph. Device analysis happens once, at
//! compiler construction; every compilation after that reuses the cached
//! routing tree.
//!
//! # Pipeline
//!
//! ```text
//! CouplingMap
//!       │
//!       ▼
//! ┌───────────────┐     ┌────────────────┐
//! │ CouplingGraph │ ──► │ RoutingPlanner │   (once, at construction)
//! └───────────────┘     └────────────────┘
//!                              │
//!            per compile call  ▼
//!       ┌──────────────────────────────────┐
//!       │ CircuitSynthesizer               │
//!       │   prep / entangle / close / mix  │
//!       └──────────────────────────────────┘
//!                              │
//!                              ▼
//!                     CancelBasisChange
//!                              │
//!                              ▼
//!                       CompiledProgram
//! ```
//!
//! # Example
//!
//! ```rust
//! use grani_compile::{Algorithm, Compiler, CouplingMap};
//!
//! let mut coupling_map = CouplingMap::new();
//! coupling_map.insert(0, [1, 2].into_iter().collect());
//! coupling_map.insert(1, Default::default());
//! coupling_map.insert(2, Default::default());
//!
//! let compiler = Compiler::new(coupling_map).unwrap();
//! let program = compiler
//!     .compile(3, 5, Algorithm::Ghz, "11", false)
//!     .unwrap();
//!
//! assert_eq!(program.connected, vec![0, 1, 2]);
//! println!("{}", program.qasm);
//! ```

pub mod compiler;
pub mod coupling;
pub mod error;
pub mod optimize;
pub mod oracle;
pub mod pass;
pub mod routing;
pub mod synth;

pub use compiler::{Algorithm, CompiledProgram, Compiler, ProgramPayload};
pub use coupling::{CouplingGraph, CouplingMap};
pub use error::{CompileError, CompileResult};
pub use optimize::CancelBasisChange;
pub use pass::{Pass, PassKind};
pub use routing::{RoutingPath, RoutingPlanner};
pub use synth::{CircuitSynthesizer, SynthesizedDraft};
