//! Quantum Experience backend adapter for Grani.
//!
//! Connects compiled programs to the Quantum Experience REST service:
//! device status and credit polling, job submission, result retrieval
//! with counts ordered by descending frequency, and an unbounded
//! fixed-delay retry loop for transient service conditions.
//!
//! # Example
//!
//! ```ignore
//! use grani_adapter_qex::QexBackend;
//! use grani_compile::{Algorithm, Compiler};
//! use grani_hal::{BackendClass, BackendConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let compiler = Compiler::new(coupling_map)?;
//!     let program = compiler.compile(4, 5, Algorithm::Ghz, "11", false)?;
//!
//!     // Token from QEX_TOKEN unless configured explicitly.
//!     let config = BackendConfig::new("qex");
//!     let backend = QexBackend::new(&config, BackendClass::Pegasus5, "pegasus5-a", 5)?;
//!
//!     let record = backend.run_program(&program, 1024).await?;
//!     if let Some((bitstring, count)) = record.counts.first() {
//!         println!("most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod error;

pub use api::{DEFAULT_ENDPOINT, QexClient};
pub use backend::{QexBackend, RunRecord};
pub use error::{QexError, QexResult};
