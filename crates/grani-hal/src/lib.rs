//! Grani Hardware Abstraction Layer
//!
//! This crate provides a unified interface for handing compiled programs
//! to execution services, whether remote hardware or local simulators.
//!
//! # Overview
//!
//! The HAL abstracts away service-specific details, providing:
//! - A common [`Backend`] trait for job submission and management
//! - [`BackendClass`] with the fixed qubit ceilings per device family
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//! - A transient/fatal split on [`HalError`] that drives retry policy
//!
//! # Example: Implementing a Backend
//!
//! ```ignore
//! use grani_compile::CompiledProgram;
//! use grani_hal::{
//!     Backend, BackendAvailability, Capabilities, ExecutionResult,
//!     HalResult, JobId, JobStatus,
//! };
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     // Sync and infallible, capabilities cached at construction.
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn submit(&self, program: &CompiledProgram, shots: u32) -> HalResult<JobId> {
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, TOKEN_ENV_VAR};
pub use capability::{BackendClass, Capabilities};
pub use error::{HalError, HalResult};
pub use job::{JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
