//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with an
//! execution service:
//!
//! ```text
//!   capabilities() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)      (async)      (async)
//! ```
//!
//! `capabilities()` is synchronous and infallible; a backend that cannot
//! report capabilities without I/O is not correctly initialized.

use std::env;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use grani_compile::CompiledProgram;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Environment variable consulted for the service token when the
/// configuration carries none.
pub const TOKEN_ENV_VAR: &str = "QEX_TOKEN";

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The configured token, falling back to [`TOKEN_ENV_VAR`].
    pub fn resolve_token(&self) -> HalResult<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        env::var(TOKEN_ENV_VAR).map_err(|_| {
            HalError::Configuration(format!(
                "no token configured and {TOKEN_ENV_VAR} is unset"
            ))
        })
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for execution backends.
///
/// Covers the full job lifecycle: introspection, submission, status
/// polling, result retrieval, and cancellation.
///
/// # Contract
///
/// - `capabilities()` MUST be synchronous and infallible; cached at
///   construction time.
/// - `availability()` SHOULD perform a lightweight liveness check.
/// - `submit()` MUST return a `JobId` with initial status `Queued`.
/// - `result()` MUST only be called when status is `Completed`.
/// - `wait()` has a provided fixed-interval polling implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check backend availability with queue information.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Submit a compiled program for execution.
    ///
    /// The program is immutable and carries no consumed resources, so
    /// the same value may be submitted any number of times.
    async fn submit(&self, program: &CompiledProgram, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a pending job.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Polls every 500ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let max_polls = 600;

        for poll in 0..max_polls {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                status @ (JobStatus::Queued | JobStatus::Running) => {
                    tracing::trace!(job = %job_id, %status, poll, "job pending");
                    sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue, if known.
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a backend that is always accepting jobs.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_builder() {
        let config = BackendConfig::new("qex")
            .with_endpoint("https://api.example.com")
            .with_token("secret-token")
            .with_extra("hub", serde_json::json!("main"));

        assert_eq!(config.name, "qex");
        assert_eq!(config.endpoint, Some("https://api.example.com".to_string()));
        assert_eq!(config.resolve_token().unwrap(), "secret-token");
        assert!(config.extra.contains_key("hub"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BackendConfig::new("qex").with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_serialization_skips_token() {
        let config = BackendConfig::new("qex").with_token("secret-token");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_availability_states() {
        let up = BackendAvailability::always_available();
        assert!(up.is_available);
        assert_eq!(up.queue_depth, Some(0));

        let down = BackendAvailability::unavailable("maintenance");
        assert!(!down.is_available);
        assert_eq!(down.status_message, Some("maintenance".to_string()));
    }

    mod wait {
        use super::*;
        use std::collections::VecDeque;
        use std::sync::Mutex;

        use crate::result::Counts;

        /// Backend that replays a scripted sequence of status answers.
        struct ScriptedBackend {
            capabilities: Capabilities,
            statuses: Mutex<VecDeque<JobStatus>>,
        }

        impl ScriptedBackend {
            fn with_statuses(statuses: impl IntoIterator<Item = JobStatus>) -> Self {
                Self {
                    capabilities: Capabilities::simulator(4),
                    statuses: Mutex::new(statuses.into_iter().collect()),
                }
            }
        }

        #[async_trait]
        impl Backend for ScriptedBackend {
            fn name(&self) -> &str {
                "scripted"
            }

            fn capabilities(&self) -> &Capabilities {
                &self.capabilities
            }

            async fn availability(&self) -> HalResult<BackendAvailability> {
                Ok(BackendAvailability::always_available())
            }

            async fn submit(&self, _program: &CompiledProgram, _shots: u32) -> HalResult<JobId> {
                Ok(JobId::new("job-1"))
            }

            async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
                let mut statuses = self.statuses.lock().unwrap();
                Ok(statuses.pop_front().unwrap_or(JobStatus::Completed))
            }

            async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
                let counts: Counts = [("00".to_string(), 40), ("11".to_string(), 60)]
                    .into_iter()
                    .collect();
                Ok(ExecutionResult::new(counts, 100))
            }

            async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
                Ok(())
            }
        }

        #[tokio::test(start_paused = true)]
        async fn test_wait_polls_until_completed() {
            let backend = ScriptedBackend::with_statuses([
                JobStatus::Queued,
                JobStatus::Queued,
                JobStatus::Running,
                JobStatus::Completed,
            ]);

            let start = tokio::time::Instant::now();
            let result = backend.wait(&JobId::new("job-1")).await.unwrap();
            assert_eq!(result.shots, 100);
            assert_eq!(result.counts.total_shots(), 100);
            // Three pending answers, one 500ms sleep after each.
            assert_eq!(start.elapsed(), Duration::from_millis(1500));
        }

        #[tokio::test(start_paused = true)]
        async fn test_wait_surfaces_failure() {
            let backend = ScriptedBackend::with_statuses([
                JobStatus::Queued,
                JobStatus::Failed("calibration drift".to_string()),
            ]);

            let err = backend.wait(&JobId::new("job-1")).await.unwrap_err();
            assert!(matches!(err, HalError::JobFailed(msg) if msg == "calibration drift"));
        }

        #[tokio::test(start_paused = true)]
        async fn test_wait_surfaces_cancellation() {
            let backend = ScriptedBackend::with_statuses([JobStatus::Cancelled]);
            let err = backend.wait(&JobId::new("job-1")).await.unwrap_err();
            assert!(matches!(err, HalError::JobCancelled));
        }
    }
}
