//! Quantum Experience backend implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use grani_compile::{Algorithm, CompiledProgram};
use grani_hal::{
    Backend, BackendAvailability, BackendClass, BackendConfig, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, JobId, JobStatus,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::{DEFAULT_ENDPOINT, QexClient, SubmitRequest, parse_status};
use crate::error::{QexError, QexResult};

/// Delay between attempts while the service is in a transient condition.
const RETRY_DELAY: Duration = Duration::from_secs(300);

/// Default credit ceiling per job.
const DEFAULT_MAX_CREDITS: u32 = 3;

/// Everything a caller needs from one finished run.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// Measurement outcomes ordered by descending count.
    pub counts: Vec<(String, u64)>,
    /// The submitted circuit text.
    pub raw_qasm: String,
    /// The algorithm that was run.
    pub algorithm: Algorithm,
    /// Physical qubits used, in the program's canonical order.
    pub connected: Vec<u32>,
    /// Shots that were executed.
    pub shots: u32,
}

/// Quantum Experience backend adapter.
pub struct QexBackend {
    client: Arc<QexClient>,
    device: String,
    capabilities: Capabilities,
    max_credits: u32,
}

impl QexBackend {
    /// Create a backend for one device of the given class.
    ///
    /// The token comes from the configuration or the `QEX_TOKEN`
    /// environment variable.
    pub fn new(
        config: &BackendConfig,
        class: BackendClass,
        device: impl Into<String>,
        device_qubits: usize,
    ) -> QexResult<Self> {
        let token = config.resolve_token().map_err(|_| QexError::MissingToken)?;
        let endpoint = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let client = QexClient::new(endpoint, &token)?;

        let capabilities = match class {
            BackendClass::Simulator => Capabilities::simulator(device_qubits),
            hardware => Capabilities::hardware(hardware, device_qubits),
        };

        let max_credits = config
            .extra
            .get("max_credits")
            .and_then(serde_json::Value::as_u64)
            .map_or(DEFAULT_MAX_CREDITS, |v| v as u32);

        Ok(Self {
            client: Arc::new(client),
            device: device.into(),
            capabilities,
            max_credits,
        })
    }

    /// The targeted device identifier.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Run a compiled program to completion.
    ///
    /// Transient conditions (device offline or busy, credits exhausted,
    /// network trouble) are retried with a fixed delay, without bound;
    /// the program value is reused untouched across attempts. Fatal
    /// errors propagate immediately.
    pub async fn run_program(
        &self,
        program: &CompiledProgram,
        shots: u32,
    ) -> HalResult<RunRecord> {
        retry_transient(|| self.try_run(program, shots), RETRY_DELAY).await
    }

    async fn try_run(&self, program: &CompiledProgram, shots: u32) -> HalResult<RunRecord> {
        let availability = self.availability().await?;
        if !availability.is_available {
            let reason = availability
                .status_message
                .unwrap_or_else(|| self.device.clone());
            return Err(HalError::BackendUnavailable(reason));
        }

        let credits = self.client.credits().await.map_err(HalError::from)?;
        if credits.remaining < self.max_credits {
            return Err(HalError::InsufficientCredits {
                remaining: credits.remaining,
                required: self.max_credits,
            });
        }

        let job_id = self.submit(program, shots).await?;
        debug!(job = %job_id, device = %self.device, "job submitted");
        let result = self.wait(&job_id).await?;

        Ok(assemble_record(program, &result))
    }
}

/// Drive `attempt` to completion, sleeping `delay` between tries while
/// it keeps failing transiently. Fatal errors propagate on the spot.
async fn retry_transient<T, F, Fut>(mut attempt: F, delay: Duration) -> HalResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = HalResult<T>>,
{
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                warn!(error = %e, delay_s = delay.as_secs(), "transient failure, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Join a program with its execution result.
fn assemble_record(program: &CompiledProgram, result: &ExecutionResult) -> RunRecord {
    RunRecord {
        counts: result.counts.sorted_descending(),
        raw_qasm: program.qasm.clone(),
        algorithm: program.algorithm,
        connected: program.connected.clone(),
        shots: result.shots,
    }
}

#[async_trait]
impl Backend for QexBackend {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "qex"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        let status = self
            .client
            .device_status(&self.device)
            .await
            .map_err(HalError::from)?;

        if status.accepts_jobs() {
            Ok(BackendAvailability {
                is_available: true,
                queue_depth: status.queue_length,
                status_message: status.message,
            })
        } else {
            Ok(BackendAvailability::unavailable(
                status
                    .message
                    .unwrap_or_else(|| format!("{} not accepting jobs", self.device)),
            ))
        }
    }

    async fn submit(&self, program: &CompiledProgram, shots: u32) -> HalResult<JobId> {
        // Capacity gate against the class ceiling before any traffic.
        self.capabilities
            .class
            .register_size(program.n_qubits, self.capabilities.num_qubits)?;

        let request = SubmitRequest {
            name: format!("{}-{}", program.payload.name, Uuid::new_v4().simple()),
            qasm: program.payload.qasm.clone(),
            device: self.device.clone(),
            shots,
            max_credits: self.max_credits,
        };

        let response = self
            .client
            .submit_job(&request)
            .await
            .map_err(HalError::from)?;
        Ok(JobId::new(response.id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let job = self.client.get_job(&job_id.0).await.map_err(HalError::from)?;
        parse_status(&job.status, job.error.as_deref()).map_err(HalError::from)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let job = self.client.get_job(&job_id.0).await.map_err(HalError::from)?;
        match parse_status(&job.status, job.error.as_deref()).map_err(HalError::from)? {
            JobStatus::Completed => {}
            JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
            JobStatus::Cancelled => return Err(HalError::JobCancelled),
            pending => {
                return Err(HalError::Backend(format!(
                    "result requested while job {job_id} is {pending}"
                )));
            }
        }

        let counts: Counts = job
            .counts
            .unwrap_or_default()
            .into_iter()
            .collect();
        let shots = u32::try_from(counts.total_shots()).unwrap_or(u32::MAX);
        Ok(ExecutionResult::new(counts, shots))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        self.client
            .cancel_job(&job_id.0)
            .await
            .map_err(HalError::from)
    }
}
