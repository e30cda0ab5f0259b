//! Quantum Experience REST API client.
//!
//! Thin wrapper over the service's HTTP surface: device status, account
//! credits, job submission, job polling, and cancellation. All policy
//! (retries, capacity checks) lives in the backend layer.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use grani_hal::JobStatus;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::error::{QexError, QexResult};

/// Default Quantum Experience API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.quantum-experience.net/api";

/// User-Agent sent with requests.
const USER_AGENT: &str = "grani/0.4 (quantum-compiler)";

/// Quantum Experience API client.
pub struct QexClient {
    client: Client,
    endpoint: String,
}

impl fmt::Debug for QexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QexClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Device status as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatus {
    /// Whether the device is accepting jobs.
    #[serde(default)]
    pub available: Option<bool>,
    /// Whether the device is processing other work.
    #[serde(default)]
    pub busy: Option<bool>,
    /// Jobs ahead in the device queue.
    #[serde(default)]
    pub queue_length: Option<u32>,
    /// Human-readable status message.
    #[serde(default)]
    pub message: Option<String>,
}

impl DeviceStatus {
    /// Whether the device can take a new job right now.
    pub fn accepts_jobs(&self) -> bool {
        self.available.unwrap_or(true) && !self.busy.unwrap_or(false)
    }
}

/// Account credits as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsInfo {
    /// Credits remaining on the account.
    pub remaining: u32,
}

/// Body of a job submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    /// Program name shown in the service dashboard.
    pub name: String,
    /// The circuit in OpenQASM 2 text form.
    pub qasm: String,
    /// Target device identifier.
    pub device: String,
    /// Shots to execute.
    pub shots: u32,
    /// Maximum credits the job may consume.
    pub max_credits: u32,
}

/// Response to a job submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    /// Service-assigned job identifier.
    pub id: String,
    /// Initial status string.
    pub status: String,
}

/// A job as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct JobInfo {
    /// Job identifier.
    pub id: String,
    /// Current status string.
    pub status: String,
    /// Failure reason, present when status is an error state.
    #[serde(default)]
    pub error: Option<String>,
    /// Measurement outcome histogram, present once completed.
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
}

/// Map a service status string onto the job state machine.
///
/// The service reports several pre-queue states during validation; all
/// of them are still `Queued` from the caller's point of view.
pub fn parse_status(status: &str, error: Option<&str>) -> QexResult<JobStatus> {
    match status.to_ascii_lowercase().as_str() {
        "creating" | "created" | "validating" | "validated" | "queued" => Ok(JobStatus::Queued),
        "running" => Ok(JobStatus::Running),
        "completed" => Ok(JobStatus::Completed),
        "cancelled" => Ok(JobStatus::Cancelled),
        "error" | "failed" => Ok(JobStatus::Failed(
            error.unwrap_or("no reason reported").to_string(),
        )),
        other => Err(QexError::UnknownStatus(other.to_string())),
    }
}

impl QexClient {
    /// Create a client authenticating every request with `token`.
    pub fn new(endpoint: impl Into<String>, token: &str) -> QexResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| QexError::InvalidToken)?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch the status of one device.
    pub async fn device_status(&self, device: &str) -> QexResult<DeviceStatus> {
        let url = format!("{}/devices/{device}/status", self.endpoint);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(self.api_error(response, "device status").await);
        }
        Ok(response.json().await?)
    }

    /// Fetch the credits remaining on the authenticated account.
    pub async fn credits(&self) -> QexResult<CreditsInfo> {
        let url = format!("{}/users/me/credits", self.endpoint);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(self.api_error(response, "credits").await);
        }
        Ok(response.json().await?)
    }

    /// Submit a job for execution.
    pub async fn submit_job(&self, request: &SubmitRequest) -> QexResult<SubmitResponse> {
        let url = format!("{}/jobs", self.endpoint);
        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(self.api_error(response, "submit").await);
        }
        Ok(response.json().await?)
    }

    /// Fetch one job.
    pub async fn get_job(&self, job_id: &str) -> QexResult<JobInfo> {
        let url = format!("{}/jobs/{job_id}", self.endpoint);
        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(QexError::JobNotFound(job_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(self.api_error(response, "get job").await);
        }
        Ok(response.json().await?)
    }

    /// Cancel a pending job.
    pub async fn cancel_job(&self, job_id: &str) -> QexResult<()> {
        let url = format!("{}/jobs/{job_id}/cancel", self.endpoint);
        let response = self.client.post(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(QexError::JobNotFound(job_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(self.api_error(response, "cancel").await);
        }
        Ok(())
    }

    async fn api_error(&self, response: reqwest::Response, operation: &str) -> QexError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "no body".to_string());
        QexError::Api {
            code: Some(status.as_u16().to_string()),
            message: format!("{operation} failed: {body}"),
        }
    }
}
