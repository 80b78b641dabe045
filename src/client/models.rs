use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub tenant: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Complete,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Complete => "complete",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

/// A media-processing job as returned by the jobs API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub process: String,
    pub status: JobStatus,
    /// Submission payload, shaped by the process input schema.
    pub input: Value,
    pub progress: Option<f64>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A named process definition. `input_schema` is the raw JSON-Schema
/// document consumed by the schema traversal core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaOutput {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub jobs_total: u64,
    pub jobs_queued: u64,
    pub jobs_running: u64,
    pub jobs_complete: u64,
    pub jobs_failed: u64,
    pub outputs_total: u64,
}
