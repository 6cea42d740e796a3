//! Job, CI and fix statuses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RawStatusPayload;

/// Lifecycle status of a backend job, read from the payload's `status` key
///
/// Only `completed` and `failed` are terminal. Any other value, or no value
/// at all, means the job is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum JobStatus {
    Completed,
    Failed,
    InProgress(Option<String>),
}

impl JobStatus {
    /// Classifies the top-level `status` field of a payload
    pub fn from_payload(payload: &RawStatusPayload) -> Self {
        match payload.get("status") {
            Some(Value::String(status)) => Self::from(status.clone()),
            _ => JobStatus::InProgress(None),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::InProgress(Some(status)) => status,
            JobStatus::InProgress(None) => "pending",
        }
    }
}

impl From<String> for JobStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            _ => JobStatus::InProgress(Some(status)),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a CI pipeline run, always held upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CiStatus {
    Passed,
    Failed,
    Other(String),
}

impl CiStatus {
    /// Upper-cases `raw` and maps it onto a known status
    pub fn parse(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        match upper.as_str() {
            "PASSED" => CiStatus::Passed,
            "FAILED" => CiStatus::Failed,
            _ => CiStatus::Other(upper),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CiStatus::Passed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CiStatus::Passed => "PASSED",
            CiStatus::Failed => "FAILED",
            CiStatus::Other(other) => other,
        }
    }
}

impl From<String> for CiStatus {
    fn from(raw: String) -> Self {
        CiStatus::parse(&raw)
    }
}

impl From<CiStatus> for String {
    fn from(status: CiStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for CiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the agent managed to apply a fix. Matching is exact: only
/// `"Fixed"` counts as fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FixStatus {
    Fixed,
    Other(String),
}

impl FixStatus {
    pub fn is_fixed(&self) -> bool {
        matches!(self, FixStatus::Fixed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FixStatus::Fixed => "Fixed",
            FixStatus::Other(other) => other,
        }
    }
}

impl From<String> for FixStatus {
    fn from(raw: String) -> Self {
        if raw == "Fixed" {
            FixStatus::Fixed
        } else {
            FixStatus::Other(raw)
        }
    }
}

impl From<FixStatus> for String {
    fn from(status: FixStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for FixStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
