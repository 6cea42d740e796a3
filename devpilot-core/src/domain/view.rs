//! Display-ready view models
//!
//! Every field the backend might leave out is an `Option`. A summary or
//! score is only built when at least one of its fields is known; see
//! [`crate::normalize`].

use serde::{Deserialize, Serialize};

use super::status::{CiStatus, FixStatus, JobStatus};

/// Overview of an agent run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_failures: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixes_applied: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_status: Option<CiStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<String>,
}

impl RunSummary {
    /// True when no field resolved to a value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Score breakdown of an agent run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_bonus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

impl Score {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Final score clamped to `0..=100`, with a missing score counted as 0
    pub fn progress(&self) -> f64 {
        self.final_score.unwrap_or(0.0).clamp(0.0, 100.0)
    }
}

/// One fix the agent attempted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixRecord {
    pub file: Option<String>,
    pub bug_type: Option<String>,
    pub line: Option<i64>,
    pub commit_message: Option<String>,
    pub status: Option<FixStatus>,
}

impl FixRecord {
    pub fn is_fixed(&self) -> bool {
        self.status.as_ref().is_some_and(FixStatus::is_fixed)
    }
}

/// One CI iteration of the agent's fix loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub iteration: Option<i64>,
    pub ci_status: CiStatus,
    pub timestamp: Option<String>,
    pub retry_limit: Option<i64>,
}

impl TimelineEntry {
    /// `"(iteration/limit)"` when both are known and the limit is non-zero
    pub fn progress_label(&self) -> Option<String> {
        match (self.iteration, self.retry_limit) {
            (Some(iteration), Some(limit)) if limit != 0 => {
                Some(format!("({}/{})", iteration, limit))
            }
            _ => None,
        }
    }
}

/// Everything the normalizer extracts from one status payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub status: JobStatus,
    pub summary: Option<RunSummary>,
    pub score: Option<Score>,
    pub fixes: Vec<FixRecord>,
    pub timeline: Vec<TimelineEntry>,
    pub retry_limit: Option<i64>,
}
