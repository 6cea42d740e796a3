//! Run state
//!
//! The aggregate view of one run. Only [`RunStore`](crate::RunStore)
//! mutates it; everyone else gets clones.

use chrono::{DateTime, Utc};
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{FixRecord, JobStatus, RunSummary, Score, StatusView, TimelineEntry};
use serde::Serialize;

use crate::error::RunError;

/// Everything presentation code needs to render a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    /// Which run this state belongs to; bumped on every new run
    pub generation: u64,
    pub job_id: Option<String>,
    /// True from submission until the backend reports a terminal status
    pub loading: bool,
    /// Launch failure or backend-reported run failure
    pub error: Option<String>,
    /// Failure of the most recent poll, cleared by the next successful one
    pub transient_error: Option<String>,
    pub poll_failures: u32,
    pub polls: u32,
    pub last_polled_at: Option<DateTime<Utc>>,
    pub job_status: Option<JobStatus>,
    /// The full payload that ended the run
    pub terminal_payload: Option<RawStatusPayload>,
    pub summary: Option<RunSummary>,
    pub score: Option<Score>,
    pub fixes: Vec<FixRecord>,
    pub timeline: Vec<TimelineEntry>,
    pub retry_limit: Option<i64>,
}

impl RunState {
    /// Fresh state for a run that is about to launch
    pub fn started(generation: u64) -> Self {
        Self {
            generation,
            loading: true,
            ..Default::default()
        }
    }

    /// True once the run can no longer change on its own
    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub(crate) fn apply_view(&mut self, view: StatusView) {
        self.polls += 1;
        self.last_polled_at = Some(Utc::now());
        self.transient_error = None;
        self.job_status = Some(view.status);
        self.summary = view.summary;
        self.score = view.score;
        self.fixes = view.fixes;
        self.timeline = view.timeline;
        self.retry_limit = view.retry_limit;
    }

    pub(crate) fn finish(&mut self, payload: RawStatusPayload) {
        self.loading = false;
        if JobStatus::from_payload(&payload) == JobStatus::Failed {
            let failure = RunError::run_failed(devpilot_core::failure_message(&payload));
            self.error = Some(failure.to_string());
        }
        self.terminal_payload = Some(payload);
    }

    pub(crate) fn fail(&mut self, error: &RunError) {
        self.loading = false;
        self.error = Some(error.to_string());
    }

    pub(crate) fn record_poll_failure(&mut self, error: &RunError) {
        self.poll_failures += 1;
        self.transient_error = Some(error.to_string());
    }
}
