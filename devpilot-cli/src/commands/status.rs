//! Status command handler
//!
//! Fetches a job's status once, without polling.

use std::process::ExitCode;

use anyhow::{Context, Result};
use devpilot_core::domain::{JobHandle, JobStatus, StatusView};
use devpilot_session::RunError;
use serde::Serialize;

use crate::config::Config;
use crate::render;

/// JSON output of the `status` command
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport<'a> {
    job_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(flatten)]
    view: &'a StatusView,
}

/// Fetch, normalize and display one status payload
pub async fn handle_status(job_id: &str, json: bool, raw: bool, config: &Config) -> Result<ExitCode> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        anyhow::bail!("job ID cannot be empty");
    }
    let job = JobHandle::new(job_id);
    let client = config.client()?;

    let payload = client
        .get_status(&job)
        .await
        .with_context(|| format!("Failed to fetch status of job {}", job))?;

    if raw {
        let output = serde_json::to_string_pretty(&payload).context("Failed to serialize payload")?;
        println!("{}", output);
        return Ok(ExitCode::SUCCESS);
    }

    let view = devpilot_core::normalize(&payload);
    let failure = (view.status == JobStatus::Failed)
        .then(|| RunError::run_failed(devpilot_core::failure_message(&payload)).to_string());

    if json {
        let report = StatusReport {
            job_id,
            error: failure.as_deref(),
            view: &view,
        };
        let output = serde_json::to_string_pretty(&report).context("Failed to serialize status")?;
        println!("{}", output);
    } else {
        render::print_status(&job, &view, failure.as_deref());
    }

    Ok(if failure.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
