//! Run launch and status endpoints

use crate::AgentClient;
use crate::error::{ClientError, Result};
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{JobHandle, RunRequest};
use devpilot_core::dto::run::{LaunchAccepted, LaunchRun};
use serde_json::Value;
use tracing::debug;

impl AgentClient {
    /// Launch a new agent run
    ///
    /// Makes a single attempt. Any non-success response, or a body without
    /// a usable `jobId`, is an error.
    ///
    /// # Arguments
    /// * `request` - The repository and team to run against
    ///
    /// # Returns
    /// The handle of the job the backend started
    pub async fn launch_run(&self, request: &RunRequest) -> Result<JobHandle> {
        let url = format!("{}/run-agent", self.base_url);
        debug!("Launching run for {}", request.repository_url());

        let response = self
            .client
            .post(&url)
            .json(&LaunchRun::from(request))
            .send()
            .await?;

        let accepted: LaunchAccepted = self.handle_response(response).await?;
        accepted
            .into_handle()
            .ok_or_else(|| ClientError::ParseError("Launch response has an empty jobId".to_string()))
    }

    /// Fetch the current status payload of a job
    ///
    /// # Arguments
    /// * `job` - The job to look up
    ///
    /// # Returns
    /// The raw JSON object the backend returned
    pub async fn get_status(&self, job: &JobHandle) -> Result<RawStatusPayload> {
        let url = format!("{}/status/{}", self.base_url, job.job_id());
        let response = self.client.get(&url).send().await?;

        match self.handle_response::<Value>(response).await? {
            Value::Object(payload) => Ok(payload),
            other => Err(ClientError::ParseError(format!(
                "Status response is not a JSON object: {}",
                other
            ))),
        }
    }
}
