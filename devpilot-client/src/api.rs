//! Backend API seam
//!
//! The polling session talks to the backend only through this trait, so
//! tests can swap in a scripted implementation.

use async_trait::async_trait;
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{JobHandle, RunRequest};

use crate::AgentClient;
use crate::error::Result;

/// Operations the agent backend offers
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Starts a run and returns the handle of the backend job
    async fn launch(&self, request: &RunRequest) -> Result<JobHandle>;

    /// Fetches the raw status payload of a job
    async fn fetch_status(&self, job: &JobHandle) -> Result<RawStatusPayload>;
}

#[async_trait]
impl AgentApi for AgentClient {
    async fn launch(&self, request: &RunRequest) -> Result<JobHandle> {
        self.launch_run(request).await
    }

    async fn fetch_status(&self, job: &JobHandle) -> Result<RawStatusPayload> {
        self.get_status(job).await
    }
}
