//! Run request and job handle

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of a run request that is missing one of its fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A request to run the agent against one repository
///
/// Only constructible through [`RunRequest::new`], so every instance has
/// all three fields filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    repository_url: String,
    team_name: String,
    leader_name: String,
}

impl RunRequest {
    /// Builds a request, trimming each field and rejecting blank ones
    pub fn new(
        repository_url: impl Into<String>,
        team_name: impl Into<String>,
        leader_name: impl Into<String>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            repository_url: required("repository URL", repository_url.into())?,
            team_name: required("team name", team_name.into())?,
            leader_name: required("leader name", leader_name.into())?,
        })
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn leader_name(&self) -> &str {
        &self.leader_name
    }
}

fn required(field: &'static str, value: String) -> Result<String, RequestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RequestError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Identifier of a backend job, as returned by the launch endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle {
    job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl std::fmt::Display for JobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_trimmed_fields() {
        let request = RunRequest::new(" https://github.com/acme/app ", "Rockets", "Ada").unwrap();
        assert_eq!(request.repository_url(), "https://github.com/acme/app");
        assert_eq!(request.team_name(), "Rockets");
        assert_eq!(request.leader_name(), "Ada");
    }

    #[test]
    fn test_request_rejects_blank_fields() {
        assert_eq!(
            RunRequest::new("", "T", "L"),
            Err(RequestError::MissingField("repository URL"))
        );
        assert_eq!(
            RunRequest::new("https://x/y", "   ", "L"),
            Err(RequestError::MissingField("team name"))
        );
        assert_eq!(
            RunRequest::new("https://x/y", "T", ""),
            Err(RequestError::MissingField("leader name"))
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = RequestError::MissingField("team name");
        assert_eq!(err.to_string(), "team name is required");
    }

    #[test]
    fn test_job_handle_exposes_id_through_accessor() {
        let job = JobHandle::new("job-42");
        assert_eq!(job.job_id(), "job-42");
        assert_eq!(job.to_string(), "job-42");
    }
}
