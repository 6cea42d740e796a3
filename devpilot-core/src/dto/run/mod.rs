//! Run launch DTOs

use serde::{Deserialize, Serialize};

use crate::domain::request::{JobHandle, RunRequest};

/// Body of `POST /run-agent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRun {
    pub github_url: String,
    pub team_name: String,
    pub leader_name: String,
}

impl From<&RunRequest> for LaunchRun {
    fn from(request: &RunRequest) -> Self {
        LaunchRun {
            github_url: request.repository_url().to_string(),
            team_name: request.team_name().to_string(),
            leader_name: request.leader_name().to_string(),
        }
    }
}

/// Response body of `POST /run-agent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAccepted {
    pub job_id: String,
}

impl LaunchAccepted {
    /// The job handle, or `None` when the backend sent a blank id
    pub fn into_handle(self) -> Option<JobHandle> {
        if self.job_id.trim().is_empty() {
            None
        } else {
            Some(JobHandle::new(self.job_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_launch_body_uses_backend_field_names() {
        let request = RunRequest::new("https://x/y", "T", "L").unwrap();
        let body = serde_json::to_value(LaunchRun::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({"githubUrl": "https://x/y", "teamName": "T", "leaderName": "L"})
        );
    }

    #[test]
    fn test_accepted_requires_job_id() {
        let accepted: LaunchAccepted = serde_json::from_value(json!({"jobId": "abc"})).unwrap();
        assert_eq!(accepted.into_handle(), Some(JobHandle::new("abc")));

        assert!(serde_json::from_value::<LaunchAccepted>(json!({"id": "abc"})).is_err());
        assert!(serde_json::from_value::<LaunchAccepted>(json!({"jobId": 7})).is_err());

        let blank: LaunchAccepted = serde_json::from_value(json!({"jobId": ""})).unwrap();
        assert_eq!(blank.into_handle(), None);
    }
}
