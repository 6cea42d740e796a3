//! Error types for the run session
//!
//! None of these escape the store: they are rendered into
//! [`RunState`](crate::RunState) instead.

use devpilot_client::ClientError;
use thiserror::Error;

/// Ways an agent run can go wrong
#[derive(Debug, Error)]
pub enum RunError {
    /// The launch request could not be completed or returned no job id
    #[error("Failed to run agent")]
    Launch(#[source] ClientError),

    /// A single status poll failed; polling carries on
    #[error("Status poll failed: {0}")]
    PollTransport(#[source] ClientError),

    /// The backend reported the job as failed
    #[error("{0}")]
    RunFailed(String),
}

impl RunError {
    /// Failure reported by the backend, with a fallback when it sent no message
    pub fn run_failed(message: Option<String>) -> Self {
        Self::RunFailed(message.unwrap_or_else(|| "Run failed".to_string()))
    }
}

/// Invalid session configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than 0")]
    ZeroPollInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_hides_backend_detail() {
        let err = RunError::Launch(ClientError::api_error(422, "githubUrl missing"));
        assert_eq!(err.to_string(), "Failed to run agent");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_run_failed_fallback() {
        assert_eq!(RunError::run_failed(None).to_string(), "Run failed");
        assert_eq!(
            RunError::run_failed(Some("build broke".into())).to_string(),
            "build broke"
        );
    }

    #[test]
    fn test_poll_transport_message() {
        let err = RunError::PollTransport(ClientError::ParseError("not json".into()));
        assert_eq!(
            err.to_string(),
            "Status poll failed: Failed to parse response: not json"
        );
    }
}
