//! Configuration module
//!
//! Handles CLI configuration: where the backend lives, how often to poll
//! it and how long a single request may take.

use std::time::Duration;

use anyhow::{Context, Result};
use devpilot_client::AgentClient;
use devpilot_session::PollConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the agent backend
    pub backend_url: String,

    /// How often to poll a running job
    pub poll_interval: Duration,

    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.is_empty() {
            anyhow::bail!("backend_url cannot be empty");
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            anyhow::bail!("backend_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    pub fn poll_config(&self) -> Result<PollConfig> {
        PollConfig::new(self.poll_interval).context("Invalid poll interval")
    }

    /// Builds a backend client honouring the request timeout
    pub fn client(&self) -> Result<AgentClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(AgentClient::with_client(&self.backend_url, http_client))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8000".to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}
