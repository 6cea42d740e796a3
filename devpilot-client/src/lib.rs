//! Devpilot HTTP Client
//!
//! A small, type-safe HTTP client for the autonomous agent backend.
//!
//! The backend exposes exactly two endpoints: one that launches a run and
//! hands back a job id, and one that reports the job's status. Both are
//! reachable through [`AgentClient`] directly or through the [`AgentApi`]
//! trait, which is what the polling session depends on.
//!
//! # Example
//!
//! ```no_run
//! use devpilot_client::AgentClient;
//! use devpilot_core::domain::RunRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AgentClient::new("http://127.0.0.1:8000");
//!
//!     let request = RunRequest::new("https://github.com/acme/app", "ACME", "Ada")?;
//!     let job = client.launch_run(&request).await?;
//!
//!     let payload = client.get_status(&job).await?;
//!     println!("Job {} status: {:?}", job, payload.get("status"));
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod runs;

// Re-export commonly used types
pub use api::AgentApi;
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the agent backend
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl AgentClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend (e.g., "http://127.0.0.1:8000")
    ///
    /// # Example
    /// ```
    /// use devpilot_client::AgentClient;
    ///
    /// let client = AgentClient::new("http://127.0.0.1:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use devpilot_client::AgentClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = AgentClient::with_client("http://127.0.0.1:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
