//! Core domain types
//!
//! This module contains the structures shared by the client, the polling
//! session and the CLI. Raw backend payloads come in as JSON maps and leave
//! the normalizer as the view models defined here.

pub mod request;
pub mod status;
pub mod view;

pub use request::{JobHandle, RequestError, RunRequest};
pub use status::{CiStatus, FixStatus, JobStatus};
pub use view::{FixRecord, RunSummary, Score, StatusView, TimelineEntry};

/// One status payload exactly as the backend returned it
pub type RawStatusPayload = serde_json::Map<String, serde_json::Value>;
