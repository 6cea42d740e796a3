//! Devpilot Session
//!
//! Client-side lifecycle of an agent run.
//!
//! Architecture:
//! - Store: owns the single [`RunState`] and is the only place it changes
//! - Poller: fetches a job's status on a fixed period and feeds each
//!   normalized payload back to the store
//! - Configuration: polling period
//!
//! Presentation code observes the state through [`RunStore::subscribe`] and
//! never talks to the backend itself.

pub mod config;
pub mod error;
pub mod poller;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::PollConfig;
pub use error::{ConfigError, RunError};
pub use poller::{PollHandle, PollSink, Poller};
pub use state::RunState;
pub use store::RunStore;
