//! Devpilot Core
//!
//! Core types and the status normalizer for the devpilot agent client.
//!
//! This crate contains:
//! - Domain types: run requests, job handles, statuses and view models
//! - DTOs: wire shapes exchanged with the agent backend
//! - Normalizer: maps raw status payloads onto stable view models

pub mod domain;
pub mod dto;
pub mod normalize;

pub use domain::RawStatusPayload;
pub use normalize::{failure_message, normalize};
