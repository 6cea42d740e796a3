//! Data Transfer Objects for the agent backend
//!
//! Wire shapes of the launch endpoint. Status payloads are not typed here;
//! they stay raw JSON maps until the normalizer sees them.

pub mod run;
