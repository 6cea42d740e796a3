//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod run;
mod status;

pub use run::RunArgs;

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the agent against a repository and follow the run
    Run(RunArgs),
    /// Follow a job that is already running
    Watch {
        /// Job ID returned when the run was launched
        job_id: String,

        /// Print the final state as JSON instead of panels
        #[arg(long)]
        json: bool,
    },
    /// Fetch a job's status once
    Status {
        /// Job ID returned when the run was launched
        job_id: String,

        /// Print the normalized status as JSON instead of panels
        #[arg(long, conflicts_with = "raw")]
        json: bool,

        /// Print the payload exactly as the backend returned it
        #[arg(long)]
        raw: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// The process exit code: failure when the run ended with an error
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::Run(args) => run::handle_run(args, config).await,
        Commands::Watch { job_id, json } => run::handle_watch(&job_id, json, config).await,
        Commands::Status { job_id, json, raw } => {
            status::handle_status(&job_id, json, raw, config).await
        }
    }
}
