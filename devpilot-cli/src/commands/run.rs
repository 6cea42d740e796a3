//! Run and watch command handlers
//!
//! Both drive a [`RunStore`] and render its state as it changes, until the
//! run settles or the user interrupts.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use devpilot_core::domain::{JobHandle, RunRequest};
use devpilot_session::{RunState, RunStore};
use tracing::info;

use crate::config::Config;
use crate::render::{self, Progress};

/// Exit code of a run the user interrupted with Ctrl-C
const INTERRUPTED: u8 = 130;

/// Arguments of the `run` command
#[derive(Args)]
pub struct RunArgs {
    /// GitHub repository URL
    #[arg(long)]
    pub repo_url: String,

    /// Team name
    #[arg(long)]
    pub team: String,

    /// Team leader name
    #[arg(long)]
    pub leader: String,

    /// Print the final state as JSON instead of panels
    #[arg(long)]
    pub json: bool,
}

/// How following a run ended
enum Followed {
    Settled(RunState),
    Interrupted(RunState),
}

/// Launch a run and follow it to the end
pub async fn handle_run(args: RunArgs, config: &Config) -> Result<ExitCode> {
    let request =
        RunRequest::new(args.repo_url, args.team, args.leader).context("Incomplete run request")?;
    let store = new_store(config)?;

    if !args.json {
        render::print_launch(&request);
    }

    store.submit_run(request).await;
    let followed = follow(&store, args.json).await;
    finish(followed, args.json)
}

/// Follow an already launched job to the end
pub async fn handle_watch(job_id: &str, json: bool, config: &Config) -> Result<ExitCode> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        anyhow::bail!("job ID cannot be empty");
    }
    let store = new_store(config)?;

    if !json {
        println!("{} {}", "Watching job".bold(), job_id.cyan());
    }

    store.watch_job(JobHandle::new(job_id));
    let followed = follow(&store, json).await;
    finish(followed, json)
}

fn new_store(config: &Config) -> Result<RunStore> {
    let client = config.client()?;
    Ok(RunStore::new(Arc::new(client), config.poll_config()?))
}

/// Renders progress on every state change until the run settles
async fn follow(store: &RunStore, quiet: bool) -> Followed {
    let mut updates = store.subscribe();
    let mut progress = Progress::default();

    loop {
        let state = updates.borrow_and_update().clone();
        if !quiet {
            progress.observe(&state);
        }
        if state.is_settled() {
            return Followed::Settled(state);
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    return Followed::Settled(store.snapshot());
                }
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                info!("Interrupted, no longer polling");
                store.cancel();
                return Followed::Interrupted(store.snapshot());
            }
        }
    }
}

fn finish(followed: Followed, json: bool) -> Result<ExitCode> {
    let (state, interrupted) = match followed {
        Followed::Settled(state) => (state, false),
        Followed::Interrupted(state) => (state, true),
    };

    if json {
        let output =
            serde_json::to_string_pretty(&state).context("Failed to serialize run state")?;
        println!("{}", output);
    } else {
        println!();
        render::print_run(&state);
        if interrupted {
            println!(
                "{}",
                "Stopped following; the job keeps running on the backend.".yellow()
            );
        }
    }

    if interrupted {
        return Ok(ExitCode::from(INTERRUPTED));
    }

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
