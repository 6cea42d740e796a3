//! Devpilot CLI
//!
//! Command-line dashboard for the autonomous CI-fixing agent: launches
//! runs, follows them until they finish and renders the results.

mod commands;
mod config;
mod render;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "devpilot")]
#[command(about = "Autonomous DevOps agent dashboard", long_about = None)]
struct Cli {
    /// Agent backend URL
    #[arg(
        long,
        env = "DEVPILOT_BACKEND_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    backend_url: String,

    /// Seconds between two status polls
    #[arg(long, env = "DEVPILOT_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Timeout for a single HTTP request, in seconds
    #[arg(long, env = "DEVPILOT_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Log what the client is doing
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "devpilot=info,devpilot_cli=info,devpilot_session=info,devpilot_client=info"
    } else {
        "devpilot=warn,devpilot_cli=warn,devpilot_session=warn,devpilot_client=warn"
    };

    // Logs go to stderr so they never mix with rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        backend_url: cli.backend_url,
        poll_interval: Duration::from_secs(cli.poll_interval),
        request_timeout: Duration::from_secs(cli.request_timeout),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
