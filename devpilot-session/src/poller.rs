//! Job status poller
//!
//! Polls the backend for one job's status on a fixed period until the job
//! reaches a terminal status or the poller is stopped. Each tick's request
//! finishes before the next tick is scheduled, so requests never overlap.

use std::sync::Arc;

use devpilot_client::{AgentApi, ClientError};
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{JobHandle, StatusView};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::PollConfig;

/// Receiver of everything a poller observes
pub trait PollSink: Send + Sync {
    /// A status payload arrived and was normalized
    fn on_update(&self, view: StatusView);

    /// The job reached a terminal status; called right after the last
    /// [`on_update`](PollSink::on_update)
    fn on_terminal(&self, payload: RawStatusPayload);

    /// A poll request failed; polling continues
    fn on_transport_error(&self, error: ClientError);
}

/// Polls one job until it finishes
pub struct Poller {
    api: Arc<dyn AgentApi>,
    job: JobHandle,
    config: PollConfig,
    sink: Arc<dyn PollSink>,
}

impl Poller {
    /// Creates a new poller
    pub fn new(
        api: Arc<dyn AgentApi>,
        job: JobHandle,
        config: PollConfig,
        sink: Arc<dyn PollSink>,
    ) -> Self {
        Self {
            api,
            job,
            config,
            sink,
        }
    }

    /// Spawns the polling loop. The first poll fires immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> PollHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let job = self.job.clone();
        let task = tokio::spawn(self.run(stop_rx));

        PollHandle {
            job,
            stop: stop_tx,
            task,
        }
    }

    async fn run(self, mut stop: watch::Receiver<bool>) {
        info!(
            "Polling job {} (interval: {:?})",
            self.job,
            self.config.interval()
        );

        let mut ticker = time::interval(self.config.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => {}
                _ = ticker.tick() => {}
            }

            if is_stopped(&stop) {
                break;
            }

            debug!("Polling status of job {}", self.job);

            let result = self.api.fetch_status(&self.job).await;

            // A stop that arrived mid-request wins over whatever came back
            if is_stopped(&stop) {
                debug!("Discarding poll result for stopped job {}", self.job);
                break;
            }

            let payload = match result {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Status poll for job {} failed: {}", self.job, e);
                    self.sink.on_transport_error(e);
                    continue;
                }
            };

            let view = devpilot_core::normalize(&payload);
            let terminal = view.status.is_terminal();
            let status = view.status.clone();
            self.sink.on_update(view);

            if terminal {
                info!("Job {} finished with status: {}", self.job, status);
                self.sink.on_terminal(payload);
                break;
            }
        }

        debug!("Stopped polling job {}", self.job);
    }
}

/// Stopped explicitly, or the handle was dropped
fn is_stopped(stop: &watch::Receiver<bool>) -> bool {
    if stop.has_changed().is_err() {
        return true;
    }
    let stopped = *stop.borrow();
    stopped
}

/// Handle to a running poller
///
/// Dropping the handle stops the poller as well.
#[derive(Debug)]
pub struct PollHandle {
    job: JobHandle,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// The job being polled
    pub fn job(&self) -> &JobHandle {
        &self.job
    }

    /// Stops polling. Safe to call any number of times.
    ///
    /// A request already in flight is not cancelled, but its result is
    /// dropped.
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }

    /// True once the polling loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the polling loop to exit
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!("Poller task for job {} panicked: {}", self.job, e);
        }
    }
}
