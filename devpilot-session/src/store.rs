//! Run store
//!
//! Owns the one [`RunState`] of the session. Every change goes through the
//! state's `watch` channel, which both serializes writers and lets any
//! number of readers follow along.
//!
//! Each run gets a generation number. Poller callbacks carry the
//! generation they were started for, and are dropped if a newer run has
//! begun since, so a slow tick from a replaced run can never leak into the
//! current one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use devpilot_client::{AgentApi, ClientError};
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{JobHandle, RunRequest, StatusView};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::error::RunError;
use crate::poller::{PollHandle, PollSink, Poller};
use crate::state::RunState;

/// Shared handle to the session's run state
///
/// Cloning is cheap; all clones drive the same state.
#[derive(Clone)]
pub struct RunStore {
    api: Arc<dyn AgentApi>,
    config: PollConfig,
    state: Arc<watch::Sender<RunState>>,
    active: Arc<Mutex<ActiveRun>>,
}

/// The run currently allowed to write to the state
#[derive(Default)]
struct ActiveRun {
    generation: u64,
    poller: Option<PollHandle>,
}

impl RunStore {
    pub fn new(api: Arc<dyn AgentApi>, config: PollConfig) -> Self {
        let (state, _) = watch::channel(RunState::default());
        Self {
            api,
            config,
            state: Arc::new(state),
            active: Arc::new(Mutex::new(ActiveRun::default())),
        }
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> RunState {
        self.state.borrow().clone()
    }

    /// Read-only view that is notified on every change
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// True while a poller is attached and has not exited
    pub fn is_polling(&self) -> bool {
        self.lock_active()
            .poller
            .as_ref()
            .is_some_and(|poller| !poller.is_finished())
    }

    /// Starts a new run, replacing any run in progress
    ///
    /// The state is reset before the launch request goes out. Launch
    /// failures end up in [`RunState::error`]; nothing is returned.
    ///
    /// Cancel-safe: the launch runs on its own task, so dropping this
    /// future still lets the run attach or fail. The future resolves once
    /// the launch has been handled.
    pub async fn submit_run(&self, request: RunRequest) {
        let generation = self.begin_run();
        info!(
            "Submitting run {} for {} (team {}, leader {})",
            generation,
            request.repository_url(),
            request.team_name(),
            request.leader_name()
        );

        let store = self.clone();
        let launch = tokio::spawn(async move { store.launch(generation, request).await });
        if let Err(e) = launch.await {
            warn!("Launch task of run {} did not finish: {}", generation, e);
        }
    }

    /// Follows a job that was launched elsewhere, replacing any run in
    /// progress
    ///
    /// Must be called from within a tokio runtime.
    pub fn watch_job(&self, job: JobHandle) {
        let generation = self.begin_run();
        info!("Watching job {} as run {}", job, generation);
        self.attach(generation, job);
    }

    /// Stops the active run's poller and settles the state as it is
    pub fn cancel(&self) {
        let mut active = self.lock_active();
        if let Some(poller) = active.poller.take() {
            info!("Cancelling poll of job {}", poller.job());
            poller.stop();
        }
        active.generation += 1;
        let generation = active.generation;
        self.state.send_modify(|state| {
            state.generation = generation;
            state.loading = false;
        });
    }

    /// Waits until the current run is no longer loading
    pub async fn wait_until_settled(&self) -> RunState {
        let mut updates = self.subscribe();
        let settled = match updates.wait_for(RunState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    async fn launch(&self, generation: u64, request: RunRequest) {
        match self.api.launch(&request).await {
            Ok(job) => {
                info!("Run {} launched as job {}", generation, job);
                self.attach(generation, job);
            }
            Err(e) => {
                warn!("Launching run {} failed: {}", generation, e);
                let error = RunError::Launch(e);
                apply(&self.state, generation, |state| state.fail(&error));
            }
        }
    }

    /// Stops the previous poller, opens a new generation and resets the state
    fn begin_run(&self) -> u64 {
        let mut active = self.lock_active();
        if let Some(previous) = active.poller.take() {
            debug!("Stopping poll of job {} for a new run", previous.job());
            previous.stop();
        }
        active.generation += 1;
        let generation = active.generation;
        self.state.send_replace(RunState::started(generation));
        generation
    }

    /// Records the job and starts polling it, unless a newer run has begun
    fn attach(&self, generation: u64, job: JobHandle) {
        let mut active = self.lock_active();
        if active.generation != generation {
            debug!(
                "Run {} was superseded before job {} could be polled",
                generation, job
            );
            return;
        }

        let job_id = job.job_id().to_string();
        apply(&self.state, generation, |state| state.job_id = Some(job_id));

        let sink = Arc::new(RunSink {
            state: Arc::clone(&self.state),
            generation,
        });
        let poller = Poller::new(Arc::clone(&self.api), job, self.config, sink);
        active.poller = Some(poller.start());
    }

    fn lock_active(&self) -> MutexGuard<'_, ActiveRun> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies `change` only if the state still belongs to `generation`
fn apply(
    state: &watch::Sender<RunState>,
    generation: u64,
    change: impl FnOnce(&mut RunState),
) -> bool {
    state.send_if_modified(|current| {
        if current.generation != generation {
            debug!(
                "Ignoring update from run {} (current run is {})",
                generation, current.generation
            );
            return false;
        }
        change(current);
        true
    })
}

/// Poll sink bound to one run generation
struct RunSink {
    state: Arc<watch::Sender<RunState>>,
    generation: u64,
}

impl PollSink for RunSink {
    fn on_update(&self, view: StatusView) {
        apply(&self.state, self.generation, |state| state.apply_view(view));
    }

    fn on_terminal(&self, payload: RawStatusPayload) {
        apply(&self.state, self.generation, |state| state.finish(payload));
    }

    fn on_transport_error(&self, error: ClientError) {
        let error = RunError::PollTransport(error);
        apply(&self.state, self.generation, |state| {
            state.record_poll_failure(&error)
        });
    }
}
