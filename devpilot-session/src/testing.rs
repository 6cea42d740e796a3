//! Scripted backend and recording sink for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devpilot_client::{AgentApi, ClientError, Result};
use devpilot_core::RawStatusPayload;
use devpilot_core::domain::{JobHandle, RunRequest, StatusView};
use serde_json::{Value, json};
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::poller::PollSink;

/// One scripted answer to a status poll
pub(crate) enum Step {
    Payload(Value),
    Fail,
    /// Hold the request open until the gate is notified
    Gated(Arc<Notify>, Value),
}

impl Step {
    pub(crate) fn payload(value: Value) -> Self {
        Step::Payload(value)
    }
}

/// Backend whose answers are queued up front. Jobs without a script, or
/// whose script ran out, report `running` forever.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    launches: Mutex<VecDeque<Option<String>>>,
    launch_gate: Mutex<Option<Arc<Notify>>>,
    launch_calls: Mutex<Vec<RunRequest>>,
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    polls: Mutex<HashMap<String, Vec<Instant>>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn launch_ok(&self, job_id: &str) {
        self.launches
            .lock()
            .unwrap()
            .push_back(Some(job_id.to_string()));
    }

    pub(crate) fn launch_fail(&self) {
        self.launches.lock().unwrap().push_back(None);
    }

    /// Holds the next launch request open until the returned gate is notified
    pub(crate) fn hold_launch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.launch_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub(crate) fn script(&self, job_id: &str, steps: Vec<Step>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(job_id.to_string())
            .or_default()
            .extend(steps);
    }

    pub(crate) fn script_gated(&self, job_id: &str, payload: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script(job_id, vec![Step::Gated(gate.clone(), payload)]);
        gate
    }

    pub(crate) fn launch_calls(&self) -> Vec<RunRequest> {
        self.launch_calls.lock().unwrap().clone()
    }

    pub(crate) fn polls(&self, job_id: &str) -> usize {
        self.poll_instants(job_id).len()
    }

    pub(crate) fn poll_instants(&self, job_id: &str) -> Vec<Instant> {
        self.polls
            .lock()
            .unwrap()
            .get(job_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AgentApi for ScriptedApi {
    async fn launch(&self, request: &RunRequest) -> Result<JobHandle> {
        self.launch_calls.lock().unwrap().push(request.clone());
        let gate = self.launch_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let next = self.launches.lock().unwrap().pop_front();
        match next {
            Some(Some(job_id)) => Ok(JobHandle::new(job_id)),
            _ => Err(ClientError::api_error(500, "launch refused")),
        }
    }

    async fn fetch_status(&self, job: &JobHandle) -> Result<RawStatusPayload> {
        self.polls
            .lock()
            .unwrap()
            .entry(job.job_id().to_string())
            .or_default()
            .push(Instant::now());

        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(job.job_id())
            .and_then(VecDeque::pop_front);

        let value = match step {
            None => json!({"status": "running"}),
            Some(Step::Payload(value)) => value,
            Some(Step::Fail) => return Err(ClientError::api_error(502, "bad gateway")),
            Some(Step::Gated(gate, value)) => {
                gate.notified().await;
                value
            }
        };

        Ok(value.as_object().cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SinkEvent {
    Update(StatusView),
    Terminal(RawStatusPayload),
    TransportError(String),
}

/// Sink that remembers every callback in order
#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PollSink for RecordingSink {
    fn on_update(&self, view: StatusView) {
        self.events.lock().unwrap().push(SinkEvent::Update(view));
    }

    fn on_terminal(&self, payload: RawStatusPayload) {
        self.events.lock().unwrap().push(SinkEvent::Terminal(payload));
    }

    fn on_transport_error(&self, error: ClientError) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::TransportError(error.to_string()));
    }
}
