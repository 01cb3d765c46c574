// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake container runtime adapter for testing

use super::{RunRequest, RuntimeAdapter, RuntimeAdapterError, RuntimeEvent, RuntimeState};
use alm_core::AppInstanceId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded runtime call
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCall {
    Run(RunRequest),
    Suspend(AppInstanceId),
    Resume(AppInstanceId),
    Hibernate(AppInstanceId, String),
    Wake(AppInstanceId, RuntimeState),
    Terminate(AppInstanceId),
    Kill(AppInstanceId),
    GetInfo(AppInstanceId),
}

struct FakeRuntimeState {
    calls: Vec<RuntimeCall>,
    /// Scripted failures consumed in FIFO order, keyed by operation name.
    failures: VecDeque<(String, RuntimeAdapterError)>,
    events: Option<mpsc::UnboundedSender<RuntimeEvent>>,
    /// When set, `run` acknowledges with `StateChanged(Running)` and
    /// `terminate`/`kill` with `Terminated`, so gate waits resolve without
    /// a real collaborator.
    auto_ack: bool,
    info: String,
}

/// Fake runtime adapter recording calls and optionally self-acknowledging.
#[derive(Clone)]
pub struct FakeRuntimeAdapter {
    inner: Arc<Mutex<FakeRuntimeState>>,
}

impl Default for FakeRuntimeAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRuntimeState {
                calls: Vec::new(),
                failures: VecDeque::new(),
                events: None,
                auto_ack: false,
                info: "{}".to_string(),
            })),
        }
    }
}

impl FakeRuntimeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the adapter to the engine's runtime-event channel.
    pub fn connect_events(&self, tx: mpsc::UnboundedSender<RuntimeEvent>) {
        self.inner.lock().events = Some(tx);
    }

    /// Enable self-acknowledgement of `run`/`terminate`/`kill`.
    pub fn auto_ack(&self) {
        self.inner.lock().auto_ack = true;
    }

    /// Script the next call to `op` ("run", "suspend", ...) to fail.
    pub fn fail_next(&self, op: &str, reason: &str) {
        self.inner.lock().failures.push_back((
            op.to_string(),
            RuntimeAdapterError::Failed(reason.to_string()),
        ));
    }

    /// Set the string `get_info` returns.
    pub fn set_info(&self, info: &str) {
        self.inner.lock().info = info.to_string();
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.lock().calls.clone()
    }

    /// Deliver a notification as the collaborator would.
    pub fn emit(&self, event: RuntimeEvent) {
        if let Some(tx) = self.inner.lock().events.as_ref() {
            let _ = tx.send(event);
        }
    }

    fn record(&self, call: RuntimeCall, op: &str) -> Result<(), RuntimeAdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(call);
        if let Some(pos) = state.failures.iter().position(|(name, _)| name == op) {
            if let Some((_, error)) = state.failures.remove(pos) {
                return Err(error);
            }
        }
        Ok(())
    }

    fn ack(&self, event: RuntimeEvent) {
        let state = self.inner.lock();
        if !state.auto_ack {
            return;
        }
        if let Some(tx) = state.events.as_ref() {
            let _ = tx.send(event);
        }
    }
}

#[async_trait]
impl RuntimeAdapter for FakeRuntimeAdapter {
    async fn run(&self, request: RunRequest) -> Result<(), RuntimeAdapterError> {
        let id = request.app_instance_id.clone();
        self.record(RuntimeCall::Run(request), "run")?;
        self.ack(RuntimeEvent::StateChanged {
            app_instance_id: id,
            state: RuntimeState::Running,
        });
        Ok(())
    }

    async fn suspend(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        self.record(RuntimeCall::Suspend(id.clone()), "suspend")
    }

    async fn resume(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        self.record(RuntimeCall::Resume(id.clone()), "resume")
    }

    async fn hibernate(&self, id: &AppInstanceId, options: &str) -> Result<(), RuntimeAdapterError> {
        self.record(
            RuntimeCall::Hibernate(id.clone(), options.to_string()),
            "hibernate",
        )
    }

    async fn wake(
        &self,
        id: &AppInstanceId,
        state: RuntimeState,
    ) -> Result<(), RuntimeAdapterError> {
        self.record(RuntimeCall::Wake(id.clone(), state), "wake")
    }

    async fn terminate(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        self.record(RuntimeCall::Terminate(id.clone()), "terminate")?;
        self.ack(RuntimeEvent::Terminated {
            app_instance_id: id.clone(),
        });
        Ok(())
    }

    async fn kill(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        self.record(RuntimeCall::Kill(id.clone()), "kill")?;
        self.ack(RuntimeEvent::Terminated {
            app_instance_id: id.clone(),
        });
        Ok(())
    }

    async fn get_info(&self, id: &AppInstanceId) -> Result<String, RuntimeAdapterError> {
        self.record(RuntimeCall::GetInfo(id.clone()), "get_info")?;
        Ok(self.inner.lock().info.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
