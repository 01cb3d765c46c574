// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake compositor adapter for testing

use super::{DisplayAdapter, DisplayAdapterError, DisplayEvent};
use alm_core::AppInstanceId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    CreateDisplay(String),
    EnableRender(AppInstanceId, bool),
    RenderReady(AppInstanceId),
}

struct FakeDisplayState {
    calls: Vec<DisplayCall>,
    render_ready: bool,
    fail_create: Option<String>,
    events: Option<mpsc::UnboundedSender<DisplayEvent>>,
}

/// Fake display adapter recording calls.
#[derive(Clone)]
pub struct FakeDisplayAdapter {
    inner: Arc<Mutex<FakeDisplayState>>,
}

impl Default for FakeDisplayAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeDisplayState {
                calls: Vec::new(),
                render_ready: true,
                fail_create: None,
                events: None,
            })),
        }
    }
}

impl FakeDisplayAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire the adapter to the engine's display-event channel.
    pub fn connect_events(&self, tx: mpsc::UnboundedSender<DisplayEvent>) {
        self.inner.lock().events = Some(tx);
    }

    /// Control what `render_ready` reports (defaults to true).
    pub fn set_render_ready(&self, ready: bool) {
        self.inner.lock().render_ready = ready;
    }

    /// Script the next `create_display` to fail.
    pub fn fail_create_display(&self, reason: &str) {
        self.inner.lock().fail_create = Some(reason.to_string());
    }

    /// Deliver a first-frame notification as the compositor would.
    pub fn emit_ready(&self, id: &AppInstanceId) {
        if let Some(tx) = self.inner.lock().events.as_ref() {
            let _ = tx.send(DisplayEvent::Ready {
                app_instance_id: id.clone(),
            });
        }
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl DisplayAdapter for FakeDisplayAdapter {
    async fn create_display(&self, params_json: &str) -> Result<(), DisplayAdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(DisplayCall::CreateDisplay(params_json.to_string()));
        if let Some(reason) = state.fail_create.take() {
            return Err(DisplayAdapterError::Failed(reason));
        }
        Ok(())
    }

    async fn enable_render(
        &self,
        id: &AppInstanceId,
        enable: bool,
    ) -> Result<(), DisplayAdapterError> {
        self.inner
            .lock()
            .calls
            .push(DisplayCall::EnableRender(id.clone(), enable));
        Ok(())
    }

    async fn render_ready(&self, id: &AppInstanceId) -> Result<bool, DisplayAdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(DisplayCall::RenderReady(id.clone()));
        Ok(state.render_ready)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
