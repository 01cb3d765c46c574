// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake intent gateway for testing

use super::{IntentAdapter, IntentAdapterError};
use alm_core::AppId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded intent call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentCall {
    pub app_id: AppId,
    pub intent: String,
}

struct FakeIntentState {
    calls: Vec<IntentCall>,
    fail_next: Option<String>,
}

/// Fake intent adapter recording calls.
#[derive(Clone)]
pub struct FakeIntentAdapter {
    inner: Arc<Mutex<FakeIntentState>>,
}

impl Default for FakeIntentAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeIntentState {
                calls: Vec::new(),
                fail_next: None,
            })),
        }
    }
}

impl FakeIntentAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next `send_intent` to fail.
    pub fn fail_next(&self, reason: &str) {
        self.inner.lock().fail_next = Some(reason.to_string());
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<IntentCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl IntentAdapter for FakeIntentAdapter {
    async fn send_intent(&self, app_id: &AppId, intent: &str) -> Result<(), IntentAdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(IntentCall {
            app_id: app_id.clone(),
            intent: intent.to_string(),
        });
        if let Some(reason) = state.fail_next.take() {
            return Err(IntentAdapterError::Failed(reason));
        }
        Ok(())
    }
}
