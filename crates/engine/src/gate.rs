// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-context readiness gates.
//!
//! A gate is the rendezvous between a collaborator notification (single
//! producer on the adapter's task) and the dispatcher (single consumer).
//! Counting-semaphore semantics: every post adds one permit, every wait
//! consumes one, so a notification that arrives before the dispatcher gets
//! there is not lost.

use crate::error::EngineError;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// A single named gate.
pub struct Gate {
    name: &'static str,
    permits: Semaphore,
}

impl Gate {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            permits: Semaphore::new(0),
        }
    }

    /// Record one occurrence of the awaited event.
    pub fn post(&self) {
        self.permits.add_permits(1);
    }

    /// Wait for one occurrence, up to `deadline`. Cancellation wins over
    /// the deadline and reports [`EngineError::Shutdown`].
    pub async fn wait(
        &self,
        deadline: Duration,
        cancel: &CancellationToken,
    ) -> Result<(), EngineError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(EngineError::Shutdown),
            acquired = tokio::time::timeout(deadline, self.permits.acquire()) => match acquired {
                Ok(Ok(permit)) => {
                    permit.forget();
                    Ok(())
                }
                Ok(Err(_)) => Err(EngineError::Shutdown),
                Err(_) => Err(EngineError::Timeout(self.name)),
            },
        }
    }
}

/// The six per-context gates.
pub struct GateSet {
    /// Posted when the context enters `Loading` and owns an instance id.
    pub reached_loading: Gate,
    /// Posted when the runtime reports the container running.
    pub app_running: Gate,
    /// Posted when the application itself signals readiness.
    pub app_ready: Gate,
    /// Posted when the compositor reports the first frame.
    pub first_frame: Gate,
    /// Posted when the compositor reports the first frame after a resume.
    pub first_frame_after_resume: Gate,
    /// Posted when the runtime reports the container terminated.
    pub app_terminating: Gate,
}

impl Default for GateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl GateSet {
    pub fn new() -> Self {
        Self {
            reached_loading: Gate::new("reached_loading"),
            app_running: Gate::new("app_running"),
            app_ready: Gate::new("app_ready"),
            first_frame: Gate::new("first_frame"),
            first_frame_after_resume: Gate::new("first_frame_after_resume"),
            app_terminating: Gate::new("app_terminating"),
        }
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
