// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapter

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRuntimeAdapter, RuntimeCall};

use alm_core::{AppInstanceId, LifecycleState};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from container runtime operations
#[derive(Debug, Error, Clone)]
pub enum RuntimeAdapterError {
    /// The collaborator could not be reached after the retry budget.
    #[error("container runtime unavailable: {0}")]
    Unavailable(String),
    /// The collaborator rejected or failed the request.
    #[error("{0}")]
    Failed(String),
}

/// Container state as reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeState {
    Unknown,
    Starting,
    Running,
    Suspended,
    Hibernated,
}

impl RuntimeState {
    /// Map a wake target expressed as a lifecycle state onto the runtime's
    /// own state vocabulary.
    pub fn from_wake_target(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Suspended => RuntimeState::Suspended,
            LifecycleState::Paused | LifecycleState::Active => RuntimeState::Running,
            _ => RuntimeState::Unknown,
        }
    }
}

/// Everything the runtime needs to launch a container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunRequest {
    pub app_instance_id: AppInstanceId,
    pub app_path: String,
    pub runtime_path: String,
    /// `NAME=value` lines for the container environment.
    pub env: Vec<String>,
    pub uid: u32,
    pub gid: u32,
    /// Host ports forwarded into the container.
    pub ports: Vec<u16>,
    /// Host paths the container may touch (e.g. the wayland runtime dir).
    pub paths: Vec<String>,
    pub debug: bool,
    /// Serialized container launch descriptor.
    pub container_spec: String,
}

/// Notifications delivered by the runtime, tagged by instance id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    Started {
        app_instance_id: AppInstanceId,
    },
    Terminated {
        app_instance_id: AppInstanceId,
    },
    StateChanged {
        app_instance_id: AppInstanceId,
        state: RuntimeState,
    },
    Failure {
        app_instance_id: AppInstanceId,
        error_code: String,
    },
}

/// Adapter for the container runtime collaborator.
///
/// Implementations translate these typed requests to the collaborator's wire
/// form and forward its notifications as [`RuntimeEvent`]s over the channel
/// the engine hands them at startup.
#[async_trait]
pub trait RuntimeAdapter: Clone + Send + Sync + 'static {
    /// Launch a container for the instance.
    async fn run(&self, request: RunRequest) -> Result<(), RuntimeAdapterError>;

    /// Freeze a running container.
    async fn suspend(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError>;

    /// Thaw a suspended container.
    async fn resume(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError>;

    /// Checkpoint a suspended container to storage.
    async fn hibernate(&self, id: &AppInstanceId, options: &str) -> Result<(), RuntimeAdapterError>;

    /// Restore a hibernated container into the given state.
    async fn wake(&self, id: &AppInstanceId, state: RuntimeState)
        -> Result<(), RuntimeAdapterError>;

    /// Ask the container to exit gracefully.
    async fn terminate(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError>;

    /// Destroy the container immediately.
    async fn kill(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError>;

    /// Runtime statistics for the instance, as an opaque string.
    async fn get_info(&self, id: &AppInstanceId) -> Result<String, RuntimeAdapterError>;
}
