// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Window/compositor manager adapter

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DisplayCall, FakeDisplayAdapter};

use alm_core::AppInstanceId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from compositor operations
#[derive(Debug, Error, Clone)]
pub enum DisplayAdapterError {
    /// The collaborator could not be reached after the retry budget.
    #[error("window manager unavailable: {0}")]
    Unavailable(String),
    /// The collaborator rejected or failed the request.
    #[error("{0}")]
    Failed(String),
}

/// Notifications delivered by the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// First frame rendered for the instance.
    Ready { app_instance_id: AppInstanceId },
    UserInactivity,
    Disconnect,
}

/// Adapter for the window/compositor manager collaborator.
#[async_trait]
pub trait DisplayAdapter: Clone + Send + Sync + 'static {
    /// Create a display surface; `params_json` carries the client name and
    /// the wayland display name.
    async fn create_display(&self, params_json: &str) -> Result<(), DisplayAdapterError>;

    /// Enable or disable rendering for the instance's surface.
    async fn enable_render(
        &self,
        id: &AppInstanceId,
        enable: bool,
    ) -> Result<(), DisplayAdapterError>;

    /// Whether the instance has produced its first frame.
    async fn render_ready(&self, id: &AppInstanceId) -> Result<bool, DisplayAdapterError>;
}
