// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation-intent gateway adapter

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeIntentAdapter, IntentCall};

use alm_core::AppId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from intent delivery
#[derive(Debug, Error, Clone)]
pub enum IntentAdapterError {
    #[error("intent gateway unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
}

/// Adapter for the intent gateway that forwards deeplinks to running
/// applications.
#[async_trait]
pub trait IntentAdapter: Clone + Send + Sync + 'static {
    async fn send_intent(&self, app_id: &AppId, intent: &str) -> Result<(), IntentAdapterError>;
}
