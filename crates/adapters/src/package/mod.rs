// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installed-package/storage manager adapter

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePackageAdapter, PackageCall};

use alm_core::AppId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from storage provisioning
#[derive(Debug, Error, Clone)]
pub enum PackageAdapterError {
    #[error("package manager unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
}

/// Adapter for per-application persistent storage provisioning.
///
/// Optional on the launch path: applications without a private-data image
/// never touch it.
#[async_trait]
pub trait PackageAdapter: Clone + Send + Sync + 'static {
    /// Create (or reuse) the application's data volume; returns its mount
    /// path.
    async fn create_storage(
        &self,
        app_id: &AppId,
        size_kb: u64,
    ) -> Result<String, PackageAdapterError>;

    /// Delete the application's data volume.
    async fn delete_storage(&self, app_id: &AppId) -> Result<(), PackageAdapterError>;
}
