// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake storage adapter for testing

use super::{PackageAdapter, PackageAdapterError};
use alm_core::AppId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded package call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageCall {
    CreateStorage(AppId, u64),
    DeleteStorage(AppId),
}

/// Fake package adapter recording calls.
#[derive(Clone, Default)]
pub struct FakePackageAdapter {
    calls: Arc<Mutex<Vec<PackageCall>>>,
}

impl FakePackageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<PackageCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PackageAdapter for FakePackageAdapter {
    async fn create_storage(
        &self,
        app_id: &AppId,
        size_kb: u64,
    ) -> Result<String, PackageAdapterError> {
        self.calls
            .lock()
            .push(PackageCall::CreateStorage(app_id.clone(), size_kb));
        Ok(format!("/media/apps/{}/data", app_id))
    }

    async fn delete_storage(&self, app_id: &AppId) -> Result<(), PackageAdapterError> {
        self.calls
            .lock()
            .push(PackageCall::DeleteStorage(app_id.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
