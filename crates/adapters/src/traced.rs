// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::display::{DisplayAdapter, DisplayAdapterError};
use crate::runtime::{RunRequest, RuntimeAdapter, RuntimeAdapterError, RuntimeState};
use alm_core::AppInstanceId;
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any RuntimeAdapter
#[derive(Clone)]
pub struct TracedRuntime<R> {
    inner: R,
}

impl<R> TracedRuntime<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: RuntimeAdapter> RuntimeAdapter for TracedRuntime<R> {
    async fn run(&self, request: RunRequest) -> Result<(), RuntimeAdapterError> {
        let id = request.app_instance_id.clone();
        async {
            tracing::info!(
                app_path = %request.app_path,
                env_count = request.env.len(),
                "starting container"
            );
            let start = std::time::Instant::now();
            let result = self.inner.run(request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "container run accepted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "run failed"),
            }
            result
        }
        .instrument(tracing::info_span!("runtime.run", instance = %id))
        .await
    }

    async fn suspend(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.suspend(id).await;
        if let Err(ref e) = result {
            tracing::error!(instance = %id, error = %e, "suspend failed");
        }
        result
    }

    async fn resume(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.resume(id).await;
        if let Err(ref e) = result {
            tracing::error!(instance = %id, error = %e, "resume failed");
        }
        result
    }

    async fn hibernate(&self, id: &AppInstanceId, options: &str) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.hibernate(id, options).await;
        if let Err(ref e) = result {
            tracing::error!(instance = %id, error = %e, "hibernate failed");
        }
        result
    }

    async fn wake(
        &self,
        id: &AppInstanceId,
        state: RuntimeState,
    ) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.wake(id, state).await;
        if let Err(ref e) = result {
            tracing::error!(instance = %id, ?state, error = %e, "wake failed");
        }
        result
    }

    async fn terminate(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.terminate(id).await;
        tracing::info_span!("runtime.terminate", instance = %id).in_scope(|| match &result {
            Ok(()) => tracing::info!("terminate accepted"),
            Err(e) => tracing::warn!(error = %e, "terminate failed"),
        });
        result
    }

    async fn kill(&self, id: &AppInstanceId) -> Result<(), RuntimeAdapterError> {
        let result = self.inner.kill(id).await;
        tracing::info_span!("runtime.kill", instance = %id).in_scope(|| match &result {
            Ok(()) => tracing::info!("killed"),
            Err(e) => tracing::warn!(error = %e, "kill failed"),
        });
        result
    }

    async fn get_info(&self, id: &AppInstanceId) -> Result<String, RuntimeAdapterError> {
        let result = self.inner.get_info(id).await;
        tracing::trace!(instance = %id, ok = result.is_ok(), "queried runtime stats");
        result
    }
}

/// Wrapper that adds tracing to any DisplayAdapter
#[derive(Clone)]
pub struct TracedDisplay<D> {
    inner: D,
}

impl<D> TracedDisplay<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: DisplayAdapter> DisplayAdapter for TracedDisplay<D> {
    async fn create_display(&self, params_json: &str) -> Result<(), DisplayAdapterError> {
        let result = self.inner.create_display(params_json).await;
        tracing::info_span!("display.create").in_scope(|| match &result {
            Ok(()) => tracing::info!("display created"),
            Err(e) => tracing::error!(error = %e, "create_display failed"),
        });
        result
    }

    async fn enable_render(
        &self,
        id: &AppInstanceId,
        enable: bool,
    ) -> Result<(), DisplayAdapterError> {
        let result = self.inner.enable_render(id, enable).await;
        match &result {
            Ok(()) => tracing::info!(instance = %id, enable, "render toggled"),
            Err(e) => tracing::error!(instance = %id, enable, error = %e, "enable_render failed"),
        }
        result
    }

    async fn render_ready(&self, id: &AppInstanceId) -> Result<bool, DisplayAdapterError> {
        let result = self.inner.render_ready(id).await;
        tracing::trace!(instance = %id, ready = ?result.as_ref().ok(), "checked first frame");
        result
    }
}
