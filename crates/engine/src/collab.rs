// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator event pump: translates runtime and compositor
//! notifications into gate signals on the owning context.

use crate::registry::{IdKind, Registry};
use alm_adapters::{DisplayEvent, RuntimeEvent, RuntimeState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub(crate) fn spawn_pump(
    registry: Arc<Registry>,
    mut runtime_rx: mpsc::UnboundedReceiver<RuntimeEvent>,
    mut display_rx: mpsc::UnboundedReceiver<DisplayEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = runtime_rx.recv() => match event {
                    None => break,
                    Some(event) => on_runtime_event(&registry, event),
                },
                event = display_rx.recv() => match event {
                    None => break,
                    Some(event) => on_display_event(&registry, event),
                },
            }
        }
        tracing::debug!("collaborator event pump stopped");
    })
}

fn on_runtime_event(registry: &Registry, event: RuntimeEvent) {
    match event {
        RuntimeEvent::StateChanged {
            app_instance_id,
            state: RuntimeState::Running,
        } => {
            let Some(ctx) = registry.find(IdKind::AppInstanceId, app_instance_id.as_str()) else {
                tracing::warn!(instance = %app_instance_id, "running report for unknown instance");
                return;
            };
            tracing::debug!(app = %ctx.app_id, "container running");
            ctx.gates.app_running.post();
        }
        RuntimeEvent::StateChanged {
            app_instance_id,
            state,
        } => {
            tracing::debug!(instance = %app_instance_id, ?state, "container state changed");
        }
        RuntimeEvent::Terminated { app_instance_id } => {
            let Some(ctx) = registry.find(IdKind::AppInstanceId, app_instance_id.as_str()) else {
                tracing::warn!(instance = %app_instance_id, "termination report for unknown instance");
                return;
            };
            tracing::debug!(app = %ctx.app_id, "container terminated");
            ctx.gates.app_terminating.post();
        }
        RuntimeEvent::Started { app_instance_id } => {
            tracing::debug!(instance = %app_instance_id, "container started");
        }
        RuntimeEvent::Failure {
            app_instance_id,
            error_code,
        } => {
            tracing::warn!(instance = %app_instance_id, error_code, "container failure reported");
        }
    }
}

fn on_display_event(registry: &Registry, event: DisplayEvent) {
    match event {
        DisplayEvent::Ready { app_instance_id } => {
            let Some(ctx) = registry.find(IdKind::AppInstanceId, app_instance_id.as_str()) else {
                tracing::warn!(instance = %app_instance_id, "first frame for unknown instance");
                return;
            };
            tracing::debug!(app = %ctx.app_id, "first frame signalled");
            // The compositor reports one ready signal; both waiters (cold
            // activation and resume) rendezvous on it.
            ctx.gates.first_frame.post();
            ctx.gates.first_frame_after_resume.post();
        }
        DisplayEvent::UserInactivity => {
            tracing::debug!("user inactivity reported by window manager");
        }
        DisplayEvent::Disconnect => {
            tracing::warn!("window manager client disconnected");
        }
    }
}

#[cfg(test)]
#[path = "collab_tests.rs"]
mod tests;
