// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-writer request dispatcher.
//!
//! All `current_state` mutations and all state-action side effects happen
//! on one worker task; requests are processed strictly in enqueue order.

use crate::actions;
use crate::error::EngineError;
use crate::events::{EventFanout, StateChangeNotice};
use crate::registry::Registry;
use crate::service::ServiceConfig;
use alm_adapters::{DisplayAdapter, RuntimeAdapter};
use alm_core::{Clock, LifecycleState};
use alm_spec::DeviceDefaults;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Process-wide transition counter; strictly increasing across all apps.
static STATE_CHANGE_ID: AtomicU64 = AtomicU64::new(0);

fn next_state_change_id() -> u64 {
    STATE_CHANGE_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A queued state-change request.
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    /// App id or instance id; resolved against the registry when the
    /// request is picked up.
    pub subject: String,
    pub target: LifecycleState,
}

enum WorkItem {
    Transition(TransitionRequest),
    Barrier(oneshot::Sender<()>),
}

/// Everything the worker needs to execute state actions.
pub(crate) struct WorkerDeps<R, D, C> {
    pub runtime: R,
    pub display: D,
    pub clock: C,
    pub registry: Arc<Registry>,
    pub fanout: Arc<EventFanout>,
    pub device: DeviceDefaults,
    pub config: ServiceConfig,
    pub cancel: CancellationToken,
}

/// Handle to the dispatcher queue.
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<WorkItem>,
}

impl Dispatcher {
    /// Spawn the worker task; the returned handle completes when the
    /// worker drains out after cancellation.
    pub(crate) fn spawn<R, D, C>(deps: WorkerDeps<R, D, C>) -> (Self, JoinHandle<()>)
    where
        R: RuntimeAdapter,
        D: DisplayAdapter,
        C: Clock,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(worker_loop(rx, deps));
        (Self { tx }, handle)
    }

    /// Enqueue a request. Never blocks.
    pub fn enqueue(&self, request: TransitionRequest) -> Result<(), EngineError> {
        self.tx
            .send(WorkItem::Transition(request))
            .map_err(|_| EngineError::Shutdown)
    }

    /// Resolve once every previously enqueued request has been processed.
    pub async fn settle(&self) -> Result<(), EngineError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WorkItem::Barrier(done_tx))
            .map_err(|_| EngineError::Shutdown)?;
        done_rx.await.map_err(|_| EngineError::Shutdown)
    }
}

async fn worker_loop<R, D, C>(mut rx: mpsc::UnboundedReceiver<WorkItem>, deps: WorkerDeps<R, D, C>)
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    loop {
        tokio::select! {
            _ = deps.cancel.cancelled() => break,
            item = rx.recv() => match item {
                None => break,
                Some(WorkItem::Barrier(done)) => {
                    let _ = done.send(());
                }
                Some(WorkItem::Transition(request)) => process(request, &deps).await,
            },
        }
    }
    tracing::info!("dispatcher drained");
}

/// Execute one request: plan the path and walk it step by step.
///
/// A failing step aborts the remainder of the plan; the context stays in
/// the last successfully entered state and the worker moves on to the next
/// request.
async fn process<R, D, C>(request: TransitionRequest, deps: &WorkerDeps<R, D, C>)
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    let Some(ctx) = deps.registry.resolve(&request.subject) else {
        tracing::warn!(subject = %request.subject, "request for unknown application");
        return;
    };

    let current = ctx.current_state();
    let path = match alm_core::plan(current, request.target) {
        Ok(path) => path,
        Err(error) => {
            tracing::warn!(
                app = %ctx.app_id,
                from = %current,
                to = %request.target,
                %error,
                "rejecting transition request"
            );
            return;
        }
    };

    for step in path {
        let old_state = ctx.current_state();
        match actions::enter(step, &ctx, deps).await {
            Ok(()) => {
                let state_change_id = next_state_change_id();
                let since_last = ctx.last_change_elapsed();
                ctx.apply_transition(step, state_change_id, deps.clock.epoch_nanos());
                tracing::info!(
                    app = %ctx.app_id,
                    from = %old_state,
                    to = %step,
                    state_change_id,
                    ?since_last,
                    "state changed"
                );

                let navigation_intent = if step == LifecycleState::Active {
                    ctx.most_recent_intent()
                } else {
                    String::new()
                };
                deps.fanout.publish(StateChangeNotice {
                    app_id: ctx.app_id.clone(),
                    app_instance_id: ctx.app_instance_id(),
                    old_state,
                    new_state: step,
                    navigation_intent,
                    error_reason: String::new(),
                    applied: true,
                });

                // The terminal Unloaded step (reached via Terminating)
                // retires the context.
                if step == LifecycleState::Unloaded && deps.registry.drop_if_terminal(&ctx) {
                    tracing::info!(app = %ctx.app_id, "context retired");
                }
            }
            Err(error) => {
                tracing::warn!(
                    app = %ctx.app_id,
                    step = %step,
                    %error,
                    "state action failed, abandoning plan"
                );
                deps.fanout.publish(StateChangeNotice {
                    app_id: ctx.app_id.clone(),
                    app_instance_id: ctx.app_instance_id(),
                    old_state,
                    new_state: step,
                    navigation_intent: String::new(),
                    error_reason: error.to_string(),
                    applied: false,
                });
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
