// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observer registration and ordered event fan-out.

use crate::error::EngineError;
use alm_core::{AppId, AppInstanceId, LifecycleEvent, LifecycleState};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Coarse lifecycle notifications.
pub trait LifecycleObserver: Send + Sync + 'static {
    fn on_app_state_changed(&self, app_id: &AppId, state: LifecycleState, error_reason: &str);
}

/// Detailed per-transition notifications.
pub trait StateObserver: Send + Sync + 'static {
    fn on_app_lifecycle_state_changed(
        &self,
        app_id: &AppId,
        app_instance_id: &AppInstanceId,
        old_state: LifecycleState,
        new_state: LifecycleState,
        navigation_intent: &str,
    );
}

/// One completed (or failed) transition step, as submitted by the
/// dispatcher.
#[derive(Debug, Clone)]
pub(crate) struct StateChangeNotice {
    pub app_id: AppId,
    pub app_instance_id: AppInstanceId,
    pub old_state: LifecycleState,
    pub new_state: LifecycleState,
    pub navigation_intent: String,
    pub error_reason: String,
    /// Whether the step was actually applied. Failed steps notify the
    /// lifecycle list with the unchanged state and the error reason, and
    /// skip the detailed list (no legal edge was traversed).
    pub applied: bool,
}

enum FanoutItem {
    Notice(StateChangeNotice),
    Barrier(oneshot::Sender<()>),
}

#[derive(Default)]
struct Observers {
    lifecycle: Vec<Arc<dyn LifecycleObserver>>,
    state: Vec<Arc<dyn StateObserver>>,
}

/// Observer table plus the ordered delivery queue.
///
/// The dispatcher submits notices in transition order; a dedicated task
/// drains the queue, so per-app delivery order always matches the order
/// transitions were applied.
pub struct EventFanout {
    observers: Arc<Mutex<Observers>>,
    tx: mpsc::UnboundedSender<FanoutItem>,
}

impl EventFanout {
    /// Create the fan-out and spawn its delivery task.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let observers = Arc::new(Mutex::new(Observers::default()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let task_observers = Arc::clone(&observers);
        let handle = tokio::spawn(async move {
            while let Some(item) = rx.recv().await {
                match item {
                    FanoutItem::Notice(notice) => deliver(&task_observers, notice),
                    FanoutItem::Barrier(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        (Self { observers, tx }, handle)
    }

    /// Register a lifecycle observer; registering the same observer twice
    /// is a no-op.
    pub fn register_lifecycle(&self, observer: Arc<dyn LifecycleObserver>) {
        let mut observers = self.observers.lock();
        if observers
            .lifecycle
            .iter()
            .any(|o| Arc::ptr_eq(o, &observer))
        {
            return;
        }
        observers.lifecycle.push(observer);
    }

    /// Unregister a lifecycle observer; unknown observers are an error.
    pub fn unregister_lifecycle(
        &self,
        observer: &Arc<dyn LifecycleObserver>,
    ) -> Result<(), EngineError> {
        let mut observers = self.observers.lock();
        let before = observers.lifecycle.len();
        observers.lifecycle.retain(|o| !Arc::ptr_eq(o, observer));
        if observers.lifecycle.len() == before {
            return Err(EngineError::InvalidArgument(
                "observer not registered".to_string(),
            ));
        }
        Ok(())
    }

    /// Register a state observer; registering the same observer twice is a
    /// no-op.
    pub fn register_state(&self, observer: Arc<dyn StateObserver>) {
        let mut observers = self.observers.lock();
        if observers.state.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            return;
        }
        observers.state.push(observer);
    }

    /// Unregister a state observer; unknown observers are an error.
    pub fn unregister_state(&self, observer: &Arc<dyn StateObserver>) -> Result<(), EngineError> {
        let mut observers = self.observers.lock();
        let before = observers.state.len();
        observers.state.retain(|o| !Arc::ptr_eq(o, observer));
        if observers.state.len() == before {
            return Err(EngineError::InvalidArgument(
                "observer not registered".to_string(),
            ));
        }
        Ok(())
    }

    /// Submit a notice for delivery. Never blocks.
    pub(crate) fn publish(&self, notice: StateChangeNotice) {
        let _ = self.tx.send(FanoutItem::Notice(notice));
    }

    /// Resolve once every previously submitted notice has been delivered.
    pub async fn drain(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(FanoutItem::Barrier(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    #[cfg(test)]
    pub(crate) fn lifecycle_observer_count(&self) -> usize {
        self.observers.lock().lifecycle.len()
    }

    #[cfg(test)]
    pub(crate) fn state_observer_count(&self) -> usize {
        self.observers.lock().state.len()
    }
}

fn deliver(observers: &Mutex<Observers>, notice: StateChangeNotice) {
    // Copy the lists under the lock, call outside it.
    let (lifecycle, state) = {
        let guard = observers.lock();
        (guard.lifecycle.clone(), guard.state.clone())
    };

    let reported_state = if notice.applied {
        notice.new_state
    } else {
        notice.old_state
    };

    let coarse = LifecycleEvent::AppStateChanged {
        app_id: notice.app_id.clone(),
        state: reported_state,
        error_reason: notice.error_reason.clone(),
    };
    tracing::debug!(event = ?coarse, "delivering state change");

    for observer in &lifecycle {
        observer.on_app_state_changed(&notice.app_id, reported_state, &notice.error_reason);
    }

    if !notice.applied {
        return;
    }

    for observer in &state {
        observer.on_app_lifecycle_state_changed(
            &notice.app_id,
            &notice.app_instance_id,
            notice.old_state,
            notice.new_state,
            &notice.navigation_intent,
        );
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
