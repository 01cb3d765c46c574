// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for engine tests.

use crate::events::{LifecycleObserver, StateObserver};
use crate::service::{Service, ServiceConfig, ServiceDeps};
use alm_adapters::{FakeDisplayAdapter, FakeIntentAdapter, FakeRuntimeAdapter};
use alm_core::{AppId, AppInstanceId, FakeClock, LifecycleState, RuntimeConfig};
use alm_spec::DeviceDefaults;
use parking_lot::Mutex;
use std::time::Duration;

pub(crate) type TestService =
    Service<FakeRuntimeAdapter, FakeDisplayAdapter, FakeIntentAdapter, FakeClock>;

/// Fully wired supervisor over fake adapters in auto-ack mode.
pub(crate) struct Harness {
    pub service: TestService,
    pub runtime: FakeRuntimeAdapter,
    pub display: FakeDisplayAdapter,
    pub intent: FakeIntentAdapter,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ServiceConfig {
            gate_deadline: Duration::from_millis(500),
            ..Default::default()
        })
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        let runtime = FakeRuntimeAdapter::new();
        runtime.auto_ack();
        let display = FakeDisplayAdapter::new();
        let intent = FakeIntentAdapter::new();

        let service = Service::new(
            ServiceDeps {
                runtime: runtime.clone(),
                display: display.clone(),
                intent: intent.clone(),
            },
            FakeClock::at_nanos(1_700_000_000_000_000_000),
            DeviceDefaults::default(),
            config,
        );
        runtime.connect_events(service.runtime_event_sender());
        display.connect_events(service.display_event_sender());

        Self {
            service,
            runtime,
            display,
            intent,
        }
    }

    /// Default interactive runtime configuration.
    pub fn runtime_config() -> RuntimeConfig {
        RuntimeConfig {
            command: "bin/app".to_string(),
            app_path: "/apps/com.test.app".to_string(),
            runtime_path: "/runtimes/web".to_string(),
            ..Default::default()
        }
    }

    /// Spawn toward `target` and wait until the queue settles.
    pub async fn spawn_settled(&self, app_id: &str, target: LifecycleState) -> AppInstanceId {
        let instance = self
            .service
            .spawn_app(app_id, "home", target, Self::runtime_config(), "--x")
            .await
            .unwrap_or_else(|e| panic!("spawn failed: {}", e));
        self.service.settle().await.unwrap_or_else(|e| panic!("settle failed: {}", e));
        instance
    }
}

/// Observer recording both notification channels.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub coarse: Mutex<Vec<(AppId, LifecycleState, String)>>,
    pub detailed: Mutex<Vec<DetailedEvent>>,
}

#[derive(Debug, Clone)]
pub(crate) struct DetailedEvent {
    pub app_id: AppId,
    pub app_instance_id: AppInstanceId,
    pub old_state: LifecycleState,
    pub new_state: LifecycleState,
    pub navigation_intent: String,
}

impl RecordingObserver {
    /// (old, new) pairs of applied transitions for one app.
    pub fn transitions_for(&self, app_id: &str) -> Vec<(LifecycleState, LifecycleState)> {
        self.detailed
            .lock()
            .iter()
            .filter(|e| e.app_id == *app_id)
            .map(|e| (e.old_state, e.new_state))
            .collect()
    }
}

impl LifecycleObserver for RecordingObserver {
    fn on_app_state_changed(&self, app_id: &AppId, state: LifecycleState, error_reason: &str) {
        self.coarse
            .lock()
            .push((app_id.clone(), state, error_reason.to_string()));
    }
}

impl StateObserver for RecordingObserver {
    fn on_app_lifecycle_state_changed(
        &self,
        app_id: &AppId,
        app_instance_id: &AppInstanceId,
        old_state: LifecycleState,
        new_state: LifecycleState,
        navigation_intent: &str,
    ) {
        self.detailed.lock().push(DetailedEvent {
            app_id: app_id.clone(),
            app_instance_id: app_instance_id.clone(),
            old_state,
            new_state,
            navigation_intent: navigation_intent.to_string(),
        });
    }
}
