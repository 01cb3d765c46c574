// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared setup for the behavioral specs.

use alm_adapters::{FakeDisplayAdapter, FakeIntentAdapter, FakeRuntimeAdapter};
use alm_core::{AppId, AppInstanceId, FakeClock, LifecycleState, RuntimeConfig};
use alm_engine::{
    LifecycleObserver, Service, ServiceConfig, ServiceDeps, StateObserver,
};
use alm_spec::DeviceDefaults;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type SpecService =
    Service<FakeRuntimeAdapter, FakeDisplayAdapter, FakeIntentAdapter, FakeClock>;

/// A supervisor wired to auto-acknowledging fake collaborators.
pub struct World {
    pub service: SpecService,
    pub runtime: FakeRuntimeAdapter,
    pub display: FakeDisplayAdapter,
    pub intent: FakeIntentAdapter,
    pub events: Arc<Recorder>,
}

impl World {
    pub fn new() -> Self {
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
            ServiceConfig {
                gate_deadline: Duration::from_millis(500),
                ..Default::default()
            },
        );
        runtime.connect_events(service.runtime_event_sender());
        display.connect_events(service.display_event_sender());

        let events = Arc::new(Recorder::default());
        service.register_state_observer(Arc::clone(&events) as Arc<dyn StateObserver>);
        service.register_lifecycle_observer(Arc::clone(&events) as Arc<dyn LifecycleObserver>);

        Self {
            service,
            runtime,
            display,
            intent,
            events,
        }
    }

    pub fn config() -> RuntimeConfig {
        RuntimeConfig {
            command: "bin/app".to_string(),
            app_path: "/apps/com.test.app".to_string(),
            runtime_path: "/runtimes/web".to_string(),
            ..Default::default()
        }
    }

    pub async fn spawn(&self, app_id: &str, target: LifecycleState) -> AppInstanceId {
        let instance = self
            .service
            .spawn_app(app_id, "home", target, Self::config(), "--x")
            .await
            .expect("spawn failed");
        self.service.settle().await.expect("settle failed");
        instance
    }
}

/// Records every delivered notification.
#[derive(Default)]
pub struct Recorder {
    detailed: Mutex<Vec<DetailedEvent>>,
    coarse: Mutex<Vec<(String, LifecycleState, String)>>,
}

#[derive(Debug, Clone)]
pub struct DetailedEvent {
    pub app_id: String,
    pub app_instance_id: String,
    pub old_state: LifecycleState,
    pub new_state: LifecycleState,
    pub navigation_intent: String,
}

impl Recorder {
    /// Applied (old, new) pairs for one app, in delivery order.
    pub fn transitions(&self, app_id: &str) -> Vec<(LifecycleState, LifecycleState)> {
        self.detailed
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.app_id == app_id)
            .map(|e| (e.old_state, e.new_state))
            .collect()
    }

    pub fn detailed_events(&self, app_id: &str) -> Vec<DetailedEvent> {
        self.detailed
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.app_id == app_id)
            .cloned()
            .collect()
    }

    pub fn failures(&self) -> Vec<(String, LifecycleState, String)> {
        self.coarse
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, reason)| !reason.is_empty())
            .cloned()
            .collect()
    }
}

impl StateObserver for Recorder {
    fn on_app_lifecycle_state_changed(
        &self,
        app_id: &AppId,
        app_instance_id: &AppInstanceId,
        old_state: LifecycleState,
        new_state: LifecycleState,
        navigation_intent: &str,
    ) {
        self.detailed.lock().unwrap().push(DetailedEvent {
            app_id: app_id.to_string(),
            app_instance_id: app_instance_id.to_string(),
            old_state,
            new_state,
            navigation_intent: navigation_intent.to_string(),
        });
    }
}

impl LifecycleObserver for Recorder {
    fn on_app_state_changed(&self, app_id: &AppId, state: LifecycleState, error_reason: &str) {
        self.coarse
            .lock()
            .unwrap()
            .push((app_id.to_string(), state, error_reason.to_string()));
    }
}
