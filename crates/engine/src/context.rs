// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-application context owned by the registry.

use crate::gate::GateSet;
use alm_core::{AppId, AppInstanceId, LifecycleState, RuntimeConfig};
use alm_spec::ContainerSpec;
use parking_lot::Mutex;
use std::time::Instant;

/// Snapshot of the parameters an application was first spawned with; used
/// to rebuild the context on close-and-restart.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    pub app_id: AppId,
    pub intent: String,
    pub launch_args: String,
    pub target_state: LifecycleState,
    pub runtime_config: RuntimeConfig,
}

/// Copy of one context's observable fields, as returned by
/// [`Registry::list`](crate::registry::Registry::list).
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub app_id: AppId,
    pub app_instance_id: AppInstanceId,
    pub current_state: LifecycleState,
    pub target_state: LifecycleState,
    pub last_change_epoch_nanos: u64,
    pub active_session_id: String,
    pub most_recent_intent: String,
}

/// Mutable context fields; written only on the dispatcher's worker, read
/// anywhere under the lock.
#[derive(Default)]
struct ContextState {
    app_instance_id: AppInstanceId,
    current_state: Option<LifecycleState>,
    target_state: Option<LifecycleState>,
    last_change_mono: Option<Instant>,
    last_change_epoch_nanos: u64,
    state_change_id: u64,
    most_recent_intent: String,
    active_session_id: String,
    launch_params: Option<LaunchParams>,
    kill_force: bool,
    /// Set when the context passes through `Terminating`, so the closing
    /// `Unloaded` step is recognized as terminal.
    reached_terminating: bool,
    container_spec: Option<ContainerSpec>,
}

/// The per-application record.
///
/// Identity and gates are immutable for the context's lifetime; everything
/// else lives behind one small mutex. No lock is ever held across a
/// collaborator call.
pub struct AppContext {
    pub app_id: AppId,
    pub gates: GateSet,
    state: Mutex<ContextState>,
}

impl AppContext {
    pub(crate) fn new(app_id: AppId) -> Self {
        Self {
            app_id,
            gates: GateSet::new(),
            state: Mutex::new(ContextState::default()),
        }
    }

    pub fn app_instance_id(&self) -> AppInstanceId {
        self.state.lock().app_instance_id.clone()
    }

    pub(crate) fn set_app_instance_id(&self, id: AppInstanceId) {
        self.state.lock().app_instance_id = id;
    }

    /// Current lifecycle state; `Unloaded` until the first transition.
    pub fn current_state(&self) -> LifecycleState {
        self.state
            .lock()
            .current_state
            .unwrap_or(LifecycleState::Unloaded)
    }

    pub fn target_state(&self) -> LifecycleState {
        self.state
            .lock()
            .target_state
            .unwrap_or(LifecycleState::Unloaded)
    }

    pub fn set_target_state(&self, target: LifecycleState) {
        self.state.lock().target_state = Some(target);
    }

    pub fn most_recent_intent(&self) -> String {
        self.state.lock().most_recent_intent.clone()
    }

    pub fn set_most_recent_intent(&self, intent: &str) {
        self.state.lock().most_recent_intent = intent.to_string();
    }

    pub fn active_session_id(&self) -> String {
        self.state.lock().active_session_id.clone()
    }

    /// Record the display session the instance renders into.
    pub(crate) fn set_active_session_id(&self, id: &str) {
        self.state.lock().active_session_id = id.to_string();
    }

    pub fn kill_force(&self) -> bool {
        self.state.lock().kill_force
    }

    pub fn set_kill_force(&self, force: bool) {
        self.state.lock().kill_force = force;
    }

    pub fn state_change_id(&self) -> u64 {
        self.state.lock().state_change_id
    }

    /// Time since the previous applied transition, if any.
    pub fn last_change_elapsed(&self) -> Option<std::time::Duration> {
        self.state.lock().last_change_mono.map(|t| t.elapsed())
    }

    pub fn launch_params(&self) -> Option<LaunchParams> {
        self.state.lock().launch_params.clone()
    }

    /// Capture the launch parameters; only the first spawn wins.
    pub(crate) fn capture_launch_params(&self, params: LaunchParams) -> bool {
        let mut state = self.state.lock();
        if state.launch_params.is_some() {
            return false;
        }
        state.launch_params = Some(params);
        true
    }

    pub(crate) fn runtime_config(&self) -> Option<RuntimeConfig> {
        self.state
            .lock()
            .launch_params
            .as_ref()
            .map(|p| p.runtime_config.clone())
    }

    pub(crate) fn container_spec(&self) -> Option<ContainerSpec> {
        self.state.lock().container_spec.clone()
    }

    /// Attach the derived container spec; built exactly once per lifetime.
    pub(crate) fn set_container_spec(&self, spec: ContainerSpec) {
        let mut state = self.state.lock();
        if state.container_spec.is_none() {
            state.container_spec = Some(spec);
        }
    }

    pub(crate) fn reached_terminating(&self) -> bool {
        self.state.lock().reached_terminating
    }

    /// Record a completed transition step.
    pub(crate) fn apply_transition(
        &self,
        new_state: LifecycleState,
        state_change_id: u64,
        epoch_nanos: u64,
    ) {
        let mut state = self.state.lock();
        if new_state == LifecycleState::Terminating {
            state.reached_terminating = true;
        }
        state.current_state = Some(new_state);
        state.state_change_id = state_change_id;
        state.last_change_mono = Some(Instant::now());
        state.last_change_epoch_nanos = epoch_nanos;
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        let state = self.state.lock();
        AppSnapshot {
            app_id: self.app_id.clone(),
            app_instance_id: state.app_instance_id.clone(),
            current_state: state.current_state.unwrap_or(LifecycleState::Unloaded),
            target_state: state.target_state.unwrap_or(LifecycleState::Unloaded),
            last_change_epoch_nanos: state.last_change_epoch_nanos,
            active_session_id: state.active_session_id.clone(),
            most_recent_intent: state.most_recent_intent.clone(),
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
