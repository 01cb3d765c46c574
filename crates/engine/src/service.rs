// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The supervisor façade: every caller-facing operation, plus the wiring
//! of registry, dispatcher, event fan-out, and collaborator event pump.

use crate::collab;
use crate::context::LaunchParams;
use crate::dispatcher::{Dispatcher, TransitionRequest, WorkerDeps};
use crate::error::EngineError;
use crate::events::{EventFanout, LifecycleObserver, StateObserver};
use crate::registry::{IdKind, Registry};
use alm_adapters::{
    DisplayAdapter, DisplayEvent, IntentAdapter, RuntimeAdapter, RuntimeEvent, TracedDisplay,
    TracedRuntime,
};
use alm_core::{
    format_state_change_time, AppId, AppInstanceId, Clock, LifecycleState, RuntimeConfig,
    UuidIdGen,
};
use alm_spec::DeviceDefaults;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a caller is closing an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Kill and leave unloaded.
    Kill,
    /// Kill, then re-spawn into `Paused`.
    KillAndRun,
    /// Kill, then re-spawn into `Active`.
    KillAndActivate,
}

/// Supervisor tunables.
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    /// Deadline for every gate wait.
    pub gate_deadline: Duration,
    /// Whether entering `Paused` from `Initializing` waits for the app's
    /// own ready signal. Off by default; apps that need it opt in.
    pub wait_app_ready_on_pause: bool,
    /// Port of the firebolt endpoint handed to containers.
    pub firebolt_port: u16,
    /// Credentials containers run under.
    pub app_uid: u32,
    pub app_gid: u32,
    /// Online CPU count used for container CPU-set derivation.
    pub online_cpus: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            gate_deadline: Duration::from_secs(30),
            wait_app_ready_on_pause: false,
            firebolt_port: 3473,
            app_uid: 1000,
            app_gid: 1000,
            online_cpus: 4,
        }
    }
}

/// Collaborator adapters handed to the service at startup.
pub struct ServiceDeps<R, D, I> {
    pub runtime: R,
    pub display: D,
    pub intent: I,
}

/// The application lifecycle supervisor.
///
/// Owns the registry, the single-writer dispatcher, the event fan-out, and
/// the collaborator event pump. One value per process, constructed at
/// startup and passed by reference.
pub struct Service<R, D, I, C>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    I: IntentAdapter,
    C: Clock,
{
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    fanout: Arc<EventFanout>,
    runtime: TracedRuntime<R>,
    intent: I,
    config: ServiceConfig,
    cancel: CancellationToken,
    runtime_event_tx: mpsc::UnboundedSender<RuntimeEvent>,
    display_event_tx: mpsc::UnboundedSender<DisplayEvent>,
    worker_handle: JoinHandle<()>,
    pump_handle: JoinHandle<()>,
    fanout_handle: JoinHandle<()>,
    _display: std::marker::PhantomData<D>,
    _clock: std::marker::PhantomData<C>,
}

impl<R, D, I, C> Service<R, D, I, C>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    I: IntentAdapter,
    C: Clock,
{
    /// Wire up the supervisor and spawn its background tasks.
    pub fn new(
        deps: ServiceDeps<R, D, I>,
        clock: C,
        device: DeviceDefaults,
        config: ServiceConfig,
    ) -> Self {
        let registry = Arc::new(Registry::new(Arc::new(UuidIdGen)));
        let cancel = CancellationToken::new();

        // Adapters are wrapped with tracing for observability; every
        // collaborator call goes through the wrappers.
        let runtime = TracedRuntime::new(deps.runtime);
        let display = TracedDisplay::new(deps.display);

        let (fanout, fanout_handle) = EventFanout::spawn();
        let fanout = Arc::new(fanout);

        let (runtime_event_tx, runtime_event_rx) = mpsc::unbounded_channel();
        let (display_event_tx, display_event_rx) = mpsc::unbounded_channel();
        let pump_handle = collab::spawn_pump(
            Arc::clone(&registry),
            runtime_event_rx,
            display_event_rx,
            cancel.clone(),
        );

        let (dispatcher, worker_handle) = Dispatcher::spawn(WorkerDeps {
            runtime: runtime.clone(),
            display,
            clock,
            registry: Arc::clone(&registry),
            fanout: Arc::clone(&fanout),
            device,
            config,
            cancel: cancel.clone(),
        });

        Self {
            registry,
            dispatcher,
            fanout,
            runtime,
            intent: deps.intent,
            config,
            cancel,
            runtime_event_tx,
            display_event_tx,
            worker_handle,
            pump_handle,
            fanout_handle,
            _display: std::marker::PhantomData,
            _clock: std::marker::PhantomData,
        }
    }

    /// The application registry. Observers hold identifiers, not context
    /// references, and query here when they need current state.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Sender the runtime adapter forwards its notifications into.
    pub fn runtime_event_sender(&self) -> mpsc::UnboundedSender<RuntimeEvent> {
        self.runtime_event_tx.clone()
    }

    /// Sender the display adapter forwards its notifications into.
    pub fn display_event_sender(&self) -> mpsc::UnboundedSender<DisplayEvent> {
        self.display_event_tx.clone()
    }

    /// Launch an application toward `target`, creating its context if
    /// absent. Blocks until the instance id is known (first spawn only).
    pub async fn spawn_app(
        &self,
        app_id: &str,
        intent: &str,
        target: LifecycleState,
        runtime_config: RuntimeConfig,
        launch_args: &str,
    ) -> Result<AppInstanceId, EngineError> {
        if app_id.is_empty() {
            return Err(EngineError::InvalidArgument("empty app id".to_string()));
        }
        let app = AppId::new(app_id);
        let (ctx, _) = self.registry.get_or_create(&app);

        let first_launch = ctx.capture_launch_params(LaunchParams {
            app_id: app,
            intent: intent.to_string(),
            launch_args: launch_args.to_string(),
            target_state: target,
            runtime_config,
        });
        ctx.set_target_state(target);
        ctx.set_most_recent_intent(intent);

        let path = alm_core::plan(ctx.current_state(), target)?;
        self.dispatcher.enqueue(TransitionRequest {
            subject: app_id.to_string(),
            target,
        })?;

        if first_launch && !path.is_empty() {
            ctx.gates
                .reached_loading
                .wait(self.config.gate_deadline, &self.cancel)
                .await?;
        }
        Ok(ctx.app_instance_id())
    }

    /// Move a loaded application toward `target`. Non-blocking.
    pub fn set_target_app_state(
        &self,
        instance_id: &str,
        target: LifecycleState,
        intent: &str,
    ) -> Result<(), EngineError> {
        let ctx = self
            .registry
            .find(IdKind::AppInstanceId, instance_id)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!("unknown instance {}", instance_id))
            })?;
        ctx.set_target_state(target);
        ctx.set_most_recent_intent(intent);
        alm_core::plan(ctx.current_state(), target)?;
        self.dispatcher.enqueue(TransitionRequest {
            subject: instance_id.to_string(),
            target,
        })
    }

    /// Begin a graceful shutdown of the application.
    pub fn unload_app(&self, instance_id: &str) -> Result<(), EngineError> {
        self.terminate(instance_id, false)
    }

    /// Hard-kill the application.
    pub fn kill_app(&self, instance_id: &str) -> Result<(), EngineError> {
        self.terminate(instance_id, true)
    }

    fn terminate(&self, instance_id: &str, force: bool) -> Result<(), EngineError> {
        let ctx = self
            .registry
            .find(IdKind::AppInstanceId, instance_id)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!("unknown instance {}", instance_id))
            })?;
        ctx.set_target_state(LifecycleState::Terminating);
        ctx.set_kill_force(force);
        self.dispatcher.enqueue(TransitionRequest {
            subject: instance_id.to_string(),
            target: LifecycleState::Terminating,
        })
    }

    /// Forward a deeplink to the application; the intent is recorded on
    /// the context once the gateway accepts it.
    pub async fn send_intent_to_active_app(
        &self,
        instance_id: &str,
        intent: &str,
    ) -> Result<(), EngineError> {
        let ctx = self
            .registry
            .find(IdKind::AppInstanceId, instance_id)
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!("unknown instance {}", instance_id))
            })?;
        self.intent.send_intent(&ctx.app_id, intent).await?;
        ctx.set_most_recent_intent(intent);
        Ok(())
    }

    /// JSON snapshot of every loaded application.
    pub async fn get_loaded_apps(&self, verbose: bool) -> serde_json::Value {
        let mut apps = Vec::new();
        for snap in self.registry.list() {
            let mut entry = json!({
                "appInstanceID": snap.app_instance_id.as_str(),
                "appId": snap.app_id.as_str(),
                "timeOfLastLifecycleStateChange":
                    format_state_change_time(snap.last_change_epoch_nanos),
                "currentLifecycleState": snap.current_state.as_u32(),
                "activeSessionId": snap.active_session_id,
                "targetLifecycleState": snap.target_state.as_u32(),
                "mostRecentIntent": snap.most_recent_intent,
            });
            if verbose {
                match self.runtime.get_info(&snap.app_instance_id).await {
                    Ok(stats) => {
                        entry["runtimeStats"] = json!(stats);
                    }
                    Err(error) => {
                        tracing::warn!(
                            instance = %snap.app_instance_id,
                            %error,
                            "unable to get runtime stats"
                        );
                    }
                }
            }
            apps.push(entry);
        }
        serde_json::Value::Array(apps)
    }

    /// Whether a context exists for the app id.
    pub fn is_app_loaded(&self, app_id: &str) -> bool {
        self.registry.is_loaded(&AppId::new(app_id))
    }

    /// External readiness signal from the application runtime.
    pub fn app_ready(&self, app_id: &str) -> Result<(), EngineError> {
        let ctx = self
            .registry
            .find(IdKind::AppId, app_id)
            .ok_or_else(|| EngineError::InvalidArgument(format!("unknown app {}", app_id)))?;
        tracing::info!(app = %app_id, "application signalled ready");
        ctx.gates.app_ready.post();
        Ok(())
    }

    /// Kill the application and, depending on the reason, re-spawn it from
    /// its recorded launch parameters.
    pub async fn close_app(&self, app_id: &str, reason: CloseReason) -> Result<(), EngineError> {
        let ctx = self
            .registry
            .find(IdKind::AppId, app_id)
            .ok_or_else(|| EngineError::InvalidArgument(format!("unknown app {}", app_id)))?;
        let params = ctx.launch_params();
        let instance = ctx.app_instance_id();

        self.kill_app(instance.as_str())?;
        if reason == CloseReason::Kill {
            return Ok(());
        }

        let params = params.ok_or_else(|| {
            EngineError::InvalidArgument(format!("no launch parameters recorded for {}", app_id))
        })?;

        // Let the kill finish (and the old context retire) so the re-spawn
        // builds a fresh context with a fresh instance id.
        self.dispatcher.settle().await?;

        let target = match reason {
            CloseReason::KillAndActivate => LifecycleState::Active,
            _ => LifecycleState::Paused,
        };
        self.spawn_app(
            params.app_id.as_str(),
            &params.intent,
            target,
            params.runtime_config,
            &params.launch_args,
        )
        .await?;
        Ok(())
    }

    /// Acknowledgement that an observer finished handling a state change.
    /// Accepted and recorded; transitions are not gated on it.
    pub fn state_change_complete(
        &self,
        app_id: &str,
        state_change_id: u64,
        success: bool,
    ) -> Result<(), EngineError> {
        tracing::info!(app = %app_id, state_change_id, success, "state change acknowledged");
        Ok(())
    }

    /// Register a lifecycle observer; duplicate registration is a no-op.
    pub fn register_lifecycle_observer(&self, observer: Arc<dyn LifecycleObserver>) {
        self.fanout.register_lifecycle(observer);
    }

    pub fn unregister_lifecycle_observer(
        &self,
        observer: &Arc<dyn LifecycleObserver>,
    ) -> Result<(), EngineError> {
        self.fanout.unregister_lifecycle(observer)
    }

    /// Register a state observer; duplicate registration is a no-op.
    pub fn register_state_observer(&self, observer: Arc<dyn StateObserver>) {
        self.fanout.register_state(observer);
    }

    pub fn unregister_state_observer(
        &self,
        observer: &Arc<dyn StateObserver>,
    ) -> Result<(), EngineError> {
        self.fanout.unregister_state(observer)
    }

    /// Wait until every queued request has been processed and every
    /// emitted event delivered.
    pub async fn settle(&self) -> Result<(), EngineError> {
        self.dispatcher.settle().await?;
        self.fanout.drain().await;
        Ok(())
    }

    /// Stop the supervisor: cancel pending gate waits, drain the worker,
    /// and flush outstanding events.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.worker_handle.await;
        let _ = self.pump_handle.await;
        self.fanout.drain().await;
        drop(self.dispatcher);
        drop(self.fanout);
        let _ = self.fanout_handle.await;
        tracing::info!("supervisor shut down");
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
