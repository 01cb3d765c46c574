// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-state side-effect actions.
//!
//! `enter` runs before the dispatcher advances `current_state`, so a
//! failing action leaves the context in the last successfully entered
//! state. Reading `ctx.current_state()` inside an action therefore yields
//! the *previous* state.

use crate::context::AppContext;
use crate::dispatcher::WorkerDeps;
use crate::error::EngineError;
use alm_adapters::{DisplayAdapter, RunRequest, RuntimeAdapter, RuntimeState};
use alm_core::{AppType, Clock, LifecycleState};
use alm_spec::AppInfo;
use std::sync::Arc;

pub(crate) async fn enter<R, D, C>(
    state: LifecycleState,
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    match state {
        LifecycleState::Unloaded => Ok(()),
        LifecycleState::Loading => enter_loading(ctx, deps),
        LifecycleState::Initializing => enter_initializing(ctx, deps).await,
        LifecycleState::Paused => enter_paused(ctx, deps).await,
        LifecycleState::Active => enter_active(ctx, deps).await,
        LifecycleState::Suspended => enter_suspended(ctx, deps).await,
        LifecycleState::Hibernated => enter_hibernated(ctx, deps).await,
        LifecycleState::Terminating => enter_terminating(ctx, deps).await,
    }
}

fn enter_loading<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError> {
    if ctx.app_instance_id().is_empty() {
        let id = deps.registry.assign_instance_id(ctx)?;
        tracing::info!(app = %ctx.app_id, instance = %id, "assigned instance id");
    }
    ctx.gates.reached_loading.post();
    Ok(())
}

async fn enter_initializing<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    let config = ctx.runtime_config().ok_or_else(|| {
        EngineError::InvalidArgument(format!("no launch parameters for {}", ctx.app_id))
    })?;
    let instance = ctx.app_instance_id();
    let display_name = display_name_for(&instance);

    // SYSTEM apps run headless; everything else gets a wayland surface.
    let graphical = config.app_type != AppType::System;

    if ctx.container_spec().is_none() {
        let info = AppInfo {
            app_id: ctx.app_id.to_string(),
            uid: deps.config.app_uid,
            gid: deps.config.app_gid,
            wayland_socket_path: if graphical {
                format!("/tmp/{}", display_name)
            } else {
                String::new()
            },
            ports: Vec::new(),
            online_cpus: deps.config.online_cpus,
            requires_drm: !config.fkps_files.is_empty(),
        };
        ctx.set_container_spec(alm_spec::build(&info, &config, &deps.device));
    }

    if graphical {
        let display_params = serde_json::json!({
            "client": instance.as_str(),
            "displayName": display_name,
        });
        deps.display
            .create_display(&display_params.to_string())
            .await?;
        // The display name doubles as the session identity for the
        // loaded-apps snapshot.
        ctx.set_active_session_id(&display_name);
    }

    let request = RunRequest {
        app_instance_id: instance.clone(),
        app_path: config.app_path.clone(),
        runtime_path: config.runtime_path.clone(),
        env: vec![
            format!(
                "FIREBOLT_ENDPOINT=http://localhost:{}?session={}",
                deps.config.firebolt_port, instance
            ),
            "XDG_RUNTIME_DIR=/tmp".to_string(),
            format!("WAYLAND_DISPLAY={}", display_name),
        ],
        uid: deps.config.app_uid,
        gid: deps.config.app_gid,
        ports: vec![deps.config.firebolt_port],
        paths: vec!["/tmp".to_string()],
        debug: false,
        container_spec: ctx
            .container_spec()
            .map(|spec| spec.to_wire())
            .unwrap_or_default(),
    };
    deps.runtime.run(request).await?;

    ctx.gates
        .app_running
        .wait(deps.config.gate_deadline, &deps.cancel)
        .await
}

async fn enter_paused<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    match ctx.current_state() {
        // Implicit post-launch quiescent state; the container is already up.
        LifecycleState::Initializing => {
            if deps.config.wait_app_ready_on_pause {
                ctx.gates
                    .app_ready
                    .wait(deps.config.gate_deadline, &deps.cancel)
                    .await?;
            }
            Ok(())
        }
        LifecycleState::Suspended => {
            let instance = ctx.app_instance_id();
            deps.runtime.resume(&instance).await?;
            deps.display.enable_render(&instance, true).await?;
            // The surface was disabled while suspended; hold here until
            // the compositor has a frame to show again.
            if !deps.display.render_ready(&instance).await? {
                ctx.gates
                    .first_frame_after_resume
                    .wait(deps.config.gate_deadline, &deps.cancel)
                    .await?;
            }
            Ok(())
        }
        LifecycleState::Active => Ok(()),
        other => {
            tracing::warn!(app = %ctx.app_id, from = %other, "unexpected Paused entry");
            Ok(())
        }
    }
}

async fn enter_active<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    let instance = ctx.app_instance_id();
    let ready = deps.display.render_ready(&instance).await?;
    if ready {
        return Ok(());
    }
    ctx.gates
        .first_frame
        .wait(deps.config.gate_deadline, &deps.cancel)
        .await
}

async fn enter_suspended<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    let instance = ctx.app_instance_id();
    if ctx.current_state() == LifecycleState::Hibernated {
        deps.runtime
            .wake(&instance, RuntimeState::Suspended)
            .await?;
        return Ok(());
    }
    deps.runtime.suspend(&instance).await?;
    deps.display.enable_render(&instance, false).await?;
    Ok(())
}

async fn enter_hibernated<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    deps.runtime
        .hibernate(&ctx.app_instance_id(), "")
        .await?;
    Ok(())
}

async fn enter_terminating<R, D, C>(
    ctx: &Arc<AppContext>,
    deps: &WorkerDeps<R, D, C>,
) -> Result<(), EngineError>
where
    R: RuntimeAdapter,
    D: DisplayAdapter,
    C: Clock,
{
    let instance = ctx.app_instance_id();
    if ctx.kill_force() {
        deps.runtime.kill(&instance).await?;
    } else {
        deps.runtime.terminate(&instance).await?;
    }
    ctx.gates
        .app_terminating
        .wait(deps.config.gate_deadline, &deps.cancel)
        .await
}

/// Wayland display name for an instance: a short stable prefix of the
/// instance id keeps the socket name unique per load and traceable in
/// logs.
fn display_name_for(instance: &alm_core::AppInstanceId) -> String {
    let id = instance.as_str();
    let suffix = &id[..id.len().min(6)];
    format!("westeros-{}", suffix)
}
