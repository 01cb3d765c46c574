// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graceful unload and hard kill.

use crate::prelude::World;
use alm_adapters::RuntimeCall;
use alm_core::LifecycleState::*;

#[tokio::test]
async fn graceful_unload_from_active() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;

    world.service.unload_app(instance.as_str()).unwrap();
    world.service.settle().await.unwrap();

    assert_eq!(
        world.events.transitions("com.test.app")[4..],
        [
            (Active, Paused),
            (Paused, Terminating),
            (Terminating, Unloaded),
        ]
    );

    let calls = world.runtime.calls();
    assert!(calls.iter().any(|c| matches!(c, RuntimeCall::Terminate(_))));
    assert!(!calls.iter().any(|c| matches!(c, RuntimeCall::Kill(_))));

    // After the final event the context is gone.
    assert!(!world.service.is_app_loaded("com.test.app"));
}

#[tokio::test]
async fn kill_app_forces_the_container_down() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Suspended).await;

    world.service.kill_app(instance.as_str()).unwrap();
    world.service.settle().await.unwrap();

    let calls = world.runtime.calls();
    assert!(calls.iter().any(|c| matches!(c, RuntimeCall::Kill(_))));
    assert!(!calls.iter().any(|c| matches!(c, RuntimeCall::Terminate(_))));
    assert!(!world.service.is_app_loaded("com.test.app"));
}

#[tokio::test]
async fn context_is_removed_exactly_once() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Paused).await;

    world.service.unload_app(instance.as_str()).unwrap();
    world.service.settle().await.unwrap();
    assert!(!world.service.is_app_loaded("com.test.app"));

    // A second unload addressed at the dead instance is rejected.
    assert!(world.service.unload_app(instance.as_str()).is_err());
}

#[tokio::test]
async fn failed_termination_preserves_the_context() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Paused).await;

    world.runtime.fail_next("terminate", "container wedged");
    world.service.unload_app(instance.as_str()).unwrap();
    world.service.settle().await.unwrap();

    // The plan was abandoned at Terminating; the context remains Paused.
    assert!(world.service.is_app_loaded("com.test.app"));
    let apps = world.service.get_loaded_apps(false).await;
    assert_eq!(apps[0]["currentLifecycleState"], Paused.as_u32());

    let failures = world.events.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].2.contains("container wedged"));
}
