// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suspension, hibernation, and wake paths.

use crate::prelude::World;
use alm_adapters::{DisplayCall, RuntimeCall, RuntimeState};
use alm_core::LifecycleState::*;

#[tokio::test]
async fn suspend_then_hibernate_from_active() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;

    world
        .service
        .set_target_app_state(instance.as_str(), Hibernated, "")
        .unwrap();
    world.service.settle().await.unwrap();

    let transitions = world.events.transitions("com.test.app");
    assert_eq!(
        transitions[4..],
        [
            (Active, Paused),
            (Paused, Suspended),
            (Suspended, Hibernated),
        ]
    );

    // Runtime saw suspend then hibernate; render was disabled once.
    let runtime_calls = world.runtime.calls();
    let suspend_at = runtime_calls
        .iter()
        .position(|c| matches!(c, RuntimeCall::Suspend(_)))
        .unwrap();
    let hibernate_at = runtime_calls
        .iter()
        .position(|c| matches!(c, RuntimeCall::Hibernate(..)))
        .unwrap();
    assert!(suspend_at < hibernate_at);

    let disables = world
        .display
        .calls()
        .iter()
        .filter(|c| matches!(c, DisplayCall::EnableRender(_, false)))
        .count();
    assert_eq!(disables, 1);
}

#[tokio::test]
async fn wake_to_paused_from_hibernated() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;

    world
        .service
        .set_target_app_state(instance.as_str(), Hibernated, "")
        .unwrap();
    world.service.settle().await.unwrap();

    world
        .service
        .set_target_app_state(instance.as_str(), Paused, "")
        .unwrap();
    world.service.settle().await.unwrap();

    let transitions = world.events.transitions("com.test.app");
    assert_eq!(
        transitions[7..],
        [(Hibernated, Suspended), (Suspended, Paused)]
    );

    // Runtime saw wake(Suspended) then resume; render re-enabled once.
    let calls = world.runtime.calls();
    let wake_at = calls
        .iter()
        .position(|c| matches!(c, RuntimeCall::Wake(_, RuntimeState::Suspended)))
        .unwrap();
    let resume_at = calls
        .iter()
        .position(|c| matches!(c, RuntimeCall::Resume(_)))
        .unwrap();
    assert!(wake_at < resume_at);

    let enables = world
        .display
        .calls()
        .iter()
        .filter(|c| matches!(c, DisplayCall::EnableRender(_, true)))
        .count();
    assert_eq!(enables, 1);
}

#[tokio::test]
async fn every_emitted_edge_is_legal() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;

    world
        .service
        .set_target_app_state(instance.as_str(), Hibernated, "")
        .unwrap();
    world.service.settle().await.unwrap();
    world
        .service
        .set_target_app_state(instance.as_str(), Active, "")
        .unwrap();
    world.service.settle().await.unwrap();

    for (old, new) in world.events.transitions("com.test.app") {
        assert!(
            alm_core::predecessors(new).contains(&old),
            "illegal edge {} -> {}",
            old,
            new
        );
    }
}
