// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kill-and-restart flows.

use crate::prelude::World;
use alm_engine::CloseReason;
use alm_core::LifecycleState::*;

#[tokio::test]
async fn kill_and_activate_restarts_under_a_new_instance() {
    let world = World::new();
    let first = world.spawn("com.test.app", Active).await;

    world
        .service
        .close_app("com.test.app", CloseReason::KillAndActivate)
        .await
        .unwrap();
    world.service.settle().await.unwrap();

    // First instance wound down, second came up to Active.
    let events = world.events.detailed_events("com.test.app");
    let first_instance: Vec<_> = events
        .iter()
        .filter(|e| e.app_instance_id == first.as_str())
        .map(|e| (e.old_state, e.new_state))
        .collect();
    assert_eq!(
        first_instance,
        vec![
            (Unloaded, Loading),
            (Loading, Initializing),
            (Initializing, Paused),
            (Paused, Active),
            (Active, Paused),
            (Paused, Terminating),
            (Terminating, Unloaded),
        ]
    );

    let second_id = events
        .iter()
        .map(|e| e.app_instance_id.clone())
        .find(|id| id != first.as_str())
        .expect("second instance never appeared");
    let second_instance: Vec<_> = events
        .iter()
        .filter(|e| e.app_instance_id == second_id)
        .map(|e| (e.old_state, e.new_state))
        .collect();
    assert_eq!(
        second_instance,
        vec![
            (Unloaded, Loading),
            (Loading, Initializing),
            (Initializing, Paused),
            (Paused, Active),
        ]
    );
}

#[tokio::test]
async fn kill_and_run_lands_in_paused() {
    let world = World::new();
    world.spawn("com.test.app", Active).await;

    world
        .service
        .close_app("com.test.app", CloseReason::KillAndRun)
        .await
        .unwrap();
    world.service.settle().await.unwrap();

    let apps = world.service.get_loaded_apps(false).await;
    assert_eq!(apps.as_array().unwrap().len(), 1);
    assert_eq!(apps[0]["currentLifecycleState"], Paused.as_u32());
}

#[tokio::test]
async fn close_of_unknown_app_is_rejected() {
    let world = World::new();
    assert!(world
        .service
        .close_app("com.never.spawned", CloseReason::Kill)
        .await
        .is_err());
}
