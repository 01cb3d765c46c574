// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner behavior observable through the service.

use crate::prelude::World;
use alm_core::LifecycleState::*;
use alm_core::{plan, LifecycleState};

#[tokio::test]
async fn mid_load_target_plans_the_remaining_ladder() {
    // From Loading the planner routes through Initializing and Paused.
    assert_eq!(
        plan(Loading, Active).unwrap(),
        vec![Initializing, Paused, Active]
    );

    // From cold, a hibernation target takes the direct Initializing ->
    // Suspended edge.
    assert_eq!(
        plan(Unloaded, Hibernated).unwrap(),
        vec![Loading, Initializing, Suspended, Hibernated]
    );
}

#[tokio::test]
async fn spawning_straight_to_hibernated_executes_the_planned_path() {
    let world = World::new();
    world.spawn("com.test.app", Hibernated).await;

    assert_eq!(
        world.events.transitions("com.test.app"),
        vec![
            (Unloaded, Loading),
            (Loading, Initializing),
            (Initializing, Suspended),
            (Suspended, Hibernated),
        ]
    );
}

#[tokio::test]
async fn unreachable_target_reports_no_path_and_emits_nothing() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;
    let before = world.events.transitions("com.test.app").len();

    let err = world
        .service
        .set_target_app_state(instance.as_str(), Loading, "")
        .unwrap_err();
    assert!(matches!(err, alm_engine::EngineError::NoPath { .. }));

    world.service.settle().await.unwrap();
    assert_eq!(world.events.transitions("com.test.app").len(), before);
}

#[tokio::test]
async fn same_state_target_is_a_quiet_no_op() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;
    let before = world.events.transitions("com.test.app").len();

    world
        .service
        .set_target_app_state(instance.as_str(), Active, "")
        .unwrap();
    world.service.settle().await.unwrap();

    assert_eq!(world.events.transitions("com.test.app").len(), before);
}

#[tokio::test]
async fn planner_paths_always_end_at_the_target() {
    for current in LifecycleState::ALL {
        for target in LifecycleState::ALL {
            let Ok(path) = plan(current, target) else {
                continue;
            };
            if current == target {
                assert!(path.is_empty());
                continue;
            }
            let expected_last = if target == Terminating {
                Unloaded
            } else {
                target
            };
            assert_eq!(path.last().copied(), Some(expected_last));
        }
    }
}
