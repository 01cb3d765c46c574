// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cold start: empty registry to an active application.

use crate::prelude::World;
use alm_adapters::{DisplayCall, RuntimeCall};
use alm_core::LifecycleState::*;

#[tokio::test]
async fn cold_start_to_active() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;
    assert!(!instance.is_empty());

    assert_eq!(
        world.events.transitions("com.test.app"),
        vec![
            (Unloaded, Loading),
            (Loading, Initializing),
            (Initializing, Paused),
            (Paused, Active),
        ]
    );

    // Exactly one run call reached the runtime.
    let runs: Vec<_> = world
        .runtime
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            RuntimeCall::Run(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].app_instance_id, instance);

    // One render-ready query reached the compositor.
    let queries = world
        .display
        .calls()
        .iter()
        .filter(|c| matches!(c, DisplayCall::RenderReady(_)))
        .count();
    assert_eq!(queries, 1);
}

#[tokio::test]
async fn run_request_carries_the_derived_container_spec() {
    let world = World::new();
    let instance = world.spawn("com.test.app", Active).await;

    let run = world
        .runtime
        .calls()
        .into_iter()
        .find_map(|c| match c {
            RuntimeCall::Run(request) => Some(request),
            _ => None,
        })
        .unwrap();

    let spec: serde_json::Value = serde_json::from_str(&run.container_spec).unwrap();
    assert_eq!(spec["args"], serde_json::json!(["/runtime/bin/app"]));
    assert_eq!(spec["cwd"], "/package");
    assert_eq!(spec["network"], "private");
    assert!(spec["memLimit"].as_i64().unwrap() > 0);

    // The launch environment wires up firebolt and the display.
    assert!(run
        .env
        .iter()
        .any(|l| l.starts_with("FIREBOLT_ENDPOINT=http://localhost:3473?session=")));
    assert!(run.env.contains(&"XDG_RUNTIME_DIR=/tmp".to_string()));
    assert!(run.env.iter().any(|l| l.starts_with("WAYLAND_DISPLAY=westeros-")));
    assert_eq!(run.app_instance_id, instance);
}

#[tokio::test]
async fn display_surface_created_before_run() {
    let world = World::new();
    world.spawn("com.test.app", Paused).await;

    let display_calls = world.display.calls();
    assert!(matches!(display_calls[0], DisplayCall::CreateDisplay(_)));

    let DisplayCall::CreateDisplay(params) = &display_calls[0] else {
        unreachable!()
    };
    let params: serde_json::Value = serde_json::from_str(params).unwrap();
    assert!(params["displayName"]
        .as_str()
        .unwrap()
        .starts_with("westeros-"));
}

#[tokio::test]
async fn navigation_intent_rides_on_activation() {
    let world = World::new();
    world.spawn("com.test.app", Active).await;

    let events = world.events.detailed_events("com.test.app");
    let activation = events.iter().find(|e| e.new_state == Active).unwrap();
    assert_eq!(activation.navigation_intent, "home");

    // Intermediate transitions carry no intent.
    let loading = events.iter().find(|e| e.new_state == Loading).unwrap();
    assert_eq!(loading.navigation_intent, "");
}

#[tokio::test]
async fn is_app_loaded_tracks_the_registry() {
    let world = World::new();
    assert!(!world.service.is_app_loaded("com.test.app"));
    world.spawn("com.test.app", Paused).await;
    assert!(world.service.is_app_loaded("com.test.app"));
}
