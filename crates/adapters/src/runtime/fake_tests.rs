// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn instance(id: &str) -> AppInstanceId {
    AppInstanceId::new(id)
}

#[tokio::test]
async fn records_calls_in_order() {
    let adapter = FakeRuntimeAdapter::new();
    let id = instance("inst-1");

    adapter.suspend(&id).await.unwrap();
    adapter.resume(&id).await.unwrap();
    adapter.hibernate(&id, "").await.unwrap();

    assert_eq!(
        adapter.calls(),
        vec![
            RuntimeCall::Suspend(id.clone()),
            RuntimeCall::Resume(id.clone()),
            RuntimeCall::Hibernate(id, String::new()),
        ]
    );
}

#[tokio::test]
async fn scripted_failure_consumed_once() {
    let adapter = FakeRuntimeAdapter::new();
    let id = instance("inst-1");
    adapter.fail_next("suspend", "container is busy");

    let err = adapter.suspend(&id).await.unwrap_err();
    assert!(err.to_string().contains("container is busy"));

    // Second call succeeds.
    adapter.suspend(&id).await.unwrap();
}

#[tokio::test]
async fn auto_ack_run_reports_running() {
    let adapter = FakeRuntimeAdapter::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    adapter.connect_events(tx);
    adapter.auto_ack();

    let request = RunRequest {
        app_instance_id: instance("inst-1"),
        ..Default::default()
    };
    adapter.run(request).await.unwrap();

    assert_eq!(
        rx.recv().await,
        Some(RuntimeEvent::StateChanged {
            app_instance_id: instance("inst-1"),
            state: RuntimeState::Running,
        })
    );
}

#[tokio::test]
async fn auto_ack_kill_reports_terminated() {
    let adapter = FakeRuntimeAdapter::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    adapter.connect_events(tx);
    adapter.auto_ack();

    adapter.kill(&instance("inst-2")).await.unwrap();

    assert_eq!(
        rx.recv().await,
        Some(RuntimeEvent::Terminated {
            app_instance_id: instance("inst-2"),
        })
    );
}

#[yare::parameterized(
    suspended = { alm_core::LifecycleState::Suspended, RuntimeState::Suspended },
    paused = { alm_core::LifecycleState::Paused, RuntimeState::Running },
    active = { alm_core::LifecycleState::Active, RuntimeState::Running },
    loading = { alm_core::LifecycleState::Loading, RuntimeState::Unknown },
)]
fn wake_target_mapping(target: alm_core::LifecycleState, expected: RuntimeState) {
    assert_eq!(RuntimeState::from_wake_target(target), expected);
}
