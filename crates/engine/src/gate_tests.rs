// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

const SHORT: Duration = Duration::from_millis(20);

#[tokio::test]
async fn post_before_wait_is_not_lost() {
    let gates = GateSet::new();
    let cancel = CancellationToken::new();

    gates.app_running.post();
    gates.app_running.wait(SHORT, &cancel).await.unwrap();
}

#[tokio::test]
async fn each_wait_consumes_one_post() {
    let gates = GateSet::new();
    let cancel = CancellationToken::new();

    gates.first_frame.post();
    gates.first_frame.wait(SHORT, &cancel).await.unwrap();

    // The permit is spent; a second wait times out.
    let err = gates.first_frame.wait(SHORT, &cancel).await.unwrap_err();
    assert!(matches!(err, EngineError::Timeout("first_frame")));
}

#[tokio::test]
async fn wait_resolves_when_posted_concurrently() {
    let gates = std::sync::Arc::new(GateSet::new());
    let cancel = CancellationToken::new();

    let waiter = {
        let gates = std::sync::Arc::clone(&gates);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            gates
                .app_terminating
                .wait(Duration::from_secs(5), &cancel)
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(5)).await;
    gates.app_terminating.post();
    waiter.await.unwrap().unwrap();
}

#[tokio::test]
async fn cancellation_reports_shutdown() {
    let gates = GateSet::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = gates
        .reached_loading
        .wait(Duration::from_secs(5), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Shutdown));
}
