// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use alm_core::SequentialIdGen;

fn registry() -> Registry {
    Registry::new(Arc::new(SequentialIdGen::new("inst")))
}

#[test]
fn get_or_create_is_idempotent_per_app_id() {
    let registry = registry();
    let app = AppId::new("com.test.app");

    let (first, created) = registry.get_or_create(&app);
    assert!(created);
    let (second, created) = registry.get_or_create(&app);
    assert!(!created);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.list().len(), 1);
}

#[test]
fn find_by_either_key() {
    let registry = registry();
    let (ctx, _) = registry.get_or_create(&AppId::new("com.test.app"));
    registry.assign_instance_id(&ctx).unwrap();

    assert!(registry.find(IdKind::AppId, "com.test.app").is_some());
    assert!(registry.find(IdKind::AppInstanceId, "inst-1").is_some());
    assert!(registry.find(IdKind::AppId, "inst-1").is_none());
    assert!(registry.find(IdKind::AppInstanceId, "com.test.app").is_none());
    assert!(registry.find(IdKind::AppId, "").is_none());
}

#[test]
fn resolve_matches_instance_then_app_id() {
    let registry = registry();
    let (ctx, _) = registry.get_or_create(&AppId::new("com.test.app"));
    registry.assign_instance_id(&ctx).unwrap();

    assert!(registry.resolve("inst-1").is_some());
    assert!(registry.resolve("com.test.app").is_some());
    assert!(registry.resolve("unknown").is_none());
}

#[test]
fn assign_instance_id_fails_when_present() {
    let registry = registry();
    let (ctx, _) = registry.get_or_create(&AppId::new("com.test.app"));

    let id = registry.assign_instance_id(&ctx).unwrap();
    assert_eq!(id, AppInstanceId::new("inst-1"));

    let err = registry.assign_instance_id(&ctx).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    // The original assignment is untouched.
    assert_eq!(ctx.app_instance_id(), AppInstanceId::new("inst-1"));
}

#[test]
fn drop_if_terminal_requires_terminating_history() {
    let registry = registry();
    let (ctx, _) = registry.get_or_create(&AppId::new("com.test.app"));

    // Freshly created contexts are Unloaded but never terminated.
    assert!(!registry.drop_if_terminal(&ctx));

    ctx.apply_transition(LifecycleState::Terminating, 1, 0);
    assert!(!registry.drop_if_terminal(&ctx));

    ctx.apply_transition(LifecycleState::Unloaded, 2, 0);
    assert!(registry.drop_if_terminal(&ctx));
    assert!(!registry.is_loaded(&AppId::new("com.test.app")));

    // A second drop is a no-op.
    assert!(!registry.drop_if_terminal(&ctx));
}

#[test]
fn list_snapshots_every_context() {
    let registry = registry();
    registry.get_or_create(&AppId::new("com.a"));
    registry.get_or_create(&AppId::new("com.b"));

    let snapshots = registry.list();
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots.iter().any(|s| s.app_id == "com.a"));
    assert!(snapshots.iter().any(|s| s.app_id == "com.b"));
}
