// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ordinals_follow_declaration_order() {
    assert_eq!(LifecycleState::Unloaded.as_u32(), 0);
    assert_eq!(LifecycleState::Loading.as_u32(), 1);
    assert_eq!(LifecycleState::Initializing.as_u32(), 2);
    assert_eq!(LifecycleState::Paused.as_u32(), 3);
    assert_eq!(LifecycleState::Active.as_u32(), 4);
    assert_eq!(LifecycleState::Suspended.as_u32(), 5);
    assert_eq!(LifecycleState::Hibernated.as_u32(), 6);
    assert_eq!(LifecycleState::Terminating.as_u32(), 7);
}

#[test]
fn from_u32_round_trips() {
    for state in LifecycleState::ALL {
        assert_eq!(LifecycleState::from_u32(state.as_u32()), Some(state));
    }
    assert_eq!(LifecycleState::from_u32(8), None);
}

#[yare::parameterized(
    unloaded = { LifecycleState::Unloaded, "Unloaded" },
    loading = { LifecycleState::Loading, "Loading" },
    active = { LifecycleState::Active, "Active" },
    terminating = { LifecycleState::Terminating, "Terminating" },
)]
fn display_names(state: LifecycleState, expected: &str) {
    assert_eq!(state.to_string(), expected);
}

#[test]
fn serde_uses_snake_case_names() {
    let json = serde_json::to_string(&LifecycleState::Initializing).unwrap();
    assert_eq!(json, "\"initializing\"");

    let parsed: LifecycleState = serde_json::from_str("\"hibernated\"").unwrap();
    assert_eq!(parsed, LifecycleState::Hibernated);
}

#[test]
fn ordinal_module_serializes_integers() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Wire {
        #[serde(with = "ordinal")]
        state: LifecycleState,
    }

    let json = serde_json::to_string(&Wire {
        state: LifecycleState::Active,
    })
    .unwrap();
    assert_eq!(json, "{\"state\":4}");

    let parsed: Wire = serde_json::from_str("{\"state\":7}").unwrap();
    assert_eq!(parsed.state, LifecycleState::Terminating);

    assert!(serde_json::from_str::<Wire>("{\"state\":42}").is_err());
}
