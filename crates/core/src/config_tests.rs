// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn deserializes_camel_case_wire_form() {
    let json = r#"{
        "appType": "INTERACTIVE",
        "command": "bin/app",
        "appPath": "/apps/com.test.app",
        "runtimePath": "/runtimes/web",
        "systemMemoryLimit": 134217728,
        "wanLanAccess": true,
        "envVariables": ["FOO=bar"]
    }"#;

    let config: RuntimeConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.app_type, AppType::Interactive);
    assert_eq!(config.command, "bin/app");
    assert_eq!(config.system_memory_limit, 134_217_728);
    assert!(config.wan_lan_access);
    assert_eq!(config.env_variables, vec!["FOO=bar".to_string()]);
    // Unset fields fall back to defaults.
    assert!(!config.dial);
    assert!(config.unpacked_path.is_empty());
}

#[test]
fn unknown_fields_pass_through() {
    let json = r#"{"command": "bin/app", "vendorWidget": {"knob": 3}}"#;
    let config: RuntimeConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.extra.get("vendorWidget"),
        Some(&serde_json::json!({"knob": 3}))
    );

    // And survive re-serialization.
    let round = serde_json::to_value(&config).unwrap();
    assert_eq!(round["vendorWidget"]["knob"], 3);
}

#[test]
fn app_type_uses_uppercase_names() {
    assert_eq!(
        serde_json::to_string(&AppType::System).unwrap(),
        "\"SYSTEM\""
    );
    let parsed: AppType = serde_json::from_str("\"INTERACTIVE\"").unwrap();
    assert_eq!(parsed, AppType::Interactive);
}
