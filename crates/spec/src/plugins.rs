// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rdkPlugins and classic plugin blocks.

use crate::builder::AppInfo;
use crate::device::DeviceDefaults;
use alm_core::RuntimeConfig;
use serde_json::{json, Map, Value};

pub(crate) fn build_rdk_plugins(
    app: &AppInfo,
    runtime: &RuntimeConfig,
    device: &DeviceDefaults,
) -> Value {
    let mut plugins = Map::new();

    let ports = additional_ports(app, runtime, device);
    if !ports.is_empty() {
        plugins.insert(
            "appservicesrdk".into(),
            json!({
                "required": false,
                "dependsOn": ["networking"],
                "data": { "additionalPorts": ports },
            }),
        );
    }

    plugins.insert(
        "ionmemory".into(),
        json!({
            "data": {
                "defaultLimit": device.ion_default_limit,
                "heaps": device
                    .ion_heaps
                    .iter()
                    .map(|heap| json!({ "name": heap.name, "limit": heap.limit }))
                    .collect::<Vec<_>>(),
            },
        }),
    );

    plugins.insert("networking".into(), networking_plugin(runtime, device));

    if runtime.thunder {
        plugins.insert(
            "thunder".into(),
            json!({
                "dependsOn": ["networking"],
                "data": { "bearerUrl": device.thunder_bearer_url },
            }),
        );
    }

    plugins.insert(
        "minidump".into(),
        json!({
            "required": false,
            "data": {
                "destinationPath": if device.secure_dump_disabled {
                    "/opt/minidumps"
                } else {
                    "/opt/secure/minidumps"
                },
            },
        }),
    );

    if app.requires_drm {
        plugins.insert(
            "opencdm".into(),
            json!({ "required": false, "data": Value::Null }),
        );
    }

    Value::Object(plugins)
}

/// DIAL server port first, then the app's allocated ports, then MAPI ports.
fn additional_ports(app: &AppInfo, runtime: &RuntimeConfig, device: &DeviceDefaults) -> Vec<u16> {
    let mut ports = Vec::new();
    if runtime.dial {
        ports.push(device.dial_server_port);
    }
    ports.extend(app.ports.iter().copied());
    if device.mapi_enabled {
        ports.extend(device.mapi_ports.iter().copied());
    }
    ports
}

fn networking_plugin(runtime: &RuntimeConfig, device: &DeviceDefaults) -> Value {
    let (net_type, dnsmasq) = if runtime.wan_lan_access {
        ("nat", true)
    } else {
        ("none", false)
    };
    json!({
        "required": true,
        "data": {
            "type": net_type,
            "dnsmasq": dnsmasq,
            "ipv4": true,
            "ipv6": device.ipv6,
        },
    })
}

/// The classic plugins array: container logging with the full level set.
pub(crate) fn build_classic_plugins() -> Value {
    json!([
        {
            "name": "EthanLog",
            "data": {
                "loglevels": ["fatal", "error", "warning", "info", "debug", "milestone"],
            },
        }
    ])
}

#[cfg(test)]
#[path = "plugins_tests.rs"]
mod tests;
