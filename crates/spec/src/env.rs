// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container environment assembly.

use crate::builder::AppInfo;
use crate::device::DeviceDefaults;
use alm_core::RuntimeConfig;
use serde_json::{json, Value};

/// Assemble the `env` array: application identity first, then the
/// package-declared lines, then device lines, then the conditional blocks.
pub(crate) fn build_env(
    app: &AppInfo,
    runtime: &RuntimeConfig,
    device: &DeviceDefaults,
) -> Value {
    let mut env: Vec<String> = Vec::new();
    env.push(format!("APPLICATION_NAME={}", app.app_id));

    env.extend(runtime.env_variables.iter().cloned());
    env.extend(device.extra_env.iter().cloned());

    if !app.wayland_socket_path.is_empty() {
        env.push("XDG_RUNTIME_DIR=/tmp".into());
        env.push("WAYLAND_DISPLAY=westeros".into());
        env.push("WESTEROS_SINK_VIRTUAL_WIDTH=1920".into());
        env.push("WESTEROS_SINK_VIRTUAL_HEIGHT=1080".into());
        env.push("QT_WAYLAND_CLIENT_BUFFER_INTEGRATION=wayland-egl".into());
        env.push("QT_WAYLAND_SHELL_INTEGRATION=wl-simple-shell".into());
        env.push("QT_WAYLAND_INPUTDEVICE_INTEGRATION=skyq-input".into());
        env.push("QT_QPA_PLATFORM=wayland-sky-rdk".into());
    }

    if device.resource_manager_client {
        env.push(format!("ESSRMGR_APPID={}", app.app_id));
        env.push(format!("CLIENT_IDENTIFIER={}", app.app_id));
        if !app.wayland_socket_path.is_empty() {
            env.push("WESTEROS_SINK_USE_ESSRMGR=1".into());
        }
    }

    if runtime.dial {
        env.push(format!("APPLICATION_DIAL_NAME={}", runtime.dial_id));
        let data_url = format!(
            "http://127.0.0.1:{}/{}/{}/dial_data",
            device.dial_server_port, device.dial_server_path_prefix, runtime.dial_id
        );
        env.push(format!("ADDITIONAL_DATA_URL={}", percent_encode(&data_url)));
        env.push(format!("DIAL_USN={}", device.dial_usn));
    }

    if !device.gst_registry_source.is_empty() {
        env.push(format!("GST_REGISTRY={}", device.gst_registry_destination));
        env.push("GST_REGISTRY_UPDATE=no".into());
    }

    json!(env)
}

/// Percent-encode everything outside the URL unreserved set, the way
/// curl's escape helper does.
pub(crate) fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{:02X}", byte));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
