// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container mount table assembly.

use crate::builder::{AppInfo, PACKAGE_MOUNT_POINT, RUNTIME_MOUNT_POINT};
use crate::device::DeviceDefaults;
use alm_core::RuntimeConfig;
use serde_json::{json, Value};

/// Directory FKPS provisioning files live under on the host.
const FKPS_PATH_PREFIX: &str = "/opt/drm/";
/// tmpfs mounted over the DRM vault inside the container.
const DRM_VAULT: &str = "/opt/drm/vault";
/// Host path of the resource-manager socket directory.
const RESMGR_SOCKET_DIR: &str = "/tmp/resource";

pub(crate) fn build_mounts(
    app: &AppInfo,
    runtime: &RuntimeConfig,
    device: &DeviceDefaults,
) -> Value {
    let mut mounts: Vec<Value> = Vec::new();

    if !runtime.app_path.is_empty() {
        mounts.push(bind_mount(
            &runtime.app_path,
            PACKAGE_MOUNT_POINT,
            &["bind", "ro", "nosuid", "nodev"],
        ));
    }
    if !runtime.runtime_path.is_empty() {
        mounts.push(bind_mount(
            &runtime.runtime_path,
            RUNTIME_MOUNT_POINT,
            &["bind", "ro", "nosuid", "nodev"],
        ));
    }
    mounts.push(bind_mount(
        "/etc/ssl/certs",
        "/etc/ssl/certs",
        &["bind", "ro", "nosuid", "nodev"],
    ));

    if let Some(private_data) = private_data_mount(runtime) {
        mounts.push(private_data);
    }

    // FKPS provisioning files bind in read-only; the vault tmpfs always
    // sits over /opt/drm/vault so the container never sees the host vault.
    for file in &runtime.fkps_files {
        let path = format!("{}{}", FKPS_PATH_PREFIX, file);
        mounts.push(bind_mount(
            &path,
            &path,
            &["bind", "ro", "nosuid", "noexec", "nodev"],
        ));
    }
    mounts.push(tmpfs_mount(DRM_VAULT, &["nosuid", "nodev", "noexec"]));

    if !app.wayland_socket_path.is_empty() && device.resource_manager_client {
        mounts.push(bind_mount(
            RESMGR_SOCKET_DIR,
            RESMGR_SOCKET_DIR,
            &["bind", "nosuid", "noexec", "nodev"],
        ));
    }

    if !device.gst_registry_source.is_empty() {
        mounts.push(bind_mount(
            &device.gst_registry_source,
            &device.gst_registry_destination,
            &["bind", "ro", "nosuid", "noexec", "nodev"],
        ));
    }

    Value::Array(mounts)
}

fn bind_mount(source: &str, destination: &str, options: &[&str]) -> Value {
    json!({
        "source": source,
        "destination": destination,
        "type": "bind",
        "options": options,
    })
}

fn tmpfs_mount(destination: &str, options: &[&str]) -> Value {
    let mut all_options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
    all_options.push("size=65536k".to_string());
    all_options.push("nr_inodes=8k".to_string());
    json!({
        "source": "tmpfs",
        "destination": destination,
        "type": "tmpfs",
        "options": all_options,
    })
}

/// Loop-mount of the unpacked private-data image, absent when the package
/// ships none.
fn private_data_mount(runtime: &RuntimeConfig) -> Option<Value> {
    if runtime.unpacked_path.is_empty() {
        return None;
    }
    Some(json!({
        "source": runtime.unpacked_path,
        "destination": "/home/private",
        "type": "loop",
        "fstype": "ext4",
        "options": ["nosuid", "nodev", "noexec"],
    }))
}

#[cfg(test)]
#[path = "mounts_tests.rs"]
mod tests;
