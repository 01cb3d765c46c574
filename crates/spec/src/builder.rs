// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container launch descriptor assembly.
//!
//! [`build`] is a pure function of its three inputs; equal inputs produce
//! byte-equal documents (JSON keys serialize in sorted order).

use crate::device::DeviceDefaults;
use crate::{env, mounts, plugins};
use alm_core::{AppType, RuntimeConfig};
use serde_json::{json, Value};

/// Container-side mount point of the installed package contents.
pub(crate) const PACKAGE_MOUNT_POINT: &str = "/package";
/// Container-side mount point of the runtime.
pub(crate) const RUNTIME_MOUNT_POINT: &str = "/runtime";

/// Per-application facts the builder needs beyond the runtime config:
/// identity, credentials, display wiring, and probed host facts. Carrying
/// the probes here keeps [`build`] itself free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub app_id: String,
    pub uid: u32,
    pub gid: u32,
    /// Host path of the app's wayland (westeros) socket; empty for
    /// headless apps.
    pub wayland_socket_path: String,
    /// Host ports already allocated to the app.
    pub ports: Vec<u16>,
    /// Number of online CPUs on the device.
    pub online_cpus: u32,
    /// Whether the app needs DRM plumbing (OpenCDM).
    pub requires_drm: bool,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            uid: 0,
            gid: 0,
            wayland_socket_path: String::new(),
            ports: Vec::new(),
            online_cpus: 4,
            requires_drm: false,
        }
    }
}

/// The serialized launch descriptor consumed by the container runtime.
///
/// Opaque from the supervisor's perspective: built exactly once per
/// application lifetime and handed to the runtime collaborator verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec(Value);

impl ContainerSpec {
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// The wire form handed to the container runtime.
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }
}

/// Derive the container launch descriptor for one application.
pub fn build(app: &AppInfo, runtime: &RuntimeConfig, device: &DeviceDefaults) -> ContainerSpec {
    let mut spec = serde_json::Map::new();

    spec.insert("version".into(), json!("1.1"));
    spec.insert("memLimit".into(), json!(system_memory_limit(runtime, device)));
    spec.insert(
        "args".into(),
        json!([format!("{}/{}", RUNTIME_MOUNT_POINT, runtime.command)]),
    );
    spec.insert("cwd".into(), json!(PACKAGE_MOUNT_POINT));
    spec.insert("restartOnCrash".into(), json!(false));

    if !app.wayland_socket_path.is_empty() {
        spec.insert(
            "gpu".into(),
            json!({
                "enable": true,
                "memLimit": gpu_memory_limit(runtime, device),
            }),
        );
    }

    spec.insert(
        "vpu".into(),
        json!({ "enable": vpu_enabled(app, runtime, device) }),
    );

    if device.dbus_allowlist.iter().any(|id| id == &app.app_id) {
        spec.insert("dbus".into(), json!({ "system": "system" }));
    }

    spec.insert("cpu".into(), json!({ "cores": cpu_cores(app, device) }));
    spec.insert("etc".into(), etc_block(device));
    spec.insert(
        "network".into(),
        json!(if runtime.wan_lan_access { "nat" } else { "private" }),
    );
    spec.insert(
        "user".into(),
        json!({ "uid": app.uid, "gid": app.gid }),
    );
    spec.insert("env".into(), env::build_env(app, runtime, device));
    spec.insert("mounts".into(), mounts::build_mounts(app, runtime, device));
    spec.insert(
        "rdkPlugins".into(),
        plugins::build_rdk_plugins(app, runtime, device),
    );
    spec.insert("plugins".into(), plugins::build_classic_plugins());

    ContainerSpec(Value::Object(spec))
}

/// The declared limit when positive, else the device-default interactive
/// limit.
fn system_memory_limit(runtime: &RuntimeConfig, device: &DeviceDefaults) -> i64 {
    if runtime.system_memory_limit > 0 {
        runtime.system_memory_limit
    } else {
        device.interactive_app_memory_limit
    }
}

fn gpu_memory_limit(runtime: &RuntimeConfig, device: &DeviceDefaults) -> i64 {
    if runtime.gpu_memory_limit > 0 {
        runtime.gpu_memory_limit
    } else {
        device.interactive_app_gpu_limit
    }
}

/// VPU access: denied to SYSTEM apps and to blacklisted app ids.
fn vpu_enabled(app: &AppInfo, runtime: &RuntimeConfig, device: &DeviceDefaults) -> bool {
    if runtime.app_type == AppType::System {
        return false;
    }
    !device.vpu_blacklist.iter().any(|id| id == &app.app_id)
}

/// Comma-separated list of enabled cores: the device CPU-set bitmask
/// intersected with the online cores, falling back to all online cores when
/// the intersection is empty.
fn cpu_cores(app: &AppInfo, device: &DeviceDefaults) -> String {
    let n_cores = app.online_cpus.clamp(1, 32);
    let online_mask = if n_cores == 32 {
        u32::MAX
    } else {
        (1u32 << n_cores) - 1
    };

    let mut mask = device.apps_cpu_set & online_mask;
    if mask == 0 {
        mask = online_mask;
    }

    let cores: Vec<String> = (0..n_cores)
        .filter(|core| mask & (1 << core) != 0)
        .map(|core| core.to_string())
        .collect();
    cores.join(",")
}

fn etc_block(device: &DeviceDefaults) -> Value {
    let mut services: Vec<String> = vec![
        "ftp\t\t21/tcp".into(),
        "domain\t\t53/tcp".into(),
        "domain\t\t53/udp".into(),
        "http\t\t80/tcp\t\twww".into(),
        "http\t\t80/udp".into(),
        "ntp\t\t123/udp".into(),
        "https\t\t443/tcp".into(),
        "https\t\t443/udp".into(),
    ];
    if device.mapi_enabled {
        for port in &device.mapi_ports {
            services.push(format!("mapi\t\t{}/tcp", port));
        }
    }

    json!({
        "hosts": ["127.0.0.1\tlocalhost"],
        "services": services,
        "ld-preload": device.preloads,
    })
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
