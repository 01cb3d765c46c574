// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device-wide defaults consumed by the spec builder.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading the device configuration file
#[derive(Debug, Error)]
pub enum DeviceConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A named ion heap quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IonHeap {
    pub name: String,
    pub limit: u64,
}

/// Device-wide defaults for container derivation.
///
/// Loaded once at startup from a TOML file; every field has a built-in
/// default so a missing or partial file still yields a usable
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDefaults {
    /// Fallback system memory limit (bytes) for interactive apps that do
    /// not declare their own.
    pub interactive_app_memory_limit: i64,
    /// Fallback GPU memory limit (bytes).
    pub interactive_app_gpu_limit: i64,
    /// Bitmask of CPU cores containers may run on; 0 means all cores.
    pub apps_cpu_set: u32,
    /// App ids denied VPU access.
    pub vpu_blacklist: Vec<String>,
    /// App ids granted a system DBus connection.
    pub dbus_allowlist: Vec<String>,
    pub mapi_enabled: bool,
    pub mapi_ports: Vec<u16>,
    /// Whether the Essos resource-manager client is wired into containers.
    pub resource_manager_client: bool,
    pub ipv6: bool,
    pub ion_default_limit: u64,
    pub ion_heaps: Vec<IonHeap>,
    pub dial_server_port: u16,
    pub dial_server_path_prefix: String,
    pub dial_usn: String,
    /// Libraries injected via /etc/ld-preload.
    pub preloads: Vec<String>,
    /// Extra `NAME=value` lines appended to every container environment.
    pub extra_env: Vec<String>,
    /// Host path of the pre-generated GStreamer registry; empty disables
    /// the registry mount and env lines.
    pub gst_registry_source: String,
    pub gst_registry_destination: String,
    /// Bearer URL handed to the thunder plugin when the app requests IPC
    /// bus access.
    pub thunder_bearer_url: String,
    /// Set when the secure-dump filesystem probe found dumps disabled;
    /// minidumps then land on the insecure path.
    pub secure_dump_disabled: bool,
}

impl Default for DeviceDefaults {
    fn default() -> Self {
        Self {
            interactive_app_memory_limit: 256 * 1024 * 1024,
            interactive_app_gpu_limit: 64 * 1024 * 1024,
            apps_cpu_set: 0,
            vpu_blacklist: Vec::new(),
            dbus_allowlist: Vec::new(),
            mapi_enabled: false,
            mapi_ports: Vec::new(),
            resource_manager_client: false,
            ipv6: false,
            ion_default_limit: 64 * 1024 * 1024,
            ion_heaps: Vec::new(),
            dial_server_port: 56889,
            dial_server_path_prefix: "apps".to_string(),
            dial_usn: String::new(),
            preloads: Vec::new(),
            extra_env: Vec::new(),
            gst_registry_source: String::new(),
            gst_registry_destination: "/tmp/gstreamer-cached-registry.bin".to_string(),
            thunder_bearer_url: "http://local-services-2.sky.com".to_string(),
            secure_dump_disabled: false,
        }
    }
}

impl DeviceDefaults {
    /// Load defaults from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DeviceConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DeviceConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| DeviceConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
