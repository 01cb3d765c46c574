// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package-supplied runtime configuration.

use serde::{Deserialize, Serialize};

/// Declared type of an application package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppType {
    #[default]
    Interactive,
    System,
}

/// Declarative runtime configuration shipped with an installed package.
///
/// This is the contract with the package manager: the supervisor reads the
/// fields it needs for spec derivation and passes everything else through
/// untouched (`extra` captures keys this record does not model).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    #[serde(default)]
    pub app_type: AppType,
    /// Executable path relative to the runtime mount.
    #[serde(default)]
    pub command: String,
    /// Host path of the installed package contents.
    #[serde(default)]
    pub app_path: String,
    /// Host path of the runtime the package executes under.
    #[serde(default)]
    pub runtime_path: String,
    /// Host path of the unpacked private-data image, empty when absent.
    #[serde(default)]
    pub unpacked_path: String,
    /// System memory limit in bytes; <= 0 selects the device default.
    #[serde(default)]
    pub system_memory_limit: i64,
    /// GPU memory limit in bytes; <= 0 selects the device default.
    #[serde(default)]
    pub gpu_memory_limit: i64,
    /// `NAME=value` lines handed to the container verbatim.
    #[serde(default)]
    pub env_variables: Vec<String>,
    /// Whether the container gets NAT'd WAN/LAN access.
    #[serde(default)]
    pub wan_lan_access: bool,
    /// Whether the container may reach the device IPC bus.
    #[serde(default)]
    pub thunder: bool,
    /// Whether the application registers for DIAL discovery.
    #[serde(default)]
    pub dial: bool,
    #[serde(default)]
    pub dial_id: String,
    /// DRM provisioning files to map into the container.
    #[serde(default)]
    pub fkps_files: Vec<String>,
    #[serde(default)]
    pub firebolt_version: String,
    #[serde(default)]
    pub rialto: bool,
    /// Keys this record does not model, preserved for spec derivation.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
