// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a supervised application.
///
/// Wire ordinals are the 0-based declaration order. `Unloaded` is the only
/// initial state; `Unloaded` reached again after `Terminating` is terminal
/// and the application's context is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Unloaded,
    Loading,
    Initializing,
    Paused,
    Active,
    Suspended,
    Hibernated,
    Terminating,
}

impl LifecycleState {
    /// All states, in ordinal order.
    pub const ALL: [LifecycleState; 8] = [
        LifecycleState::Unloaded,
        LifecycleState::Loading,
        LifecycleState::Initializing,
        LifecycleState::Paused,
        LifecycleState::Active,
        LifecycleState::Suspended,
        LifecycleState::Hibernated,
        LifecycleState::Terminating,
    ];

    /// 0-based wire ordinal.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Inverse of [`as_u32`](Self::as_u32).
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unloaded => "Unloaded",
            LifecycleState::Loading => "Loading",
            LifecycleState::Initializing => "Initializing",
            LifecycleState::Paused => "Paused",
            LifecycleState::Active => "Active",
            LifecycleState::Suspended => "Suspended",
            LifecycleState::Hibernated => "Hibernated",
            LifecycleState::Terminating => "Terminating",
        };
        write!(f, "{}", name)
    }
}

/// Serialize a [`LifecycleState`] as its 0-based wire ordinal.
///
/// Event payloads and the loaded-apps snapshot carry states as integers;
/// use with `#[serde(with = "state::ordinal")]`.
pub mod ordinal {
    use super::LifecycleState;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        state: &LifecycleState,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(state.as_u32())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LifecycleState, D::Error> {
        let value = u32::deserialize(deserializer)?;
        LifecycleState::from_u32(value)
            .ok_or_else(|| de::Error::custom(format!("unknown lifecycle state ordinal {}", value)))
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
