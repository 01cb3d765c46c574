// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events published to lifecycle observers.

use crate::id::{AppId, AppInstanceId};
use crate::state::{self, LifecycleState};
use serde::{Deserialize, Serialize};

/// State-change notifications fanned out after each completed transition
/// step.
///
/// Serializes with a `{"type": "app:...", ...fields}` format; state fields
/// carry the 0-based wire ordinals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LifecycleEvent {
    /// Coarse notification for lifecycle observers.
    #[serde(rename = "app:state-changed")]
    AppStateChanged {
        app_id: AppId,
        #[serde(with = "state::ordinal")]
        state: LifecycleState,
        /// Empty on success; the action's failure reason otherwise.
        #[serde(default)]
        error_reason: String,
    },

    /// Detailed notification for state observers.
    #[serde(rename = "app:lifecycle-state-changed")]
    AppLifecycleStateChanged {
        app_id: AppId,
        app_instance_id: AppInstanceId,
        #[serde(with = "state::ordinal")]
        old_state: LifecycleState,
        #[serde(with = "state::ordinal")]
        new_state: LifecycleState,
        /// Populated when the new state is `Active`, empty otherwise.
        #[serde(default)]
        navigation_intent: String,
    },
}

impl LifecycleEvent {
    /// The application this event concerns.
    pub fn app_id(&self) -> &AppId {
        match self {
            LifecycleEvent::AppStateChanged { app_id, .. } => app_id,
            LifecycleEvent::AppLifecycleStateChanged { app_id, .. } => app_id,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
