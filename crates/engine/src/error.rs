// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the supervisor core

use alm_adapters::{DisplayAdapterError, IntentAdapterError, RuntimeAdapterError};
use alm_core::{LifecycleState, PlanError};
use thiserror::Error;

/// Errors surfaced by supervisor operations.
///
/// Recoverable errors abort only the current planned path; the context is
/// preserved in its last successfully entered state.
#[derive(Debug, Error, Clone)]
pub enum EngineError {
    /// Unknown app id / instance id, or an empty required field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The planner could not reach the requested target state.
    #[error("no lifecycle path from {from} to {to}")]
    NoPath {
        from: LifecycleState,
        to: LifecycleState,
    },

    /// A state action's collaborator call failed.
    #[error("{0}")]
    ActionFailed(String),

    /// A gate wait exceeded its deadline.
    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    /// A collaborator could not be reached after retries.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// The dispatcher stopped while the request was pending.
    #[error("supervisor shutting down")]
    Shutdown,
}

impl From<PlanError> for EngineError {
    fn from(error: PlanError) -> Self {
        match error {
            PlanError::NoPath { from, to } => EngineError::NoPath { from, to },
        }
    }
}

impl From<RuntimeAdapterError> for EngineError {
    fn from(error: RuntimeAdapterError) -> Self {
        match error {
            RuntimeAdapterError::Unavailable(reason) => {
                EngineError::CollaboratorUnavailable(reason)
            }
            RuntimeAdapterError::Failed(reason) => EngineError::ActionFailed(reason),
        }
    }
}

impl From<DisplayAdapterError> for EngineError {
    fn from(error: DisplayAdapterError) -> Self {
        match error {
            DisplayAdapterError::Unavailable(reason) => {
                EngineError::CollaboratorUnavailable(reason)
            }
            DisplayAdapterError::Failed(reason) => EngineError::ActionFailed(reason),
        }
    }
}

impl From<IntentAdapterError> for EngineError {
    fn from(error: IntentAdapterError) -> Self {
        match error {
            IntentAdapterError::Unavailable(reason) => EngineError::CollaboratorUnavailable(reason),
            IntentAdapterError::Failed(reason) => EngineError::ActionFailed(reason),
        }
    }
}
