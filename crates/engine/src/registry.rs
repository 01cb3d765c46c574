// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application registry: the table of loaded application contexts.

use crate::context::{AppContext, AppSnapshot};
use crate::error::EngineError;
use alm_core::{AppId, AppInstanceId, IdGen, LifecycleState};
use parking_lot::Mutex;
use std::sync::Arc;

/// Which identifier a lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    AppId,
    AppInstanceId,
}

/// Registry of loaded applications.
///
/// A linear scan over a small vector; expected cardinality is tens of apps.
pub struct Registry {
    contexts: Mutex<Vec<Arc<AppContext>>>,
    idgen: Arc<dyn IdGen>,
}

impl Registry {
    pub fn new(idgen: Arc<dyn IdGen>) -> Self {
        Self {
            contexts: Mutex::new(Vec::new()),
            idgen,
        }
    }

    /// Fetch the context for `app_id`, creating a fresh `Unloaded` one if
    /// absent. Returns `(context, created)`.
    pub fn get_or_create(&self, app_id: &AppId) -> (Arc<AppContext>, bool) {
        let mut contexts = self.contexts.lock();
        if let Some(ctx) = contexts.iter().find(|c| &c.app_id == app_id) {
            return (Arc::clone(ctx), false);
        }
        let ctx = Arc::new(AppContext::new(app_id.clone()));
        contexts.push(Arc::clone(&ctx));
        (ctx, true)
    }

    /// Look up a context by one identifier kind.
    pub fn find(&self, kind: IdKind, id: &str) -> Option<Arc<AppContext>> {
        if id.is_empty() {
            return None;
        }
        let contexts = self.contexts.lock();
        contexts
            .iter()
            .find(|ctx| match kind {
                IdKind::AppId => ctx.app_id == *id,
                IdKind::AppInstanceId => ctx.app_instance_id() == *id,
            })
            .map(Arc::clone)
    }

    /// Look up by either identifier in one pass: instance id wins over
    /// app id when both happen to match different contexts.
    pub fn resolve(&self, id: &str) -> Option<Arc<AppContext>> {
        if id.is_empty() {
            return None;
        }
        let contexts = self.contexts.lock();
        let mut by_app_id = None;
        for ctx in contexts.iter() {
            if ctx.app_instance_id() == *id {
                return Some(Arc::clone(ctx));
            }
            if by_app_id.is_none() && ctx.app_id == *id {
                by_app_id = Some(Arc::clone(ctx));
            }
        }
        by_app_id
    }

    /// Generate and attach a fresh instance id; fails if one is already
    /// assigned.
    pub fn assign_instance_id(&self, ctx: &AppContext) -> Result<AppInstanceId, EngineError> {
        if !ctx.app_instance_id().is_empty() {
            return Err(EngineError::InvalidArgument(format!(
                "instance id already assigned for {}",
                ctx.app_id
            )));
        }
        let id = AppInstanceId::new(self.idgen.next());
        ctx.set_app_instance_id(id.clone());
        Ok(id)
    }

    /// Remove the entry once it is terminally unloaded (reached `Unloaded`
    /// via `Terminating`). Returns whether an entry was removed.
    pub fn drop_if_terminal(&self, ctx: &AppContext) -> bool {
        if ctx.current_state() != LifecycleState::Unloaded || !ctx.reached_terminating() {
            return false;
        }
        let mut contexts = self.contexts.lock();
        let before = contexts.len();
        contexts.retain(|c| !std::ptr::eq(c.as_ref(), ctx));
        before != contexts.len()
    }

    /// Whether a context exists for the app id.
    pub fn is_loaded(&self, app_id: &AppId) -> bool {
        self.find(IdKind::AppId, app_id.as_str()).is_some()
    }

    /// Copy of every context's observable fields.
    pub fn list(&self) -> Vec<AppSnapshot> {
        self.contexts.lock().iter().map(|c| c.snapshot()).collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
