// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Legal state adjacencies and the transition planner.

use crate::state::LifecycleState;
use std::collections::VecDeque;
use thiserror::Error;

/// Planner failure: the target cannot be reached from the current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("no lifecycle path from {from} to {to}")]
    NoPath {
        from: LifecycleState,
        to: LifecycleState,
    },
}

/// States a given state may be entered *from*.
///
/// `Unloaded` has no predecessors: once an application terminates there is
/// no route back to `Loading` for the same context; the context is dropped
/// and a later spawn creates a fresh one.
pub fn predecessors(state: LifecycleState) -> &'static [LifecycleState] {
    use LifecycleState::*;
    match state {
        Unloaded => &[],
        Loading => &[Unloaded],
        Initializing => &[Loading],
        Paused => &[Initializing, Active, Suspended],
        Active => &[Paused],
        Suspended => &[Initializing, Paused, Hibernated],
        Hibernated => &[Suspended],
        Terminating => &[Paused, Suspended],
    }
}

/// Plan the ordered sequence of states to traverse from `current` to
/// `target`.
///
/// The path excludes `current` and includes `target`; every adjacent pair is
/// a legal edge of the predecessor table. A `Terminating` target is
/// implicitly extended with the final `Unloaded` step.
///
/// Search is a reverse breadth-first walk from `target`: ties between
/// equal-length routes resolve to whichever predecessor is listed first in
/// [`predecessors`], so the result is deterministic for a fixed table.
pub fn plan(
    current: LifecycleState,
    target: LifecycleState,
) -> Result<Vec<LifecycleState>, PlanError> {
    if current == target {
        return Ok(Vec::new());
    }

    // next_toward[s] = the state `s` steps into on the way to `target`.
    let mut next_toward: [Option<LifecycleState>; 8] = [None; 8];
    let mut seen = [false; 8];
    let mut queue = VecDeque::new();

    seen[target.as_u32() as usize] = true;
    queue.push_back(target);

    while let Some(state) = queue.pop_front() {
        for &pred in predecessors(state) {
            let idx = pred.as_u32() as usize;
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            next_toward[idx] = Some(state);
            if pred == current {
                return Ok(walk(current, target, &next_toward));
            }
            queue.push_back(pred);
        }
    }

    Err(PlanError::NoPath {
        from: current,
        to: target,
    })
}

fn walk(
    current: LifecycleState,
    target: LifecycleState,
    next_toward: &[Option<LifecycleState>; 8],
) -> Vec<LifecycleState> {
    let mut path = Vec::new();
    let mut state = current;
    while state != target {
        match next_toward[state.as_u32() as usize] {
            Some(next) => {
                path.push(next);
                state = next;
            }
            None => break,
        }
    }
    if target == LifecycleState::Terminating {
        path.push(LifecycleState::Unloaded);
    }
    path
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
