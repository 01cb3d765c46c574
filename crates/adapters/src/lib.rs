// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Collaborator adapters: the only paths between the supervisor core and the
//! container runtime, the window manager, the package manager, and the
//! intent gateway.

pub mod display;
pub mod intent;
pub mod package;
pub mod retry;
pub mod runtime;
pub mod traced;

pub use display::{DisplayAdapter, DisplayAdapterError, DisplayEvent};
pub use intent::{IntentAdapter, IntentAdapterError};
pub use package::{PackageAdapter, PackageAdapterError};
pub use retry::{with_retry, RetryConfig};
pub use runtime::{RunRequest, RuntimeAdapter, RuntimeAdapterError, RuntimeEvent, RuntimeState};
pub use traced::{TracedDisplay, TracedRuntime};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use display::{DisplayCall, FakeDisplayAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use intent::{FakeIntentAdapter, IntentCall};
#[cfg(any(test, feature = "test-support"))]
pub use package::{FakePackageAdapter, PackageCall};
#[cfg(any(test, feature = "test-support"))]
pub use runtime::{FakeRuntimeAdapter, RuntimeCall};
