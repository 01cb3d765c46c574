// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconnect/retry policy shared by adapter implementations.

use std::future::Future;
use std::time::Duration;

/// How often and how patiently to retry a collaborator call.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub retries: u32,
    /// Delay between attempts.
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff: Duration::from_millis(200),
        }
    }
}

/// Run `op` until it succeeds or the retry budget is exhausted; returns the
/// last error otherwise. Used by adapter implementations around connection
/// and subscription calls so collaborator restarts are survived.
pub async fn with_retry<T, E, F, Fut>(config: RetryConfig, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= config.retries {
                    return Err(error);
                }
                tracing::warn!(attempt, error = %error, "collaborator call failed, retrying");
                attempt += 1;
                tokio::time::sleep(config.backoff).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
