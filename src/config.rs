// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tunable constants for the verifier's bounded retry loop (C3, spec.md §4.3).

use std::time::Duration;

/// Default number of verify attempts: 1 initial classification is not
/// counted here; this is strictly the verify loop's attempt budget.
const DEFAULT_MAX_VERIFY_ATTEMPTS: u32 = 12;

/// Default fixed backoff between verify attempts.
const DEFAULT_VERIFY_BACKOFF: Duration = Duration::from_millis(100);

/// Configuration for [`crate::verifier::verify`].
///
/// # Example
///
/// ```
/// use rschandler::config::HandlerConfig;
///
/// let config = HandlerConfig::default();
/// assert_eq!(config.max_verify_attempts, 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Maximum number of verify attempts before giving up (spec.md: N = 12).
    pub max_verify_attempts: u32,
    /// Fixed wait between verify attempts (spec.md: 100ms).
    pub verify_backoff: Duration,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            max_verify_attempts: DEFAULT_MAX_VERIFY_ATTEMPTS,
            verify_backoff: DEFAULT_VERIFY_BACKOFF,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
