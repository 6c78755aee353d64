// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Verifier (C3, spec.md §4.3).
//!
//! Bounded retry loop confirming DNS now reflects the intended post-state,
//! shaped after `bindy`'s `reconcilers::retry::retry_api_call`: a fixed
//! attempt budget, a sleep between attempts, and a distinct code path for
//! "stop retrying now" versus "exhausted, give up".

use tracing::{debug, warn};

use crate::classifier::classify;
use crate::config::HandlerConfig;
use crate::connector::DnsConnector;
use crate::metrics;
use crate::model::{ProcessingStatus, RecordSetChange};

/// Terminal outcome of a verify run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Complete,
    Failed(String),
}

/// Polls DNS up to `config.max_verify_attempts` times, waiting
/// `config.verify_backoff` between attempts, until the change's classifier
/// reports `AlreadyApplied` (meaning the post-state is now live).
pub async fn verify(
    connector: &dyn DnsConnector,
    change: &RecordSetChange,
    config: &HandlerConfig,
) -> VerifyOutcome {
    for attempt in 1..=config.max_verify_attempts {
        match classify(connector, change).await {
            ProcessingStatus::AlreadyApplied => {
                debug!(change_id = %change.id, attempt, "verification observed expected state");
                metrics::record_verify_attempts(change.change_type, attempt);
                return VerifyOutcome::Complete;
            }
            ProcessingStatus::Failure(msg) => {
                // A DNS error during verify stops immediately; remaining
                // attempts are not consumed.
                warn!(change_id = %change.id, attempt, error = %msg, "verification hit a DNS error");
                metrics::record_verify_attempts(change.change_type, attempt);
                return VerifyOutcome::Failed(msg);
            }
            ProcessingStatus::ReadyToApply => {
                debug!(change_id = %change.id, attempt, "expected state not yet observed, retrying");
                if attempt < config.max_verify_attempts {
                    tokio::time::sleep(config.verify_backoff).await;
                }
            }
        }
    }

    let message = format!(
        "verification did not observe expected state for record-set {} ({}) after {} attempts",
        change.record_set.id, change.record_set.name, config.max_verify_attempts
    );
    warn!(change_id = %change.id, "{message}");
    metrics::record_verify_attempts(change.change_type, config.max_verify_attempts);
    VerifyOutcome::Failed(message)
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod verifier_tests;
