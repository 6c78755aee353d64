// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Processing-Status Classifier (C1, spec.md §4.1).
//!
//! Compares a desired change against live DNS state and yields one of
//! [`ProcessingStatus::ReadyToApply`], [`ProcessingStatus::AlreadyApplied`],
//! or [`ProcessingStatus::Failure`]. Both the pre-apply validation step and
//! the verifier's post-apply polling (C3) reuse this exact decision table:
//! "does live state now match" is the same question asked twice.

use tracing::debug;

use crate::connector::DnsConnector;
use crate::model::{ChangeType, ProcessingStatus, RecordSetChange, record_sets_equivalent};

/// Runs the decision table of spec.md §4.1 against the connector's current
/// view of DNS.
pub async fn classify(
    connector: &dyn DnsConnector,
    change: &RecordSetChange,
) -> ProcessingStatus {
    let live = match connector
        .dns_resolve(
            &change.record_set.name,
            &change.zone.name,
            &change.record_set.record_type,
        )
        .await
    {
        Ok(live) => live,
        Err(e) => {
            debug!(change_id = %change.id, error = %e, "dns_resolve failed during classification");
            return ProcessingStatus::Failure(e.message());
        }
    };

    match change.change_type {
        ChangeType::Create => classify_create(change, &live),
        ChangeType::Update => classify_update(change, &live),
        ChangeType::Delete => classify_delete(&live),
    }
}

fn classify_create(
    change: &RecordSetChange,
    live: &[crate::model::RecordSet],
) -> ProcessingStatus {
    match live.first() {
        None => ProcessingStatus::ReadyToApply,
        Some(only) if live.len() == 1 && record_sets_equivalent(only, &change.record_set) => {
            ProcessingStatus::AlreadyApplied
        }
        Some(_) => ProcessingStatus::Failure("record already exists and differs".to_string()),
    }
}

fn classify_update(
    change: &RecordSetChange,
    live: &[crate::model::RecordSet],
) -> ProcessingStatus {
    match live.first() {
        // Drift accepted when nothing is live: proceed as if this were a Create.
        None => ProcessingStatus::ReadyToApply,
        Some(only) if live.len() == 1 && record_sets_equivalent(only, &change.record_set) => {
            ProcessingStatus::AlreadyApplied
        }
        Some(only) if live.len() == 1 => match &change.updates {
            Some(expected) if record_sets_equivalent(only, expected) => {
                ProcessingStatus::ReadyToApply
            }
            _ => ProcessingStatus::Failure(
                "out of sync with the DNS backend; sync this zone and retry".to_string(),
            ),
        },
        Some(_) => ProcessingStatus::Failure(
            "out of sync with the DNS backend; sync this zone and retry".to_string(),
        ),
    }
}

fn classify_delete(live: &[crate::model::RecordSet]) -> ProcessingStatus {
    if live.is_empty() {
        ProcessingStatus::AlreadyApplied
    } else {
        ProcessingStatus::ReadyToApply
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod classifier_tests;
