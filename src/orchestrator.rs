// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Orchestrator (C4, spec.md §4.4).
//!
//! The single public entry point: drives one `RecordSetChange` through
//! `Bypass? → Validate → Apply → Verify → Persist`, owning failure
//! routing between those steps. `handle` never returns `Err` for a
//! DNS-level or classification failure: those become a terminal `Failed`
//! change, persisted like any success. Only an infrastructure fault in
//! the finalizer (C5) or batch updater (C6) escapes to the caller, per
//! spec.md §7.

use tracing::{info, warn};

use crate::bypass::requires_bypass;
use crate::classifier::classify;
use crate::config::HandlerConfig;
use crate::connector::DnsConnector;
use crate::errors::HandlerError;
use crate::model::{ChangeSet, ProcessingStatus, RecordSetChange};
use crate::repository::{BatchChangeRepository, RecordChangeRepository, RecordSetRepository};
use crate::verifier::{verify, VerifyOutcome};
use crate::{batch, finalizer, metrics};

/// Drives `change` from `Pending` to a terminal `Complete`/`Failed` state.
///
/// Returns the change in its terminal status on every anticipated
/// outcome (bypass, validation failure, apply failure, verification
/// failure, or success); those are encoded in the returned
/// `RecordSetChange.status`, not in `Err`. `Err` is reserved for the
/// finalizer or batch updater failing to persist the outcome at all, in
/// which case the change must be treated as still `Pending` by the
/// caller for later redelivery.
pub async fn handle(
    connector: &dyn DnsConnector,
    record_set_repository: &dyn RecordSetRepository,
    change_repository: &dyn RecordChangeRepository,
    batch_change_repository: &dyn BatchChangeRepository,
    config: &HandlerConfig,
    mut change: RecordSetChange,
) -> Result<RecordSetChange, HandlerError> {
    let bypass = requires_bypass(record_set_repository, &change)
        .await
        .map_err(HandlerError::Infrastructure)?;

    if bypass {
        apply_and_settle(connector, &mut change).await;
    } else {
        match classify(connector, &change).await {
            ProcessingStatus::Failure(msg) => {
                warn!(change_id = %change.id, error = %msg, "validation failed");
                change.mark_failed(msg);
            }
            ProcessingStatus::AlreadyApplied => {
                info!(change_id = %change.id, "already applied, skipping apply and verify");
                change.mark_succeeded();
            }
            ProcessingStatus::ReadyToApply => {
                apply_then_verify(connector, config, &mut change).await;
            }
        }
    }

    metrics::record_outcome(change.change_type, &change.status);

    let change_set = ChangeSet::singleton(change);
    let persisted = finalizer::finalize(record_set_repository, change_repository, &change_set).await?;
    let finalized = persisted
        .changes
        .into_iter()
        .next()
        .expect("finalize preserves the singleton change-set's one change");

    batch::apply_to_batches(batch_change_repository, &finalized).await?;

    Ok(finalized)
}

/// Bypass path: apply unconditionally, skip validate and verify.
async fn apply_and_settle(connector: &dyn DnsConnector, change: &mut RecordSetChange) {
    match connector.dns_update(change).await {
        Ok(_) => {
            info!(change_id = %change.id, "bypass apply succeeded");
            change.mark_succeeded();
        }
        Err(e) => {
            warn!(change_id = %change.id, error = %e, "bypass apply failed");
            change.mark_failed(e.message());
        }
    }
}

/// Non-bypass `ReadyToApply` path: apply, then verify unless apply itself
/// failed at the DNS level (verify is skipped per spec.md §4.4).
async fn apply_then_verify(connector: &dyn DnsConnector, config: &HandlerConfig, change: &mut RecordSetChange) {
    if let Err(e) = connector.dns_update(change).await {
        warn!(change_id = %change.id, error = %e, "apply rejected by DNS backend, skipping verify");
        change.mark_failed(e.message());
        return;
    }

    match verify(connector, change, config).await {
        VerifyOutcome::Complete => {
            info!(change_id = %change.id, "verified");
            change.mark_succeeded();
        }
        VerifyOutcome::Failed(msg) => {
            warn!(change_id = %change.id, error = %msg, "verification failed");
            change.mark_failed(msg);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
