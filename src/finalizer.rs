// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Change-Set Finalizer (C5, spec.md §4.5).
//!
//! Two ordered writes, both assumed idempotent by change id: the
//! record-set projection is updated first, then the audit log. Either
//! write failing is an infrastructure fault, not a change-level failure;
//! it escapes `handle` with the change left `Pending` for later
//! redelivery, per spec.md §7's `InfrastructureError`.

use crate::errors::HandlerError;
use crate::model::ChangeSet;
use crate::repository::{RecordChangeRepository, RecordSetRepository};

/// Persists `change_set`, in the order the record-set projection and the
/// audit log must observe it.
pub async fn finalize(
    record_set_repository: &dyn RecordSetRepository,
    change_repository: &dyn RecordChangeRepository,
    change_set: &ChangeSet,
) -> Result<ChangeSet, HandlerError> {
    record_set_repository.apply(change_set).await?;
    let saved = change_repository.save(change_set).await?;
    Ok(saved)
}

#[cfg(test)]
#[path = "finalizer_tests.rs"]
mod finalizer_tests;
