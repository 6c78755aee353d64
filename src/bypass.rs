// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wildcard / NS Bypass Rule (C2, spec.md §4.2).
//!
//! Authoritative resolution against a wildcard entry returns a synthesised
//! answer that cannot distinguish pre- and post-state; NS changes at a
//! delegation boundary confuse verification the same way. Either condition
//! skips straight to apply+persist.

use crate::model::{RecordSetChange, RecordType};
use crate::repository::RecordSetRepository;

/// `true` when `change` should skip validation (C1) and verification (C3).
///
/// Bypass applies when either:
/// 1. the repository holds a stored record-set for `(zone, name, type)`
///    (per spec.md §4.2, implementations may simply fetch by `(zoneId, name,
///    type)` and treat a non-empty result as the wildcard-bypass signal,
///    rather than re-deriving the wildcard predicate client-side), or
/// 2. the change's record-set type is `NS`.
pub async fn requires_bypass(
    repository: &dyn RecordSetRepository,
    change: &RecordSetChange,
) -> anyhow::Result<bool> {
    if change.record_set.record_type == RecordType::NS {
        return Ok(true);
    }

    let existing = repository
        .get_record_sets(
            change.zone.id,
            &change.record_set.name,
            &change.record_set.record_type,
        )
        .await?;

    Ok(!existing.is_empty())
}

#[cfg(test)]
#[path = "bypass_tests.rs"]
mod bypass_tests;
