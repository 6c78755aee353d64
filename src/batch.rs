// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Batch Fan-Out Updater (C6, spec.md §4.6).
//!
//! Runs after the finalizer (C5). Groups a change's
//! `single_batch_change_ids` by the batch each sub-change belongs to,
//! loads each batch once, patches only the owned sub-changes, and saves
//! the whole batch back. Every other sub-change in the batch is left
//! bitwise-identical (this is the read-modify-write discipline spec.md
//! §9 calls out as needing belt-and-braces protection once two record-set
//! changes can touch the same batch concurrently).

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::errors::HandlerError;
use crate::model::{ChangeStatus, RecordSetChange, SingleChange, SingleChangeStatus};
use crate::repository::BatchChangeRepository;

/// Patches and persists every batch reachable from `change.single_batch_change_ids`.
pub async fn apply_to_batches(
    batch_change_repository: &dyn BatchChangeRepository,
    change: &RecordSetChange,
) -> Result<(), HandlerError> {
    if change.single_batch_change_ids.is_empty() {
        return Ok(());
    }

    let mut batch_ids: BTreeMap<Uuid, ()> = BTreeMap::new();
    for &single_change_id in &change.single_batch_change_ids {
        if let Some(batch_id) =
            batch_change_repository.batch_id_for_single_change(single_change_id).await?
        {
            batch_ids.insert(batch_id, ());
        }
    }

    for batch_id in batch_ids.into_keys() {
        let Some(mut batch) = batch_change_repository.get_batch_change(batch_id).await? else {
            continue;
        };
        for sc in &mut batch.changes {
            if change.single_batch_change_ids.contains(&sc.id) {
                patch_single_change(sc, change);
            }
        }
        batch_change_repository.save(&batch).await?;
    }

    Ok(())
}

fn patch_single_change(sc: &mut SingleChange, change: &RecordSetChange) {
    sc.record_change_id = Some(change.id);
    match change.status {
        ChangeStatus::Complete => {
            sc.status = SingleChangeStatus::Complete;
            sc.record_set_id = Some(change.record_set.id);
            sc.system_message = None;
        }
        ChangeStatus::Failed => {
            sc.status = SingleChangeStatus::Failed;
            sc.system_message = change.system_message.clone();
        }
        ChangeStatus::Pending => {}
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod batch_tests;
