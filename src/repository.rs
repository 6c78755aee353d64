// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Persistence capabilities consumed by the handler (spec.md §6).
//!
//! None of these are implemented by this crate beyond the in-memory fakes
//! under [`crate::testing`]: the handler is injected with whatever
//! storage engine the surrounding platform uses, the way a reconciler
//! is injected with a client handle rather than owning one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{BatchChange, ChangeSet, RecordSet, RecordType};

/// Projects the authoritative record-set state and journals applied changes.
#[async_trait]
pub trait RecordSetRepository: Send + Sync {
    /// Applies the change-set to the record-set projection. Idempotent by
    /// change id.
    async fn apply(&self, change_set: &ChangeSet) -> anyhow::Result<ChangeSet>;

    /// Used by the bypass rule (C2) to detect wildcard record-sets.
    async fn get_record_sets(
        &self,
        zone_id: Uuid,
        name: &str,
        record_type: &RecordType,
    ) -> anyhow::Result<Vec<RecordSet>>;
}

/// The audit log of record-set mutations.
#[async_trait]
pub trait RecordChangeRepository: Send + Sync {
    /// Records the mutation outcome. Idempotent by change id.
    async fn save(&self, change_set: &ChangeSet) -> anyhow::Result<ChangeSet>;
}

/// Batch-change storage, fanned out into by C6.
#[async_trait]
pub trait BatchChangeRepository: Send + Sync {
    async fn get_batch_change(&self, id: Uuid) -> anyhow::Result<Option<BatchChange>>;
    async fn save(&self, batch: &BatchChange) -> anyhow::Result<BatchChange>;

    /// Resolves the owning batch for a single sub-change id, so C6 can
    /// group a `RecordSetChange`'s `single_batch_change_ids` by the batch
    /// each belongs to before loading. `None` if the sub-change is unknown.
    async fn batch_id_for_single_change(&self, single_change_id: Uuid) -> anyhow::Result<Option<Uuid>>;
}
