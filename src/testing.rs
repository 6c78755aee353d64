// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory capability fakes, exported for the handler's own test suite
//! and for downstream integration tests.
//!
//! Grounded on the scripted-fake pattern used throughout this crate's own
//! component tests (`classifier_tests.rs`, `bypass_tests.rs`,
//! `verifier_tests.rs`): a fake records what it was asked to do and
//! returns pre-scripted answers, so a test can assert call counts exactly
//! as spec.md §8 demands.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::connector::DnsConnector;
use crate::errors::{DnsError, DnsResponse};
use crate::model::{BatchChange, ChangeSet, RecordSet, RecordSetChange, RecordType};
use crate::repository::{BatchChangeRepository, RecordChangeRepository, RecordSetRepository};

/// A `DnsConnector` driven by a scripted queue of resolve/update results.
///
/// Resolve and update results are consumed independently and in order;
/// running past the end of either queue panics, surfacing an unscripted
/// call as a test failure rather than a silent default.
pub struct FakeDnsConnector {
    resolves: Mutex<std::collections::VecDeque<Result<Vec<RecordSet>, DnsError>>>,
    updates: Mutex<std::collections::VecDeque<Result<DnsResponse, DnsError>>>,
    resolve_calls: Mutex<u32>,
    update_calls: Mutex<u32>,
}

impl FakeDnsConnector {
    #[must_use]
    pub fn new(
        resolves: Vec<Result<Vec<RecordSet>, DnsError>>,
        updates: Vec<Result<DnsResponse, DnsError>>,
    ) -> Self {
        Self {
            resolves: Mutex::new(resolves.into()),
            updates: Mutex::new(updates.into()),
            resolve_calls: Mutex::new(0),
            update_calls: Mutex::new(0),
        }
    }

    #[must_use]
    pub fn resolve_call_count(&self) -> u32 {
        *self.resolve_calls.lock().unwrap()
    }

    #[must_use]
    pub fn update_call_count(&self) -> u32 {
        *self.update_calls.lock().unwrap()
    }
}

#[async_trait]
impl DnsConnector for FakeDnsConnector {
    async fn dns_resolve(
        &self,
        _name: &str,
        _zone_name: &str,
        _record_type: &RecordType,
    ) -> Result<Vec<RecordSet>, DnsError> {
        *self.resolve_calls.lock().unwrap() += 1;
        self.resolves
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted dns_resolve call")
    }

    async fn dns_update(&self, _change: &RecordSetChange) -> Result<DnsResponse, DnsError> {
        *self.update_calls.lock().unwrap() += 1;
        self.updates
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted dns_update call")
    }
}

/// A `RecordSetRepository` backed by an in-memory `(zone, name, type)`
/// lookup table plus an append-only log of applied change-sets.
pub struct FakeRecordSetRepository {
    lookup_result: Vec<RecordSet>,
    applied: Mutex<Vec<ChangeSet>>,
}

impl FakeRecordSetRepository {
    #[must_use]
    pub fn new(lookup_result: Vec<RecordSet>) -> Self {
        Self { lookup_result, applied: Mutex::new(Vec::new()) }
    }

    #[must_use]
    pub fn apply_call_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordSetRepository for FakeRecordSetRepository {
    async fn apply(&self, change_set: &ChangeSet) -> anyhow::Result<ChangeSet> {
        self.applied.lock().unwrap().push(change_set.clone());
        Ok(change_set.clone())
    }

    async fn get_record_sets(
        &self,
        _zone_id: Uuid,
        _name: &str,
        _record_type: &RecordType,
    ) -> anyhow::Result<Vec<RecordSet>> {
        Ok(self.lookup_result.clone())
    }
}

/// A `RecordChangeRepository` recording every saved change-set.
#[derive(Default)]
pub struct FakeRecordChangeRepository {
    saved: Mutex<Vec<ChangeSet>>,
}

impl FakeRecordChangeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn save_call_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordChangeRepository for FakeRecordChangeRepository {
    async fn save(&self, change_set: &ChangeSet) -> anyhow::Result<ChangeSet> {
        self.saved.lock().unwrap().push(change_set.clone());
        Ok(change_set.clone())
    }
}

/// A `BatchChangeRepository` backed by an in-memory batch table, plus a
/// reverse index from sub-change id to owning batch id.
pub struct FakeBatchChangeRepository {
    batches: Mutex<BTreeMap<Uuid, BatchChange>>,
    single_to_batch: BTreeMap<Uuid, Uuid>,
}

impl FakeBatchChangeRepository {
    #[must_use]
    pub fn new(batches: Vec<BatchChange>) -> Self {
        let mut single_to_batch = BTreeMap::new();
        for batch in &batches {
            for sc in &batch.changes {
                single_to_batch.insert(sc.id, batch.id);
            }
        }
        let batches = batches.into_iter().map(|b| (b.id, b)).collect();
        Self { batches: Mutex::new(batches), single_to_batch }
    }

    #[must_use]
    pub fn batch(&self, id: Uuid) -> Option<BatchChange> {
        self.batches.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl BatchChangeRepository for FakeBatchChangeRepository {
    async fn get_batch_change(&self, id: Uuid) -> anyhow::Result<Option<BatchChange>> {
        Ok(self.batches.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, batch: &BatchChange) -> anyhow::Result<BatchChange> {
        self.batches.lock().unwrap().insert(batch.id, batch.clone());
        Ok(batch.clone())
    }

    async fn batch_id_for_single_change(&self, single_change_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        Ok(self.single_to_batch.get(&single_change_id).copied())
    }
}
