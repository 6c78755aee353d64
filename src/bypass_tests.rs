// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::model::{ChangeStatus, ChangeType, RData, RecordSet, RecordSetStatus, Zone};

struct FakeRecordSetRepository {
    lookup_result: Vec<RecordSet>,
    calls: Mutex<u32>,
}

#[async_trait]
impl RecordSetRepository for FakeRecordSetRepository {
    async fn apply(&self, _change_set: &crate::model::ChangeSet) -> anyhow::Result<crate::model::ChangeSet> {
        unimplemented!("bypass rule never calls apply")
    }

    async fn get_record_sets(
        &self,
        _zone_id: Uuid,
        _name: &str,
        _record_type: &RecordType,
    ) -> anyhow::Result<Vec<RecordSet>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.lookup_result.clone())
    }
}

fn sample_change(record_type: RecordType, name: &str) -> RecordSetChange {
    RecordSetChange {
        id: Uuid::new_v4(),
        change_type: ChangeType::Create,
        zone: Zone { id: Uuid::new_v4(), name: "example.com.".to_string() },
        record_set: RecordSet {
            id: Uuid::new_v4(),
            zone_id: Uuid::new_v4(),
            name: name.to_string(),
            record_type,
            ttl: 300,
            records: vec![RData::A("192.0.2.1".parse().unwrap())],
            status: RecordSetStatus::Pending,
        },
        updates: None,
        single_batch_change_ids: BTreeSet::new(),
        status: ChangeStatus::Pending,
        system_message: None,
        created: Utc::now(),
    }
}

#[tokio::test]
async fn ns_type_always_bypasses_without_repository_lookup() {
    let repo = FakeRecordSetRepository { lookup_result: vec![], calls: Mutex::new(0) };
    let change = sample_change(RecordType::NS, "example.com.");
    assert!(requires_bypass(&repo, &change).await.unwrap());
    assert_eq!(*repo.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn non_empty_repository_lookup_bypasses() {
    let existing = RecordSet {
        id: Uuid::new_v4(),
        zone_id: Uuid::new_v4(),
        name: "*.example.com.".to_string(),
        record_type: RecordType::A,
        ttl: 300,
        records: vec![RData::A("192.0.2.9".parse().unwrap())],
        status: RecordSetStatus::Active,
    };
    let repo = FakeRecordSetRepository { lookup_result: vec![existing], calls: Mutex::new(0) };
    let change = sample_change(RecordType::A, "*.example.com.");
    assert!(requires_bypass(&repo, &change).await.unwrap());
    assert_eq!(*repo.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn empty_repository_lookup_does_not_bypass() {
    let repo = FakeRecordSetRepository { lookup_result: vec![], calls: Mutex::new(0) };
    let change = sample_change(RecordType::A, "host.example.com.");
    assert!(!requires_bypass(&repo, &change).await.unwrap());
}
