// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use super::*;

fn sample_record_set() -> RecordSet {
    RecordSet {
        id: Uuid::new_v4(),
        zone_id: Uuid::new_v4(),
        name: "host.example.com.".to_string(),
        record_type: RecordType::AAAA,
        ttl: 300,
        records: vec![RData::Aaaa("2001:db8::1".parse().unwrap())],
        status: RecordSetStatus::Pending,
    }
}

#[test]
fn equivalent_ignores_trailing_dot_and_case() {
    let mut a = sample_record_set();
    let mut b = sample_record_set();
    a.name = "Host.Example.Com".to_string();
    b.name = "host.example.com.".to_string();
    assert!(record_sets_equivalent(&a, &b));
}

#[test]
fn equivalent_ignores_rdata_order() {
    let mut a = sample_record_set();
    let mut b = sample_record_set();
    a.records = vec![
        RData::Aaaa("2001:db8::1".parse().unwrap()),
        RData::Aaaa("2001:db8::2".parse().unwrap()),
    ];
    b.records = vec![
        RData::Aaaa("2001:db8::2".parse().unwrap()),
        RData::Aaaa("2001:db8::1".parse().unwrap()),
    ];
    assert!(record_sets_equivalent(&a, &b));
}

#[test]
fn ttl_mismatch_is_a_difference() {
    let a = sample_record_set();
    let mut b = sample_record_set();
    b.ttl = 30;
    assert!(!record_sets_equivalent(&a, &b));
}

#[test]
fn different_rdata_is_a_difference() {
    let a = sample_record_set();
    let mut b = sample_record_set();
    b.records = vec![RData::Aaaa("2001:db8::2".parse().unwrap())];
    assert!(!record_sets_equivalent(&a, &b));
}

#[test]
fn domain_name_rdata_canonicalized() {
    let mut a = sample_record_set();
    let mut b = sample_record_set();
    a.record_type = RecordType::CNAME;
    b.record_type = RecordType::CNAME;
    a.records = vec![RData::Cname("target.example.com".to_string())];
    b.records = vec![RData::Cname("TARGET.EXAMPLE.COM.".to_string())];
    assert!(record_sets_equivalent(&a, &b));
}

#[test]
fn mark_succeeded_sets_active_and_complete() {
    let mut change = RecordSetChange {
        id: Uuid::new_v4(),
        change_type: ChangeType::Create,
        zone: Zone { id: Uuid::new_v4(), name: "example.com.".to_string() },
        record_set: sample_record_set(),
        updates: None,
        single_batch_change_ids: BTreeSet::new(),
        status: ChangeStatus::Pending,
        system_message: Some("stale".to_string()),
        created: Utc::now(),
    };
    change.mark_succeeded();
    assert_eq!(change.record_set.status, RecordSetStatus::Active);
    assert_eq!(change.status, ChangeStatus::Complete);
    assert!(change.system_message.is_none());
}

#[test]
fn mark_failed_sets_inactive_and_message() {
    let mut change = RecordSetChange {
        id: Uuid::new_v4(),
        change_type: ChangeType::Create,
        zone: Zone { id: Uuid::new_v4(), name: "example.com.".to_string() },
        record_set: sample_record_set(),
        updates: None,
        single_batch_change_ids: BTreeSet::new(),
        status: ChangeStatus::Pending,
        system_message: None,
        created: Utc::now(),
    };
    change.mark_failed("dns failure");
    assert_eq!(change.record_set.status, RecordSetStatus::Inactive);
    assert_eq!(change.status, ChangeStatus::Failed);
    assert_eq!(change.system_message.as_deref(), Some("dns failure"));
}

#[test]
fn change_set_singleton_is_complete() {
    let change = RecordSetChange {
        id: Uuid::new_v4(),
        change_type: ChangeType::Create,
        zone: Zone { id: Uuid::new_v4(), name: "example.com.".to_string() },
        record_set: sample_record_set(),
        updates: None,
        single_batch_change_ids: BTreeSet::new(),
        status: ChangeStatus::Complete,
        system_message: None,
        created: Utc::now(),
    };
    let zone_id = change.zone.id;
    let change_set = ChangeSet::singleton(change);
    assert_eq!(change_set.status, ChangeSetStatus::Complete);
    assert_eq!(change_set.zone_id, zone_id);
    assert_eq!(change_set.changes.len(), 1);
}
