// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::errors::{DnsError, DnsResponse};
use crate::model::{ChangeStatus, ChangeType, RData, RecordSet, RecordSetStatus, RecordType, Zone};

struct ScriptedConnector {
    resolves: Mutex<std::vec::IntoIter<Result<Vec<RecordSet>, DnsError>>>,
    resolve_calls: Mutex<u32>,
}

impl ScriptedConnector {
    fn new(resolves: Vec<Result<Vec<RecordSet>, DnsError>>) -> Self {
        Self { resolves: Mutex::new(resolves.into_iter()), resolve_calls: Mutex::new(0) }
    }
}

#[async_trait]
impl DnsConnector for ScriptedConnector {
    async fn dns_resolve(
        &self,
        _name: &str,
        _zone_name: &str,
        _record_type: &RecordType,
    ) -> Result<Vec<RecordSet>, DnsError> {
        *self.resolve_calls.lock().unwrap() += 1;
        self.resolves.lock().unwrap().next().expect("unscripted resolve call")
    }

    async fn dns_update(&self, _change: &RecordSetChange) -> Result<DnsResponse, DnsError> {
        unimplemented!("verifier never calls dns_update")
    }
}

fn change() -> RecordSetChange {
    RecordSetChange {
        id: Uuid::new_v4(),
        change_type: ChangeType::Create,
        zone: Zone { id: Uuid::new_v4(), name: "example.com.".to_string() },
        record_set: RecordSet {
            id: Uuid::new_v4(),
            zone_id: Uuid::new_v4(),
            name: "host.example.com.".to_string(),
            record_type: RecordType::AAAA,
            ttl: 300,
            records: vec![RData::Aaaa("2001:db8::1".parse().unwrap())],
            status: RecordSetStatus::Pending,
        },
        updates: None,
        single_batch_change_ids: BTreeSet::new(),
        status: ChangeStatus::Pending,
        system_message: None,
        created: Utc::now(),
    }
}

fn fast_config() -> HandlerConfig {
    HandlerConfig { max_verify_attempts: 12, verify_backoff: Duration::from_millis(1) }
}

#[tokio::test]
async fn succeeds_immediately() {
    let c = change();
    let connector = ScriptedConnector::new(vec![Ok(vec![c.record_set.clone()])]);
    let outcome = verify(&connector, &c, &fast_config()).await;
    assert_eq!(outcome, VerifyOutcome::Complete);
    assert_eq!(*connector.resolve_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn retries_then_succeeds() {
    let c = change();
    let connector = ScriptedConnector::new(vec![
        Ok(vec![]),
        Ok(vec![]),
        Ok(vec![]),
        Ok(vec![c.record_set.clone()]),
    ]);
    let outcome = verify(&connector, &c, &fast_config()).await;
    assert_eq!(outcome, VerifyOutcome::Complete);
    assert_eq!(*connector.resolve_calls.lock().unwrap(), 4);
}

#[tokio::test]
async fn exhausts_after_max_attempts() {
    let c = change();
    let connector = ScriptedConnector::new(vec![Ok(vec![]); 12]);
    let outcome = verify(&connector, &c, &fast_config()).await;
    match outcome {
        VerifyOutcome::Failed(msg) => {
            assert!(msg.contains("12 attempts"));
            assert!(msg.contains(&c.record_set.name));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(*connector.resolve_calls.lock().unwrap(), 12);
}

#[tokio::test]
async fn dns_error_stops_immediately_without_consuming_remaining_attempts() {
    let c = change();
    let connector = ScriptedConnector::new(vec![Err(DnsError::Resolve {
        name: "host".to_string(),
        zone: "example.com.".to_string(),
        reason: "timeout".to_string(),
    })]);
    let outcome = verify(&connector, &c, &fast_config()).await;
    match outcome {
        VerifyOutcome::Failed(msg) => assert!(msg.contains("timeout")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(*connector.resolve_calls.lock().unwrap(), 1);
}
