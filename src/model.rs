// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Data model for the record-set change handler.
//!
//! These types mirror the VinylDNS-shaped model described by the handler's
//! specification: a [`RecordSetChange`] is the pending intention driven to
//! completion by [`crate::orchestrator::handle`], fanning out into the
//! [`ChangeSet`] audit record and the [`BatchChange`] sub-changes it
//! fulfills.

use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of mutation a [`RecordSetChange`] requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    Create,
    Update,
    Delete,
}

/// DNS record type. `Other` covers types this crate does not model RDATA
/// for, carrying the presentation-format type mnemonic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    NS,
    CNAME,
    MX,
    TXT,
    PTR,
    SRV,
    SOA,
    CAA,
    Other(String),
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::AAAA => write!(f, "AAAA"),
            Self::NS => write!(f, "NS"),
            Self::CNAME => write!(f, "CNAME"),
            Self::MX => write!(f, "MX"),
            Self::TXT => write!(f, "TXT"),
            Self::PTR => write!(f, "PTR"),
            Self::SRV => write!(f, "SRV"),
            Self::SOA => write!(f, "SOA"),
            Self::CAA => write!(f, "CAA"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One RDATA value of a record-set, per the type of its owning record-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(String),
    Ns(String),
    Ptr(String),
    Mx { preference: u16, exchange: String },
    Txt(Vec<String>),
    Srv { priority: u16, weight: u16, port: u16, target: String },
    #[allow(clippy::upper_case_acronyms)]
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: i32,
        retry: i32,
        expire: i32,
        minimum: u32,
    },
    /// Escape hatch for record types this crate does not model structurally
    /// (e.g. CAA); compared as an opaque presentation-format string.
    Raw(String),
}

impl RData {
    /// Canonical comparison key for structural equality: domain-name RDATA
    /// variants are lower-cased and have a single trailing dot stripped so
    /// `www.example.com` and `WWW.EXAMPLE.COM.` compare equal.
    fn comparison_key(&self) -> String {
        fn canon(name: &str) -> String {
            name.trim_end_matches('.').to_ascii_lowercase()
        }
        match self {
            Self::A(addr) => format!("A:{addr}"),
            Self::Aaaa(addr) => format!("AAAA:{addr}"),
            Self::Cname(name) => format!("CNAME:{}", canon(name)),
            Self::Ns(name) => format!("NS:{}", canon(name)),
            Self::Ptr(name) => format!("PTR:{}", canon(name)),
            Self::Mx { preference, exchange } => {
                format!("MX:{preference}:{}", canon(exchange))
            }
            Self::Txt(chunks) => format!("TXT:{}", chunks.join("\u{0}")),
            Self::Srv { priority, weight, port, target } => {
                format!("SRV:{priority}:{weight}:{port}:{}", canon(target))
            }
            Self::Soa { mname, rname, serial, refresh, retry, expire, minimum } => format!(
                "SOA:{}:{}:{serial}:{refresh}:{retry}:{expire}:{minimum}",
                canon(mname),
                canon(rname)
            ),
            Self::Raw(s) => format!("RAW:{s}"),
        }
    }
}

/// Lifecycle of a record-set as observed in DNS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSetStatus {
    Pending,
    Active,
    Inactive,
}

/// The desired (Create/Update) or to-be-removed (Delete) record-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub id: Uuid,
    pub zone_id: Uuid,
    pub name: String,
    pub record_type: RecordType,
    pub ttl: u32,
    pub records: Vec<RData>,
    pub status: RecordSetStatus,
}

impl RecordSet {
    fn canonical_name(&self) -> String {
        self.name.trim_end_matches('.').to_ascii_lowercase()
    }
}

/// Compares two record-sets per the structural-equality rule in §4.1: name
/// (case-insensitive, trailing-dot-stripped), type, TTL, and the multiset
/// of RDATA values. RDATA order is irrelevant; a TTL mismatch is a
/// difference.
#[must_use]
pub fn record_sets_equivalent(a: &RecordSet, b: &RecordSet) -> bool {
    if a.canonical_name() != b.canonical_name() || a.record_type != b.record_type || a.ttl != b.ttl
    {
        return false;
    }
    let mut a_keys: Vec<String> = a.records.iter().map(RData::comparison_key).collect();
    let mut b_keys: Vec<String> = b.records.iter().map(RData::comparison_key).collect();
    a_keys.sort_unstable();
    b_keys.sort_unstable();
    a_keys == b_keys
}

/// A DNS zone, as far as this handler needs to know about one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
}

/// Lifecycle of a [`RecordSetChange`] itself, distinct from the DNS-facing
/// [`RecordSetStatus`] of the record-set it mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    Pending,
    Complete,
    Failed,
}

/// One pending DNS mutation intention, as described by spec.md §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSetChange {
    pub id: Uuid,
    pub change_type: ChangeType,
    pub zone: Zone,
    pub record_set: RecordSet,
    /// For `Update`, the record-set as currently believed to exist (the
    /// "from" image). Absent for `Create`/`Delete`.
    pub updates: Option<RecordSet>,
    pub single_batch_change_ids: BTreeSet<Uuid>,
    pub status: ChangeStatus,
    pub system_message: Option<String>,
    pub created: DateTime<Utc>,
}

impl RecordSetChange {
    /// Marks this change terminally successful: record-set becomes
    /// `Active`, change becomes `Complete`.
    pub(crate) fn mark_succeeded(&mut self) {
        self.record_set.status = RecordSetStatus::Active;
        self.status = ChangeStatus::Complete;
        self.system_message = None;
    }

    /// Marks this change terminally failed: record-set becomes `Inactive`,
    /// change becomes `Failed`, and `message` is attached verbatim.
    pub(crate) fn mark_failed(&mut self, message: impl Into<String>) {
        self.record_set.status = RecordSetStatus::Inactive;
        self.status = ChangeStatus::Failed;
        self.system_message = Some(message.into());
    }
}

/// Lifecycle of a persisted [`ChangeSet`] atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeSetStatus {
    Pending,
    Applied,
    Complete,
}

/// An atomic journal entry wrapping one or more record-set mutations.
///
/// The handler always produces a singleton-change change-set with
/// `status = Complete`: success and failure are both "complete" at the
/// change-set level; the wrapped change's own `status` distinguishes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeSet {
    pub id: Uuid,
    pub zone_id: Uuid,
    pub status: ChangeSetStatus,
    pub changes: Vec<RecordSetChange>,
    pub created: DateTime<Utc>,
}

impl ChangeSet {
    /// Wraps a single terminal [`RecordSetChange`] as a `Complete` change-set.
    #[must_use]
    pub fn singleton(change: RecordSetChange) -> Self {
        Self {
            id: Uuid::new_v4(),
            zone_id: change.zone.id,
            status: ChangeSetStatus::Complete,
            created: change.created,
            changes: vec![change],
        }
    }
}

/// Lifecycle of one [`SingleChange`] row within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SingleChangeStatus {
    Pending,
    Complete,
    Failed,
}

/// One row in a user's batch submission, corresponding to a single desired
/// RDATA add/delete. Many sub-changes may be serviced by one
/// [`RecordSetChange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleChange {
    pub id: Uuid,
    pub batch_change_id: Uuid,
    pub zone_id: Uuid,
    pub zone_name: String,
    pub record_name: String,
    pub fqdn: String,
    pub record_type: RecordType,
    pub ttl: u32,
    pub rdata: RData,
    pub status: SingleChangeStatus,
    pub record_change_id: Option<Uuid>,
    pub record_set_id: Option<Uuid>,
    pub system_message: Option<String>,
}

/// A user-submitted group of [`SingleChange`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchChange {
    pub id: Uuid,
    pub changes: Vec<SingleChange>,
}

/// Ephemeral classification of a [`RecordSetChange`] against live DNS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStatus {
    ReadyToApply,
    AlreadyApplied,
    Failure(String),
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
