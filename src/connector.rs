// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The DNS connector capability (spec.md §6) and a `hickory-client`-backed
//! reference implementation against a BIND9-style RFC 2136 primary.

use std::net::SocketAddr;
use std::str::FromStr;

use async_trait::async_trait;
use hickory_client::client::{Client, SyncClient};
use hickory_client::op::ResponseCode;
use hickory_client::rr::{DNSClass, Name, RData as HickoryRData, Record};
use hickory_client::udp::UdpClientConnection;
use tracing::{debug, warn};

use crate::errors::{DnsError, DnsResponse};
use crate::model::{ChangeType, RData, RecordSet, RecordSetStatus, RecordSetChange, RecordType};

/// Authoritative DNS lookups and RFC 2136 dynamic updates (spec.md §6).
///
/// Implementations must be safe for concurrent use: many handler
/// invocations may call the same connector at once (spec.md §5).
#[async_trait]
pub trait DnsConnector: Send + Sync {
    /// Authoritative lookup of `(name, zone_name, record_type)` against the
    /// zone's primary.
    async fn dns_resolve(
        &self,
        name: &str,
        zone_name: &str,
        record_type: &RecordType,
    ) -> Result<Vec<RecordSet>, DnsError>;

    /// Submits an RFC 2136-style update for `change`.
    async fn dns_update(&self, change: &RecordSetChange) -> Result<DnsResponse, DnsError>;
}

fn hickory_record_type(record_type: &RecordType) -> hickory_client::rr::RecordType {
    use hickory_client::rr::RecordType as H;
    match record_type {
        RecordType::A => H::A,
        RecordType::AAAA => H::AAAA,
        RecordType::NS => H::NS,
        RecordType::CNAME => H::CNAME,
        RecordType::MX => H::MX,
        RecordType::TXT => H::TXT,
        RecordType::PTR => H::PTR,
        RecordType::SRV => H::SRV,
        RecordType::SOA => H::SOA,
        RecordType::CAA => H::CAA,
        RecordType::Other(_) => H::NULL,
    }
}

fn to_hickory_rdata(rdata: &RData) -> Option<HickoryRData> {
    match rdata {
        RData::A(addr) => Some(HickoryRData::A((*addr).into())),
        RData::Aaaa(addr) => Some(HickoryRData::AAAA((*addr).into())),
        RData::Cname(name) => Name::from_str(name).ok().map(HickoryRData::CNAME),
        RData::Ns(name) => Name::from_str(name).ok().map(HickoryRData::NS),
        RData::Ptr(name) => Name::from_str(name).ok().map(HickoryRData::PTR),
        RData::Mx { preference, exchange } => Name::from_str(exchange)
            .ok()
            .map(|name| HickoryRData::MX(hickory_client::rr::rdata::MX::new(*preference, name))),
        RData::Txt(chunks) => Some(HickoryRData::TXT(hickory_client::rr::rdata::TXT::new(
            chunks.clone(),
        ))),
        // SRV/SOA/Raw are not round-tripped through the reference connector;
        // callers needing those should provide their own DnsConnector.
        RData::Srv { .. } | RData::Soa { .. } | RData::Raw(_) => None,
    }
}

/// RFC 2136 connector talking directly to a BIND9 primary over TCP/UDP.
///
/// Grounded on `bindy`'s `Bind9Manager::add_a_record` family: hickory-client
/// is synchronous, so every call is shelled out to a blocking task.
pub struct HickoryDnsConnector {
    server: SocketAddr,
}

impl HickoryDnsConnector {
    #[must_use]
    pub fn new(server: SocketAddr) -> Self {
        Self { server }
    }
}

#[async_trait]
impl DnsConnector for HickoryDnsConnector {
    async fn dns_resolve(
        &self,
        name: &str,
        zone_name: &str,
        record_type: &RecordType,
    ) -> Result<Vec<RecordSet>, DnsError> {
        let server = self.server;
        let name = name.to_string();
        let zone_name = zone_name.to_string();
        let hickory_type = hickory_record_type(record_type);
        let record_type = record_type.clone();

        let lookup = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<Record>> {
            let conn = UdpClientConnection::new(server)?;
            let client = SyncClient::new(conn);
            let fqdn = Name::from_str(&format!("{name}.{zone_name}"))?;
            let response = client.query(&fqdn, DNSClass::IN, hickory_type)?;
            Ok(response.answers().to_vec())
        })
        .await
        .map_err(|e| DnsError::Resolve {
            name: name.clone(),
            zone: zone_name.clone(),
            reason: format!("lookup task panicked: {e}"),
        })?
        .map_err(|e| DnsError::Resolve {
            name: name.clone(),
            zone: zone_name.clone(),
            reason: e.to_string(),
        })?;

        debug!(name = %name, zone = %zone_name, found = lookup.len(), "dns_resolve");

        // A DNS answer section is one RRset: merge every answer sharing this
        // (name, type) into a single logical RecordSet rather than one per
        // wire record, so the classifier's multiset comparison sees the
        // whole picture.
        let rdata_values: Vec<RData> = lookup
            .iter()
            .filter_map(|record| match record.data() {
                Some(HickoryRData::A(ip)) => Some(RData::A((*ip).into())),
                Some(HickoryRData::AAAA(ip)) => Some(RData::Aaaa((*ip).into())),
                Some(HickoryRData::CNAME(n)) => Some(RData::Cname(n.to_string())),
                Some(HickoryRData::NS(n)) => Some(RData::Ns(n.to_string())),
                Some(HickoryRData::PTR(n)) => Some(RData::Ptr(n.to_string())),
                Some(HickoryRData::MX(mx)) => Some(RData::Mx {
                    preference: mx.preference(),
                    exchange: mx.exchange().to_string(),
                }),
                Some(HickoryRData::TXT(txt)) => Some(RData::Txt(
                    txt.iter()
                        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                        .collect(),
                )),
                _ => None,
            })
            .collect();

        if rdata_values.is_empty() {
            return Ok(Vec::new());
        }

        let ttl = lookup.first().map(Record::ttl).unwrap_or_default();
        Ok(vec![RecordSet {
            id: uuid::Uuid::new_v4(),
            zone_id: uuid::Uuid::nil(),
            name: lookup
                .first()
                .map(|r| r.name().to_string())
                .unwrap_or(name),
            record_type,
            ttl,
            records: rdata_values,
            status: RecordSetStatus::Active,
        }])
    }

    async fn dns_update(&self, change: &RecordSetChange) -> Result<DnsResponse, DnsError> {
        let server = self.server;
        let zone_name = change.zone.name.clone();
        let record_name = change.record_set.name.clone();
        let ttl = change.record_set.ttl;
        let change_type = change.change_type;
        let rdata_values = change.record_set.records.clone();

        let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<ResponseCode> {
            let conn = UdpClientConnection::new(server)?;
            let client = SyncClient::new(conn);
            let zone = Name::from_str(&zone_name)?;
            let fqdn = Name::from_str(&record_name)?;

            let records: Vec<Record> = rdata_values
                .iter()
                .filter_map(to_hickory_rdata)
                .map(|rdata| {
                    let mut record = Record::from_rdata(fqdn.clone(), ttl, rdata);
                    record.set_dns_class(DNSClass::IN);
                    record
                })
                .collect();

            let mut last = ResponseCode::NoError;
            for record in records {
                let response = match change_type {
                    ChangeType::Delete => client.delete_by_rdata(record, zone.clone())?,
                    ChangeType::Create | ChangeType::Update => {
                        client.append(record, zone.clone(), false)?
                    }
                };
                last = response.response_code();
                if last != ResponseCode::NoError {
                    break;
                }
            }
            Ok(last)
        })
        .await
        .map_err(|e| DnsError::Update(DnsResponse::ServerFailure(format!("update task panicked: {e}"))))?
        .map_err(|e| DnsError::Update(DnsResponse::ServerFailure(e.to_string())))?;

        let response = match outcome {
            ResponseCode::NoError => DnsResponse::NoError,
            ResponseCode::Refused => DnsResponse::Refused("server refused update".to_string()),
            ResponseCode::NotAuth => {
                DnsResponse::NotAuthorized("TSIG or zone authorization failed".to_string())
            }
            ResponseCode::ServFail => {
                DnsResponse::ServerFailure("server failure".to_string())
            }
            ResponseCode::FormErr => DnsResponse::FormatError("malformed update".to_string()),
            ResponseCode::NotZone => DnsResponse::NotZone("name not in zone".to_string()),
            other => {
                warn!(code = ?other, "unexpected DNS update response code");
                DnsResponse::ServerFailure(format!("unexpected response code: {other:?}"))
            }
        };

        if response.is_success() {
            Ok(response)
        } else {
            Err(DnsError::Update(response))
        }
    }
}

#[cfg(test)]
#[path = "connector_tests.rs"]
mod connector_tests;
