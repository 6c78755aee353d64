// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # rschandler: Record-Set Change Handler
//!
//! Drives a single queued DNS record-set mutation from `Pending` to a
//! terminal `Complete`/`Failed` state: classify the change against live
//! DNS, apply it through an RFC 2136-style connector, verify the effect
//! with bounded polling, then persist the outcome into both the
//! record-set/change-log repositories and the originating batch
//! sub-changes.
//!
//! ## Modules
//!
//! - [`model`]: the data model (`RecordSetChange`, `ChangeSet`,
//!   `BatchChange`, `RData`, ...) and record-set structural equality.
//! - [`errors`]: `DnsError` (connector-facing) and `HandlerError`
//!   (the one error channel that escapes [`orchestrator::handle`]).
//! - [`config`]: `HandlerConfig`, the verifier's tuned constants.
//! - [`connector`]: the `DnsConnector` capability and a `hickory-client`
//!   reference implementation.
//! - [`repository`]: the `RecordSetRepository`, `RecordChangeRepository`,
//!   and `BatchChangeRepository` capabilities.
//! - [`classifier`]: C1, the processing-status decision table.
//! - [`bypass`]: C2, the wildcard/NS bypass rule.
//! - [`verifier`]: C3, the bounded post-apply retry loop.
//! - [`orchestrator`]: C4, the public `handle` entry point.
//! - [`finalizer`]: C5, the two-write persistence step.
//! - [`batch`]: C6, the batch fan-out patcher.
//! - [`metrics`]: Prometheus counters for handler outcomes.
//! - [`testing`]: in-memory capability fakes, also available to
//!   downstream crates behind the `testing` feature.
//!
//! ## Example
//!
//! ```no_run
//! use rschandler::config::HandlerConfig;
//! use rschandler::connector::HickoryDnsConnector;
//! use rschandler::orchestrator::handle;
//! use rschandler::testing::{FakeBatchChangeRepository, FakeRecordChangeRepository, FakeRecordSetRepository};
//!
//! # async fn example(change: rschandler::model::RecordSetChange) -> anyhow::Result<()> {
//! let connector = HickoryDnsConnector::new("127.0.0.1:53".parse()?);
//! let record_sets = FakeRecordSetRepository::new(vec![]);
//! let changes = FakeRecordChangeRepository::new();
//! let batches = FakeBatchChangeRepository::new(vec![]);
//! let config = HandlerConfig::default();
//!
//! let result = handle(&connector, &record_sets, &changes, &batches, &config, change).await?;
//! println!("change {} finished as {:?}", result.id, result.status);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod bypass;
pub mod classifier;
pub mod config;
pub mod connector;
pub mod errors;
pub mod finalizer;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod repository;
pub mod verifier;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::HandlerError;
pub use model::RecordSetChange;
pub use orchestrator::handle;
