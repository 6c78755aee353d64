// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the record-set change handler.
//!
//! Two layers, matching spec.md §7:
//!
//! - [`DnsError`] is connector-facing: what a [`crate::connector::DnsConnector`]
//!   returns when a resolve or update call fails. The classifier and verifier
//!   fold these into a terminal [`crate::model::ProcessingStatus::Failure`];
//!   they never propagate past the handler.
//! - [`HandlerError`] is what `handle` itself can return to its caller. Only
//!   infrastructure faults (repository writes that themselves fail) reach
//!   this type; every anticipated DNS-level or classification failure is
//!   converted to a terminal persisted status instead.

use thiserror::Error;

/// The RFC 2136-style outcome of a `dns_update` call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsResponse {
    #[error("no error")]
    NoError,
    #[error("refused: {0}")]
    Refused(String),
    #[error("not authorized: {0}")]
    NotAuthorized(String),
    #[error("server failure: {0}")]
    ServerFailure(String),
    #[error("format error: {0}")]
    FormatError(String),
    #[error("not zone: {0}")]
    NotZone(String),
}

impl DnsResponse {
    /// `true` for the single success variant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::NoError)
    }
}

/// Errors a [`crate::connector::DnsConnector`] can return.
///
/// These represent DNS-protocol-level failures (a non-`NoError` response
/// code, or a resolve that could not be completed), not infrastructure
/// faults. They are always routed to a terminal change status by the
/// classifier, verifier, or orchestrator; they never escape `handle`.
#[derive(Error, Debug, Clone)]
pub enum DnsError {
    /// `dns_resolve` failed (timeout, SERVFAIL, malformed response, etc.)
    #[error("DNS resolve for '{name}' in zone '{zone}' failed: {reason}")]
    Resolve {
        name: String,
        zone: String,
        reason: String,
    },

    /// `dns_update` was rejected by the server with a non-`NoError` response.
    #[error("DNS update rejected: {0}")]
    Update(#[from] DnsResponse),
}

impl DnsError {
    /// Human-readable message suitable for `RecordSetChange.system_message`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors that escape [`crate::orchestrator::handle`] to its caller.
///
/// Per spec.md §7, this is the one case where the change is left `Pending`
/// for later redelivery rather than persisted as a terminal `Failed`: the
/// finalizer (C5) could not complete its writes, so there is nothing
/// consistent to persist.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("infrastructure error persisting change outcome: {0}")]
    Infrastructure(#[from] anyhow::Error),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
