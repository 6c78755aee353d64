// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the record-set change handler.
//!
//! Namespace prefix `rschandler`, using a `LazyLock<Registry>` to register
//! metrics once at first use. Covers handler outcomes and verify-retry
//! counts: the two numbers an operator actually pages on.

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::LazyLock;

const METRICS_NAMESPACE: &str = "rschandler";

/// Global Prometheus metrics registry.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of handler runs by change type and terminal status.
///
/// Labels:
/// - `change_type`: `create`, `update`, `delete`
/// - `status`: `complete`, `failed`
pub static HANDLER_OUTCOMES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_handler_outcomes_total"),
        "Total number of handler runs by change type and terminal status",
    );
    let counter = CounterVec::new(opts, &["change_type", "status"]).unwrap();
    METRICS_REGISTRY.register(Box::new(counter.clone())).unwrap();
    counter
});

/// Number of verify attempts consumed per handler run that reached the
/// verifier (i.e. excludes bypass and already-applied paths).
pub static VERIFY_ATTEMPTS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_verify_attempts"),
        "Number of verify attempts consumed before a terminal outcome",
    )
    .buckets(vec![1.0, 2.0, 3.0, 5.0, 8.0, 12.0]);
    let histogram = HistogramVec::new(opts, &["change_type"]).unwrap();
    METRICS_REGISTRY.register(Box::new(histogram.clone())).unwrap();
    histogram
});

fn change_type_label(change_type: crate::model::ChangeType) -> &'static str {
    match change_type {
        crate::model::ChangeType::Create => "create",
        crate::model::ChangeType::Update => "update",
        crate::model::ChangeType::Delete => "delete",
    }
}

/// Records one handler run's terminal outcome.
pub fn record_outcome(change_type: crate::model::ChangeType, status: &crate::model::ChangeStatus) {
    let status_label = match status {
        crate::model::ChangeStatus::Complete => "complete",
        crate::model::ChangeStatus::Failed => "failed",
        crate::model::ChangeStatus::Pending => "pending",
    };
    HANDLER_OUTCOMES_TOTAL
        .with_label_values(&[change_type_label(change_type), status_label])
        .inc();
}

/// Records how many verify attempts a handler run consumed.
pub fn record_verify_attempts(change_type: crate::model::ChangeType, attempts: u32) {
    VERIFY_ATTEMPTS
        .with_label_values(&[change_type_label(change_type)])
        .observe(f64::from(attempts));
}
