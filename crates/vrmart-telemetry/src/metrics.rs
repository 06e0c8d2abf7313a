//! Prometheus metrics for vrmart.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use crate::error::TelemetryResult;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge_vec, Encoder, IntCounter,
    IntCounterVec, IntGaugeVec, TextEncoder,
};

/// Ledger calls by operation and outcome.
/// Labels: operation, outcome (ok/refused/not_authenticated/no_identity/rejected/transport/...)
pub static LEDGER_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "vrmart_ledger_calls_total",
        "Total remote ledger calls",
        &["operation", "outcome"]
    )
    .unwrap()
});

/// Session state (1 = active, 0 = inactive).
/// Labels: state (uninitialized/loading/authenticated/unauthenticated)
pub static SESSION_STATE: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "vrmart_session_state",
        "Session state machine current state (1=active, 0=inactive)",
        &["state"]
    )
    .unwrap()
});

/// Failed asset-list refreshes that kept the stale cache.
pub static REFRESH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "vrmart_refresh_failures_total",
        "Asset list refreshes that failed and kept the cached list"
    )
    .unwrap()
});

/// Items appended to the local catalog.
pub static CATALOG_ITEMS_ADDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "vrmart_catalog_items_added_total",
        "Items appended to the local catalog"
    )
    .unwrap()
});

/// Uploads rejected by local validation.
/// Labels: reason (extension/size/missing_file/missing_fields/price)
pub static UPLOAD_REJECTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "vrmart_upload_rejected_total",
        "Creation-form submissions rejected before any remote call",
        &["reason"]
    )
    .unwrap()
});

const SESSION_STATES: [&str; 4] = ["uninitialized", "loading", "authenticated", "unauthenticated"];

/// Metrics helper.
pub struct Metrics;

impl Metrics {
    /// Record a ledger call outcome.
    pub fn ledger_call(operation: &str, outcome: &str) {
        LEDGER_CALLS_TOTAL
            .with_label_values(&[operation, outcome])
            .inc();
    }

    /// Set the session state. Only the active state is 1.
    pub fn session_state_set(state: &str) {
        for s in SESSION_STATES {
            SESSION_STATE.with_label_values(&[s]).set(0);
        }
        SESSION_STATE.with_label_values(&[state]).set(1);
    }

    /// Record a refresh that kept the stale asset list.
    pub fn refresh_failed() {
        REFRESH_FAILURES_TOTAL.inc();
    }

    /// Record a catalog append.
    pub fn catalog_item_added() {
        CATALOG_ITEMS_ADDED_TOTAL.inc();
    }

    /// Record a locally rejected upload.
    pub fn upload_rejected(reason: &str) {
        UPLOAD_REJECTED_TOTAL.with_label_values(&[reason]).inc();
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
