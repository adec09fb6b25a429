//! # Validation Metrics
//!
//! Prometheus metrics for monitoring message validation.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! cbc-02-validation = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `cbc_messages_accepted_total` - Counter of root messages accepted
//! - `cbc_messages_rejected_total` - Counter of root messages rejected (by reason)
//! - `cbc_byzantine_senders_total` - Counter of senders flagged Byzantine
//! - `cbc_validation_latency_seconds` - Histogram of `parse_msg` times

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Root messages accepted by `parse_msg`
    pub static ref MESSAGES_ACCEPTED: IntCounter = register_int_counter!(
        "cbc_messages_accepted_total",
        "Total number of messages accepted"
    )
    .expect("Failed to create MESSAGES_ACCEPTED metric");

    /// Root messages rejected, labeled by violation kind
    pub static ref MESSAGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "cbc_messages_rejected_total",
        "Total number of messages rejected",
        &["reason"]
    )
    .expect("Failed to create MESSAGES_REJECTED metric");

    /// Senders newly flagged Byzantine
    pub static ref BYZANTINE_FLAGGED: IntCounter = register_int_counter!(
        "cbc_byzantine_senders_total",
        "Total number of senders flagged Byzantine"
    )
    .expect("Failed to create BYZANTINE_FLAGGED metric");

    /// Histogram of parse_msg latency
    pub static ref VALIDATION_LATENCY: Histogram = register_histogram!(
        "cbc_validation_latency_seconds",
        "Time taken to validate a message and its justification closure in seconds",
        vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    )
    .expect("Failed to create VALIDATION_LATENCY metric");
}

/// Record an accepted root message
#[cfg(feature = "metrics")]
pub fn record_message_accepted() {
    MESSAGES_ACCEPTED.inc();
}

/// Record a rejected root message with reason
#[cfg(feature = "metrics")]
pub fn record_message_rejected(reason: &str) {
    MESSAGES_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a newly flagged sender
#[cfg(feature = "metrics")]
pub fn record_byzantine_flagged() {
    BYZANTINE_FLAGGED.inc();
}

/// Record validation latency
#[cfg(feature = "metrics")]
pub fn record_validation_latency(seconds: f64) {
    VALIDATION_LATENCY.observe(seconds);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_message_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_message_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_byzantine_flagged() {}

#[cfg(not(feature = "metrics"))]
pub fn record_validation_latency(_seconds: f64) {}
