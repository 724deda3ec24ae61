//! Prometheus metrics for monitoring
//!
//! Exposes counters for transactions signed and submitted per contract.

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};
use tracing::warn;

lazy_static! {
    pub static ref TX_SIGNED: CounterVec = register_counter_vec!(
        "wrapped_contract_transactions_signed_total",
        "Total transactions signed",
        &["contract"]
    ).unwrap();

    pub static ref TX_SUBMITTED: CounterVec = register_counter_vec!(
        "wrapped_contract_transactions_submitted_total",
        "Total transactions submitted",
        &["contract"]
    ).unwrap();
}

/// Text exposition of every registered metric
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

pub fn record_tx_signed(contract: &str) {
    TX_SIGNED.with_label_values(&[contract]).inc();
}

pub fn record_tx_submitted(contract: &str) {
    TX_SUBMITTED.with_label_values(&[contract]).inc();
}
