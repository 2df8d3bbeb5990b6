use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_address_resolution(
    chain_id: u64,
    status: &str,
    requested: usize,
    resolved: usize,
    duration: Duration,
) {
    counter!(
        "monitor_address_resolution_total",
        "chain_id" => chain_id.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "monitor_address_resolution_duration_seconds",
        "chain_id" => chain_id.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    gauge!(
        "monitor_address_resolution_requested",
        "chain_id" => chain_id.to_string()
    )
    .set(requested as f64);
    gauge!(
        "monitor_address_resolution_resolved",
        "chain_id" => chain_id.to_string()
    )
    .set(resolved as f64);
}
