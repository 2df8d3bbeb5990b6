use std::time::Duration;

use metrics::{counter, histogram};

pub fn record_status_fetch(outcome: &str, duration: Duration) {
    counter!(
        "monitor_status_fetch_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!(
        "monitor_status_fetch_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration.as_secs_f64());
}

/// `endpoint` is the position of the endpoint in the configured fallback list,
/// or `none` when every endpoint failed.
pub fn record_activity_probe(outcome: &str, endpoint: Option<usize>, duration: Duration) {
    let endpoint = endpoint.map_or_else(|| "none".to_string(), |index| index.to_string());
    counter!(
        "monitor_activity_probe_total",
        "outcome" => outcome.to_string(),
        "endpoint" => endpoint
    )
    .increment(1);
    histogram!(
        "monitor_activity_probe_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_activity_endpoint_failure(endpoint: usize, reason: &str) {
    counter!(
        "monitor_activity_endpoint_failures_total",
        "endpoint" => endpoint.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}
