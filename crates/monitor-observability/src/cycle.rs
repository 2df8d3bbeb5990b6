use std::time::Duration;

use metrics::{counter, gauge, histogram};

pub fn record_cycle_run(status: &str, nodes: usize, duration: Duration) {
    counter!(
        "monitor_cycle_runs_total",
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "monitor_cycle_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    gauge!("monitor_cycle_nodes").set(nodes as f64);
}

pub fn record_node_health(health: &str, nodes: usize) {
    gauge!(
        "monitor_nodes_by_health",
        "health" => health.to_string()
    )
    .set(nodes as f64);
}

pub fn record_nodes_online(online: usize) {
    gauge!("monitor_nodes_online").set(online as f64);
}

pub fn record_history_write(status: &str) {
    counter!(
        "monitor_history_writes_total",
        "status" => status.to_string()
    )
    .increment(1);
}
