//! Prometheus metrics for catalog activity.

use metrics::{counter, histogram};

/// Initialize metrics exporter (Prometheus).
pub fn init_metrics() {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

pub fn computer_created() {
    counter!("computers_created_total").increment(1);
}

pub fn computer_updated() {
    counter!("computers_updated_total").increment(1);
}

pub fn computer_deleted() {
    counter!("computers_deleted_total").increment(1);
}

/// Record list query duration.
pub fn list_query_duration(duration_ms: u64) {
    histogram!("computer_list_query_ms").record(duration_ms as f64);
}
