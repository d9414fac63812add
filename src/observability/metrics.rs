//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tenant_edge_resolutions_total` (counter): routing decisions by outcome
//! - `tenant_edge_requests_total` (counter): requests by method, status
//! - `tenant_edge_request_duration_seconds` (histogram): latency distribution
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one routing decision (`bypass`, `root`, `tenant`, `rewrite_failed`).
pub fn record_resolution(outcome: &'static str) {
    counter!("tenant_edge_resolutions_total", "outcome" => outcome).increment(1);
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!("tenant_edge_requests_total", "method" => method.to_string(), "status" => status.clone())
        .increment(1);
    histogram!("tenant_edge_request_duration_seconds", "method" => method.to_string(), "status" => status)
        .record(start.elapsed().as_secs_f64());
}
