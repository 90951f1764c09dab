//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define edge metrics (request counts, fallbacks, API failures, latency)
//! - Expose a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by surface and route kind
//! - `edge_api_failures_total` (counter): failed outbound API calls
//! - `edge_content_fallbacks_total` (counter): responses served with defaults
//! - `edge_request_duration_seconds` (histogram): latency by surface
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Metric names are fixed; labels carry the variability

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint. Failure to bind is
/// logged but does not take the service down.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Count an inbound request on one of the two surfaces.
pub fn request(surface: &'static str, route_kind: &'static str) {
    metrics::counter!(
        "edge_requests_total",
        "surface" => surface,
        "route" => route_kind,
    )
    .increment(1);
}

/// Count a failed outbound API call.
pub fn api_failure(surface: &'static str) {
    metrics::counter!("edge_api_failures_total", "surface" => surface).increment(1);
}

/// Count a response that degraded to the configured defaults.
pub fn content_fallback(surface: &'static str) {
    metrics::counter!("edge_content_fallbacks_total", "surface" => surface).increment(1);
}

/// Record how long a request took to serve.
pub fn request_duration(surface: &'static str, elapsed: Duration) {
    metrics::histogram!("edge_request_duration_seconds", "surface" => surface)
        .record(elapsed.as_secs_f64());
}
