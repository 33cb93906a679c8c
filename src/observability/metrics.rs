//! Metrics collection and exposition.
//!
//! # Metrics
//! - `items_upstream_requests_total` (counter): outbound calls by method, route, status
//! - `items_upstream_request_duration_seconds` (histogram): time to upstream response headers
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one outbound call. `status` is `None` when no response arrived.
pub fn record_upstream_request(
    method: &str,
    route: &'static str,
    status: Option<StatusCode>,
    start: Instant,
) {
    let status = status
        .map(|s| s.as_u16().to_string())
        .unwrap_or_else(|| "error".to_string());

    metrics::counter!(
        "items_upstream_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "items_upstream_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}
