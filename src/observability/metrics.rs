//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): responses by route, status
//! - `relay_upstream_duration_seconds` (histogram): upstream fetch latency by route, outcome
//!
//! Without an installed exporter the macros are no-ops, so recording is
//! unconditional.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter, serving `/metrics` on `addr`.
///
/// Must be called from inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count one response sent to a client.
pub fn record_request(route: &'static str, status: u16) {
    metrics::counter!(
        "relay_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long one upstream fetch took.
pub fn record_upstream(route: &'static str, success: bool, elapsed: Duration) {
    let outcome = if success { "success" } else { "failure" };
    metrics::histogram!(
        "relay_upstream_duration_seconds",
        "route" => route,
        "outcome" => outcome
    )
    .record(elapsed.as_secs_f64());
}
