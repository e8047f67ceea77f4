//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): total requests by route, status
//! - `api_request_duration_seconds` (histogram): latency distribution by route
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_DURATION: &str = "api_request_duration_seconds";

/// Record one completed request.
pub fn record_request(route: &str, status: u16, started: Instant) {
    ::metrics::counter!(
        REQUESTS_TOTAL,
        "route" => route.to_owned(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(REQUEST_DURATION, "route" => route.to_owned())
        .record(started.elapsed().as_secs_f64());
}

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
pub fn init_exporter(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}
