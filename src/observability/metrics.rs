//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_requests_total` (counter): requests by scope, status
//! - `gate_request_duration_seconds` (histogram): handler latency by scope, status
//! - `gate_verdicts_total` (counter): answered checks by scope, verdict

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::check::Verdict;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(scope: &str, status: StatusCode, verdict: Option<Verdict>, start: Instant) {
    let status = status.as_u16().to_string();

    metrics::counter!(
        "gate_requests_total",
        "scope" => scope.to_owned(),
        "status" => status.clone()
    )
    .increment(1);

    metrics::histogram!(
        "gate_request_duration_seconds",
        "scope" => scope.to_owned(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    if let Some(verdict) = verdict {
        metrics::counter!(
            "gate_verdicts_total",
            "scope" => scope.to_owned(),
            "verdict" => verdict.label()
        )
        .increment(1);
    }
}
