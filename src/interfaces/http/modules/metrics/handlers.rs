//! Prometheus recorder and scrape handler
//!
//! Exposes `GET /metrics` returning Prometheus text format.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Latency buckets in seconds, tuned for a small CRUD API
const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Install the global Prometheus recorder and describe the exported series.
/// Fails if a recorder was already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    metrics::describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
    metrics::describe_counter!(
        "charging_station_mutations_total",
        "Successful station creates, updates and deletes"
    );
    metrics::describe_counter!("auth_attempts_total", "Login and registration attempts by outcome");

    Ok(handle)
}

/// `GET /metrics`: Prometheus scrape endpoint (no auth)
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let body = state.handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
