//! Prometheus metrics handler
//!
//! `GET /metrics` renders the global recorder in Prometheus text format.
//! Counters: `http_requests_total`, `bookings_total{outcome}`.
//! Histograms: `http_request_duration_seconds`.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`: scrape endpoint, no auth
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
