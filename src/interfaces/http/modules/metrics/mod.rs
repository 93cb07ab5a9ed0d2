//! Prometheus metrics endpoint and HTTP metrics middleware

pub mod handlers;
pub mod middleware;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::shared::errors::InfraError;

pub use handlers::*;
pub use middleware::http_metrics_middleware;

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Install the process-wide Prometheus recorder. Only the first call in a
/// process can succeed.
pub fn install_recorder() -> Result<PrometheusHandle, InfraError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .map_err(|e| InfraError::Config(format!("metrics buckets: {}", e)))?
        .install_recorder()
        .map_err(|e| InfraError::Config(format!("metrics recorder: {}", e)))
}
