//! HTTP request metrics middleware

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// Records per request:
///
/// - `http_requests_total{method, path, status}`
/// - `http_request_duration_seconds{method, path}`
///
/// `path` is the route template (`/api/v1/reservations/{id}`) so label
/// cardinality stays bounded. Install with `route_layer`, which runs after
/// routing and sees `MatchedPath`. Scrapes of `/metrics` are not counted.
pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let path = match request.extensions().get::<MatchedPath>() {
        Some(mp) => mp.as_str().to_string(),
        None => "unmatched".to_string(),
    };
    if path == "/metrics" {
        return next.run(request).await;
    }
    let method = request.method().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(elapsed);

    response
}
