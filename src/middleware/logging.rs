use axum::{body::Body, http::Request, response::Response};
use std::time::Duration;
use tracing::Span;

/// Request span for `TraceLayer`.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Response hook for `TraceLayer`: server errors log at error, client errors
/// at warn, everything else at info.
pub fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let millis = latency.as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), latency_ms = millis, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), latency_ms = millis, "request rejected");
    } else {
        tracing::info!(status = status.as_u16(), latency_ms = millis, "request completed");
    }
}
