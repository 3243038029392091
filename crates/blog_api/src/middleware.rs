use axum::{extract::Request, middleware::Next, response::Response};
use log::{info, warn};
use std::time::Instant;

/// Emits one `http_request` event per request with status and duration.
pub async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();
    let duration_ms = started_at.elapsed().as_millis();

    if status.is_server_error() {
        warn!(
            "event=http_request module=api status={} method={method} path={path} duration_ms={duration_ms}",
            status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=api status={} method={method} path={path} duration_ms={duration_ms}",
            status.as_u16()
        );
    }
    response
}
