//! Request middleware for body limits

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Body size limit middleware
///
/// Checks Content-Length header and rejects requests exceeding the
/// configured `max_body_bytes`.
pub async fn body_size_limit(
    State(max_body_bytes): State<usize>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok());

    if let Some(length) = length {
        if length > max_body_bytes {
            warn!(
                "Request body too large: {} bytes (max: {})",
                length, max_body_bytes
            );
            return Err(StatusCode::PAYLOAD_TOO_LARGE);
        }
    }

    Ok(next.run(request).await)
}
