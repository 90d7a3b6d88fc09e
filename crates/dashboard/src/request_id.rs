//! Request ID middleware for request correlation.
//!
//! Reuses a client-supplied `x-request-id` or generates a UUID, records it on
//! the request's tracing span and echoes it back in the response headers.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation id, in both directions.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Wraps each request in a `request` span tagged with its id.
///
/// A `/seed` run logs from inside this span, so the seeder's progress and
/// rollback messages share the id returned to the caller.
pub async fn request_id_middleware(request: Request, next: Next) -> Response<Body> {
    // Reuse the caller's id when one is supplied
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    );

    async move {
        tracing::info!("Request started");

        let mut response = next.run(request).await;

        // Ids that are not valid header values are simply not echoed
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(REQUEST_ID_HEADER.clone(), value);
        }

        tracing::info!(status = %response.status().as_u16(), "Request completed");

        response
    }
    .instrument(span)
    .await
}
