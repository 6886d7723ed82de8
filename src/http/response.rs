//! Response handling and transformation.
//!
//! # Responsibilities
//! - Sanitize upstream replies before they reach the caller
//! - Map forwarding failures to gateway responses
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Hop-by-hop headers stripped automatically
//! - Upstream CORS headers stripped so only the gateway policy is observed
//! - Backend timeouts result in 504 Gateway Timeout, other failures in 502

use axum::{
    body::Body,
    http::{HeaderMap, Response},
    response::IntoResponse,
};

use crate::http::cors::strip_upstream_cors;
use crate::security::headers::strip_hop_by_hop;
use crate::upstream::ForwardError;

/// Pure header rewrite applied to every upstream reply.
pub fn sanitize_headers(mut headers: HeaderMap) -> HeaderMap {
    strip_hop_by_hop(&mut headers);
    strip_upstream_cors(headers)
}

/// Relay an upstream reply: status and body untouched, headers sanitized.
pub fn sanitize_upstream_response<B>(response: Response<B>) -> Response<Body>
where
    B: axum::body::HttpBody<Data = axum::body::Bytes> + Send + 'static,
    B::Error: Into<axum::BoxError>,
{
    let (mut parts, body) = response.into_parts();
    parts.headers = sanitize_headers(std::mem::take(&mut parts.headers));
    Response::from_parts(parts, Body::new(body))
}

/// Caller-facing response for a forwarding failure.
pub fn forward_error_response(error: &ForwardError) -> axum::response::Response {
    let message = match error {
        ForwardError::Timeout(_) => "Upstream request timed out",
        ForwardError::Uri(_) | ForwardError::Transport(_) => "Upstream request failed",
    };
    (error.status(), message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sanitize_keeps_status_and_body() {
        let upstream = Response::builder()
            .status(StatusCode::CREATED)
            .header("access-control-allow-origin", "https://app.example")
            .header("transfer-encoding", "chunked")
            .header("location", "/orders/1")
            .body(Body::from("created"))
            .unwrap();

        let response = sanitize_upstream_response(upstream);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["location"], "/orders/1");
        assert!(!response.headers().contains_key("access-control-allow-origin"));
        assert!(!response.headers().contains_key("transfer-encoding"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"created");
    }

    #[test]
    fn test_timeout_maps_to_504() {
        let response = forward_error_response(&ForwardError::Timeout(Duration::from_secs(1)));
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
