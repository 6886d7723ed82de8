//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID when the caller did not send one
//! - Prepare the inbound request for forwarding to an upstream
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing, and forwarded upstream
//! - Method, path, query, body and end-to-end headers are preserved
//! - The inbound Host header is kept; HTTP/2 callers get one from the rewritten URI

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{Request, Version},
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::security::headers::{append_forwarded_for, strip_hop_by_hop};
use crate::upstream::{ForwardError, UpstreamTarget};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer assigning a UUID `X-Request-ID` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer copying the request's `X-Request-ID` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Request ID of an inbound request, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Turn an inbound request into the request sent to `target`.
pub fn into_upstream_request(
    request: Request<Body>,
    target: &UpstreamTarget,
    client_addr: Option<SocketAddr>,
) -> Result<Request<Body>, ForwardError> {
    let (mut parts, body) = request.into_parts();

    parts.uri = target.rewrite_uri(&parts.uri)?;
    // Upstream connections are HTTP/1.1 whatever the caller spoke.
    parts.version = Version::HTTP_11;

    strip_hop_by_hop(&mut parts.headers);
    if let Some(addr) = client_addr {
        append_forwarded_for(&mut parts.headers, addr.ip());
    }

    Ok(Request::from_parts(parts, body))
}
