//! Gateway CORS policy.
//!
//! The gateway is the only source of CORS headers a client sees: its policy is
//! set on every response, and any CORS headers an upstream sets are removed
//! from the upstream reply before it is relayed.

use axum::http::{
    header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
    },
    HeaderMap, HeaderName, HeaderValue,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, X-API-Key";

/// CORS response headers stripped from upstream replies.
pub static UPSTREAM_CORS_HEADERS: [HeaderName; 6] = [
    ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_EXPOSE_HEADERS,
    ACCESS_CONTROL_MAX_AGE,
];

/// The gateway's policy headers, in the order they are set.
pub fn policy_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN)),
        (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS)),
        (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS)),
    ]
}

/// Set the gateway policy, replacing any existing values.
pub fn apply_policy(headers: &mut HeaderMap) {
    for (name, value) in policy_headers() {
        headers.insert(name, value);
    }
}

/// Remove every upstream-set CORS header.
pub fn strip_upstream_cors(mut headers: HeaderMap) -> HeaderMap {
    for name in &UPSTREAM_CORS_HEADERS {
        headers.remove(name);
    }
    headers
}
