//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Matched Route
//!     → target.rs (rewrite scheme/authority/path onto the upstream base URL)
//!     → http/request.rs (strip hop-by-hop, append X-Forwarded-For)
//!     → client.rs (hyper-util client, bounded wait for response headers)
//!     → http/response.rs (strip hop-by-hop + upstream CORS headers)
//!     → streamed back to caller
//! ```
//!
//! # Design Decisions
//! - One target per upstream service, no load balancing
//! - No retries: a transport failure ends that request only
//! - Bodies are streamed in both directions, never buffered

pub mod client;
pub mod target;

use std::time::Duration;

use axum::http::StatusCode;

pub use client::Forwarder;
pub use target::UpstreamTarget;

/// Per-request forwarding failure.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("failed to build upstream URI: {0}")]
    Uri(#[from] axum::http::Error),

    #[error("upstream transport error: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
}

impl ForwardError {
    /// Status code surfaced to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::Uri(_) | ForwardError::Transport(_) => StatusCode::BAD_GATEWAY,
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}
