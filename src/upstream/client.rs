//! Transport wrapper around the hyper-util connection-pooling client.
//!
//! # Responsibilities
//! - Relay a prepared request to an upstream and await its response headers
//! - Bound that wait with the configured upstream timeout
//! - Hand back a sanitized, still-streaming reply
//!
//! # Design Decisions
//! - Connections are pooled by the client and released on every exit path
//! - Dropping the returned future (caller went away) aborts the upstream call
//! - One connector serves both `http` and `https` upstreams; TLS roots are
//!   the bundled webpki set

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::http::request::into_upstream_request;
use crate::http::response::sanitize_upstream_response;
use crate::upstream::{ForwardError, UpstreamTarget};

/// Forwards requests to upstream targets over a shared client.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    upstream_timeout: Duration,
}

impl Forwarder {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            upstream_timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    /// Maximum wait for upstream response headers.
    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    /// Relay `request` to `target` and return its sanitized reply.
    pub async fn forward(
        &self,
        target: &UpstreamTarget,
        request: Request<Body>,
        client_addr: Option<SocketAddr>,
    ) -> Result<Response<Body>, ForwardError> {
        let request = into_upstream_request(request, target, client_addr)?;

        let pending = self.client.request(request);
        let response: Response<Incoming> = tokio::time::timeout(self.upstream_timeout, pending)
            .await
            .map_err(|_| ForwardError::Timeout(self.upstream_timeout))??;

        Ok(sanitize_upstream_response(response))
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("upstream_timeout", &self.upstream_timeout)
            .finish_non_exhaustive()
    }
}
