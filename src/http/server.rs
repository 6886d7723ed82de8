//! HTTP server setup and the gateway request handler.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all gateway handler
//! - Wire up middleware (CORS policy, request ID, tracing)
//! - Bind server to listener with graceful shutdown
//! - Classify each request: preflight, unauthorized, routed, or unmatched
//! - Forward routed requests to their upstream

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::{ConfigError, GatewayConfig};
use crate::http::cors;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::forward_error_response;
use crate::lifecycle::shutdown;
use crate::observability::metrics::{self, NO_UPSTREAM};
use crate::routing::RouteTable;
use crate::security::ApiKeyAuthenticator;
use crate::upstream::Forwarder;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub auth: Arc<ApiKeyAuthenticator>,
    pub forwarder: Forwarder,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Build the server from a validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let state = AppState {
            routes: Arc::new(RouteTable::from_config(&config)?),
            auth: Arc::new(ApiKeyAuthenticator::new(&config.api_key)),
            forwarder: Forwarder::new(&config.timeouts),
        };

        for route in state.routes.routes() {
            tracing::info!(
                prefix = route.prefix(),
                upstream = route.upstream().name(),
                authority = %route.upstream().authority(),
                timeout_secs = state.forwarder.upstream_timeout().as_secs(),
                "Route registered"
            );
        }

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer());

        // Outermost: the gateway policy overrides whatever the inner stack produced.
        for (name, value) in cors::policy_headers() {
            router = router.layer(SetResponseHeaderLayer::overriding(name, value));
        }

        router
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            orders = %self.config.orders_upstream_url,
            analytics = %self.config.analytics_upstream_url,
            "Gateway server listening"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Gateway handler: preflight, then authentication, then prefix dispatch.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let request_id = request_id(&request);
    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    if !state.auth.is_request_authorized(request.headers()) {
        let remote_addr = client_addr.map_or_else(|| "unknown".to_string(), |a| a.to_string());
        tracing::warn!(
            request_id = %request_id,
            remote_addr = %remote_addr,
            method = %method,
            path = %path,
            "Unauthorized request blocked"
        );
        metrics::record_request(method.as_str(), 401, NO_UPSTREAM, start);
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        metrics::record_request(method.as_str(), 404, NO_UPSTREAM, start);
        return (StatusCode::NOT_FOUND, "Route not found").into_response();
    };
    let upstream = route.upstream();

    let response = match state.forwarder.forward(upstream, request, client_addr).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = upstream.name(),
                error = %e,
                "Upstream request failed"
            );
            forward_error_response(&e)
        }
    };

    let status = response.status();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        upstream = upstream.name(),
        status = status.as_u16(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Request forwarded"
    );
    metrics::record_request(method.as_str(), status.as_u16(), upstream.name(), start);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use tower::ServiceExt;

    // Upstreams are never contacted by these cases.
    fn server() -> HttpServer {
        HttpServer::new(GatewayConfig::new(
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
            "test-key",
        ))
        .unwrap()
    }

    async fn send(request: Request<Body>) -> (Response, String) {
        let response = server().router().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        (
            Response::from_parts(parts, Body::empty()),
            String::from_utf8(bytes.to_vec()).unwrap(),
        )
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PATCH, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, X-API-Key"
        );
    }

    #[tokio::test]
    async fn test_preflight_skips_auth_and_routing() {
        for path in ["/orders", "/analytics/summary", "/unknown"] {
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(path)
                .header("x-api-key", "wrong-key")
                .body(Body::empty())
                .unwrap();

            let (response, body) = send(request).await;
            assert_eq!(response.status(), StatusCode::OK, "path {path}");
            assert!(body.is_empty());
            assert_cors(&response);
        }
    }

    #[tokio::test]
    async fn test_wrong_key_is_unauthorized() {
        let request = Request::builder()
            .uri("/orders")
            .header("x-api-key", "wrong-key")
            .body(Body::empty())
            .unwrap();

        let (response, body) = send(request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized_before_routing() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();

        let (response, _) = send(request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unmatched_route_is_not_found() {
        let request = Request::builder()
            .uri("/unknown")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();

        let (response, body) = send(request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body, "Route not found");
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_prefix_is_case_sensitive() {
        let request = Request::builder()
            .uri("/Orders")
            .header("x-api-key", "test-key")
            .body(Body::empty())
            .unwrap();

        let (response, _) = send(request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_https_upstreams_build_a_server() {
        let server = HttpServer::new(GatewayConfig::new(
            "https://orders.internal",
            "https://analytics.internal:8443/v1",
            "test-key",
        ));
        assert!(server.is_ok());
    }

    #[tokio::test]
    async fn test_request_id_is_assigned_and_propagated() {
        let request = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let (response, _) = send(request).await;
        assert!(response.headers().contains_key("x-request-id"));

        let request = Request::builder()
            .uri("/unknown")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let (response, _) = send(request).await;
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
