//! API gateway library.
//!
//! A single-entry reverse proxy that authenticates requests with a static API
//! key, applies a permissive CORS policy and dispatches by path prefix to the
//! orders and analytics services.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
