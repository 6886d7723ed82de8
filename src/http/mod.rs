//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, CORS policy layers)
//!     → gateway handler: preflight? → authorized? → route match?
//!     → request.rs (rewrite for upstream)
//!     → upstream::Forwarder (relay)
//!     → response.rs (sanitize upstream reply)
//!     → Send to client with the gateway CORS policy
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
