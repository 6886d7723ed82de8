//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (non-preflight):
//!     → auth.rs (X-API-Key check, 401 on mismatch)
//!     → Pass to routing
//!
//! Forwarded request / upstream reply:
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-For)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or unreadable key is a mismatch
//! - Key comparison does not leak length or content through timing

pub mod auth;
pub mod headers;

pub use auth::{ApiKeyAuthenticator, API_KEY_HEADER};
