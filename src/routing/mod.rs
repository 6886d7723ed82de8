//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Authorized request path
//!     → router.rs (ordered route scan)
//!     → matcher.rs (literal prefix test)
//!     → Return: matched Route (with its UpstreamTarget) or None
//!
//! Route Compilation (at startup):
//!     GatewayConfig
//!     → /orders → orders upstream, /analytics → analytics upstream
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (insertion order)

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, RouteTable};
