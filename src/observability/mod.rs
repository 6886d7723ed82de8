//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway handler produces:
//!     → logging.rs (structured log events: forwarded, unauthorized, not found)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Request ID flows through logs and to the upstream
//! - Metrics are cheap (atomic increments) and no-ops without an exporter

pub mod logging;
pub mod metrics;
