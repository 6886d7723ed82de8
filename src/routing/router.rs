//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Explicit None rather than silent default

use crate::config::{ConfigError, GatewayConfig};
use crate::routing::matcher::PathPrefixMatcher;
use crate::upstream::UpstreamTarget;

pub const ORDERS_PREFIX: &str = "/orders";
pub const ANALYTICS_PREFIX: &str = "/analytics";

/// A single prefix → upstream mapping.
#[derive(Debug, Clone)]
pub struct Route {
    matcher: PathPrefixMatcher,
    upstream: UpstreamTarget,
}

impl Route {
    pub fn new(prefix: impl Into<String>, upstream: UpstreamTarget) -> Self {
        Self {
            matcher: PathPrefixMatcher::new(prefix),
            upstream,
        }
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn upstream(&self) -> &UpstreamTarget {
        &self.upstream
    }
}

/// Ordered route table. Evaluation order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Build the gateway's fixed table: `/orders` first, then `/analytics`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let orders = UpstreamTarget::parse("orders", &config.orders_upstream_url)?;
        let analytics = UpstreamTarget::parse("analytics", &config.analytics_upstream_url)?;

        Ok(Self::new(vec![
            Route::new(ORDERS_PREFIX, orders),
            Route::new(ANALYTICS_PREFIX, analytics),
        ]))
    }

    /// First route whose prefix matches `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
