//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Environment variables are layered on top by the loader.

use serde::Deserialize;

/// Root configuration for the gateway.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (e.g., "0.0.0.0:8080", "localhost:8080" or ":8080").
    pub listen_address: String,

    /// Base URL of the orders service.
    pub orders_upstream_url: String,

    /// Base URL of the analytics service.
    pub analytics_upstream_url: String,

    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Config with the given upstreams and key, everything else defaulted.
    pub fn new(
        orders_upstream_url: impl Into<String>,
        analytics_upstream_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            orders_upstream_url: orders_upstream_url.into(),
            analytics_upstream_url: analytics_upstream_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// The listen address in a form `TcpListener::bind` accepts.
    ///
    /// A bare `:port` binds every interface.
    pub fn bind_address(&self) -> String {
        match self.listen_address.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => self.listen_address.clone(),
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_address", &self.listen_address)
            .field("orders_upstream_url", &self.orders_upstream_url)
            .field("analytics_upstream_url", &self.analytics_upstream_url)
            .field("api_key", &"[REDACTED]")
            .field("timeouts", &self.timeouts)
            .field("observability", &self.observability)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8080".to_string(),
            orders_upstream_url: String::new(),
            analytics_upstream_url: String::new(),
            api_key: String::new(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Timeouts applied to upstream calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Maximum wait for upstream response headers in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
