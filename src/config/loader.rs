//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_LISTEN_ADDRESS: &str = "GATEWAY_LISTEN_ADDRESS";
pub const ENV_ORDERS_URL: &str = "ORDERS_SERVICE_URL";
pub const ENV_ANALYTICS_URL: &str = "ANALYTICS_SERVICE_URL";
pub const ENV_API_KEY: &str = "ORDERS_API_KEY";
pub const ENV_CONNECT_TIMEOUT: &str = "GATEWAY_CONNECT_TIMEOUT_SECS";
pub const ENV_UPSTREAM_TIMEOUT: &str = "GATEWAY_UPSTREAM_TIMEOUT_SECS";
pub const ENV_METRICS_ADDRESS: &str = "GATEWAY_METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("invalid {upstream} upstream: {reason}")]
    Upstream {
        upstream: &'static str,
        reason: String,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file plus the process environment.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    load_config_with(path, |var| std::env::var(var).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto a config. Unset or empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.is_empty());

    if let Some(v) = get(ENV_LISTEN_ADDRESS) {
        config.listen_address = v;
    }
    if let Some(v) = get(ENV_ORDERS_URL) {
        config.orders_upstream_url = v;
    }
    if let Some(v) = get(ENV_ANALYTICS_URL) {
        config.analytics_upstream_url = v;
    }
    if let Some(v) = get(ENV_API_KEY) {
        config.api_key = v;
    }
    if let Some(v) = get(ENV_CONNECT_TIMEOUT) {
        config.timeouts.connect_secs = parse_secs(ENV_CONNECT_TIMEOUT, v)?;
    }
    if let Some(v) = get(ENV_UPSTREAM_TIMEOUT) {
        config.timeouts.upstream_secs = parse_secs(ENV_UPSTREAM_TIMEOUT, v)?;
    }
    if let Some(v) = get(ENV_METRICS_ADDRESS) {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = v;
    }

    Ok(())
}

fn parse_secs(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
