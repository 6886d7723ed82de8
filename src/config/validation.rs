//! Configuration validation.
//!
//! # Responsibilities
//! - Check that both upstream URLs are absolute `http`/`https` URLs with a host
//! - Check that the API key is present
//! - Validate value ranges (timeouts > 0, listen address is `host:port` or `:port`)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid listen address {0:?}")]
    InvalidListenAddress(String),

    #[error("{upstream} upstream URL is not set")]
    MissingUpstreamUrl { upstream: &'static str },

    #[error("{upstream} upstream URL {url:?} is invalid: {reason}")]
    InvalidUpstreamUrl {
        upstream: &'static str,
        url: String,
        reason: String,
    },

    #[error("{upstream} upstream URL uses unsupported scheme {scheme:?} (expected http or https)")]
    UnsupportedScheme {
        upstream: &'static str,
        scheme: String,
    },

    #[error("API key is not set")]
    MissingApiKey,

    #[error("timeout {0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a loaded configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_valid_listen_address(&config.bind_address()) {
        errors.push(ValidationError::InvalidListenAddress(
            config.listen_address.clone(),
        ));
    }

    for (upstream, url) in [
        ("orders", &config.orders_upstream_url),
        ("analytics", &config.analytics_upstream_url),
    ] {
        if let Err(e) = validate_upstream_url(upstream, url) {
            errors.push(e);
        }
    }

    if config.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `host:port` with a non-empty host (name, IPv4 or bracketed IPv6) and a numeric port.
fn is_valid_listen_address(addr: &str) -> bool {
    let Some((host, port)) = addr.rsplit_once(':') else {
        return false;
    };
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    !host.is_empty() && !host.contains(char::is_whitespace) && port.parse::<u16>().is_ok()
}

fn validate_upstream_url(upstream: &'static str, raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::MissingUpstreamUrl { upstream });
    }

    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUpstreamUrl {
        upstream,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme {
            upstream,
            scheme: url.scheme().to_string(),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUpstreamUrl {
            upstream,
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(())
}
