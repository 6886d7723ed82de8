//! Upstream target addressing.
//!
//! Maps an inbound request URI onto an upstream base URL: the scheme and
//! authority are replaced, the base path is prefixed to the request path and
//! the base query (if any) is merged in front of the request query.

use axum::http::uri::{Authority, Scheme, Uri};

use crate::config::ConfigError;

/// A named upstream service reachable at a base URL.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    name: &'static str,
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    base_query: Option<String>,
}

impl UpstreamTarget {
    /// Parse an absolute base URL such as `http://orders:8000` or `http://host/api`.
    pub fn parse(name: &'static str, base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Upstream {
            upstream: name,
            reason,
        };

        let uri: Uri = base_url
            .parse()
            .map_err(|e| invalid(format!("{base_url:?}: {e}")))?;

        let scheme = uri
            .scheme()
            .cloned()
            .ok_or_else(|| invalid(format!("{base_url:?} has no scheme")))?;
        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| invalid(format!("{base_url:?} has no host")))?;

        Ok(Self {
            name,
            scheme,
            authority,
            base_path: uri.path().to_string(),
            base_query: uri.query().map(str::to_string),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Rewrite `original` so it addresses this upstream.
    pub fn rewrite_uri(&self, original: &Uri) -> Result<Uri, axum::http::Error> {
        let path = join_paths(&self.base_path, original.path());
        let base_query = self.base_query.as_deref().filter(|q| !q.is_empty());
        let query = original.query().filter(|q| !q.is_empty());
        let path_and_query = match (base_query, query) {
            (Some(base), Some(query)) => format!("{path}?{base}&{query}"),
            (Some(q), None) | (None, Some(q)) => format!("{path}?{q}"),
            (None, None) => path,
        };

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}

/// Join two paths with exactly one slash between them.
fn join_paths(base: &str, path: &str) -> String {
    if base.is_empty() || base == "/" {
        return if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        };
    }

    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}
