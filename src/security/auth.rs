//! Static API key authentication.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compares a caller-supplied key against the configured secret.
///
/// Both sides are hashed to fixed-length SHA-256 digests and compared with
/// `subtle::ConstantTimeEq`, so timing reveals neither the length nor the
/// content of the configured key.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    expected: [u8; 32],
}

impl ApiKeyAuthenticator {
    pub fn new(api_key: &str) -> Self {
        let mut expected = [0u8; 32];
        expected.copy_from_slice(&Sha256::digest(api_key.as_bytes()));
        Self { expected }
    }

    /// True iff `provided` equals the configured key byte for byte. Empty never matches.
    pub fn is_authorized(&self, provided: &[u8]) -> bool {
        if provided.is_empty() {
            return false;
        }
        let provided = Sha256::digest(provided);
        provided.as_slice().ct_eq(&self.expected[..]).into()
    }

    /// Check the raw `X-API-Key` header bytes. An absent header is treated as empty.
    pub fn is_request_authorized(&self, headers: &HeaderMap) -> bool {
        let provided = headers
            .get(API_KEY_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();
        self.is_authorized(provided)
    }
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthenticator").finish_non_exhaustive()
    }
}
