//! Error types for upstream provider calls
//!
//! Every outbound call is made exactly once - there is no retry anywhere.
//! The only recovery mechanism is the stale cache fallback in front of the
//! proxy endpoints, so the taxonomy stays small: a call either failed in
//! transport, came back with a non-2xx status, or returned a body we could
//! not parse.

use thiserror::Error;

/// Failure of a single upstream provider call
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Upstream body did not match the expected shape
    #[error("Invalid response: {0}")]
    Malformed(String),

    /// The NFT provider API key is not configured
    #[error("Missing API key")]
    MissingApiKey,
}

impl UpstreamError {
    /// HTTP status to surface to the caller when no cached fallback exists
    ///
    /// Non-2xx upstream statuses are passed through; transport and parse
    /// failures map to 500; a missing key is a client-visible 400.
    pub fn http_status(&self) -> u16 {
        match self {
            UpstreamError::Network(_) => 500,
            UpstreamError::Status(code) => *code,
            UpstreamError::Malformed(_) => 500,
            UpstreamError::MissingApiKey => 400,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else {
            UpstreamError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(UpstreamError::Network("down".into()).http_status(), 500);
        assert_eq!(UpstreamError::Status(503).http_status(), 503);
        assert_eq!(UpstreamError::Malformed("bad json".into()).http_status(), 500);
        assert_eq!(UpstreamError::MissingApiKey.http_status(), 400);
    }
}
