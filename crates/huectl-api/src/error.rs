use thiserror::Error;

/// Top-level error type for the `huectl-api` crate.
///
/// Covers every failure mode of talking to a bridge: the application key
/// being rejected, transport, non-valid HTTP statuses and undecodable
/// payloads. `huectl-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The bridge rejected the `hue-application-key` (HTTP 401/403), or the
    /// key could not be encoded as a header value.
    #[error("Application key rejected by bridge (HTTP {status})")]
    InvalidAppKey { status: u16 },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, TLS handshake, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate loading error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The bridge answered with a status outside the valid set (200, 404).
    #[error("Bridge API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came from the network layer rather than
    /// from the bridge's answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the request timed out or never connected.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// HTTP status attached to this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidAppKey { status } | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = Error::Api {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());
        assert!(!err.is_transient());
    }

    #[test]
    fn invalid_app_key_message() {
        let err = Error::InvalidAppKey { status: 403 };
        assert_eq!(err.to_string(), "Application key rejected by bridge (HTTP 403)");
    }
}
