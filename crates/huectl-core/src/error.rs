// ── Core error types ──
//
// User-facing errors from huectl-core. Callers never match on reqwest or
// serde failures directly; `From<huectl_api::Error>` folds them into
// domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to bridge at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Bridge request timed out")]
    Timeout,

    #[error("HTTP transport error: {message}")]
    Transport { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Device not found: {name}")]
    DeviceNotFound { name: String },

    #[error("Device {name:?} has no {rtype} service")]
    ServiceNotFound { name: String, rtype: String },

    #[error("Device name {name:?} is ambiguous ({count} devices share it)")]
    AmbiguousName { name: String, count: usize },

    #[error("Entertainment configuration not found: {name}")]
    EntertainmentNotFound { name: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("Bridge API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for failures below HTTP: refused connections, timeouts, TLS.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout | Self::Transport { .. }
        )
    }

    /// `true` when a name or id did not resolve against the catalog.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound { .. }
                | Self::ServiceNotFound { .. }
                | Self::EntertainmentNotFound { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<huectl_api::Error> for CoreError {
    fn from(err: huectl_api::Error) -> Self {
        match err {
            huectl_api::Error::InvalidAppKey { status } => CoreError::AuthenticationFailed {
                message: format!("application key rejected (HTTP {status})"),
            },
            huectl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Transport {
                        message: e.to_string(),
                    }
                }
            }
            huectl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            huectl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            huectl_api::Error::Api { status, message } => CoreError::Api { status, message },
            huectl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
