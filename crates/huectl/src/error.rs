//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help
//! text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use huectl_config::ConfigError;
use huectl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the bridge at {url}")]
    #[diagnostic(
        code(huectl::connection_failed),
        help(
            "Check that the bridge is powered and reachable from this machine.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(huectl::timeout),
        help("Increase the timeout with --timeout or TIMEOUT in the config file.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("The bridge rejected the application key")]
    #[diagnostic(
        code(huectl::auth_failed),
        help(
            "Check HUE-APPLICATION-KEY in {path}.\n\
             A new key is issued after pressing the bridge's link button."
        )
    )]
    AuthFailed { path: String },

    #[error("No application key configured")]
    #[diagnostic(
        code(huectl::no_credentials),
        help("Set HUE-APPLICATION-KEY in the config file, or pass --app-key / HUECTL_APP_KEY.")
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(huectl::not_found),
        help("Run: huectl {list_command} to see what the bridge knows about")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{count} devices are named '{name}'")]
    #[diagnostic(
        code(huectl::ambiguous_name),
        help("Rename one of them in the Hue app, or address the light with --rid.")
    )]
    AmbiguousName { name: String, count: usize },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Bridge returned {status}: {message}")]
    #[diagnostic(code(huectl::api_error))]
    ApiError { status: u16, message: String },

    #[error("Internal error: {0}")]
    #[diagnostic(code(huectl::internal))]
    Internal(String),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(huectl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No bridge address configured")]
    #[diagnostic(
        code(huectl::no_config),
        help(
            "Create a config file with a PhilipsHue section, or pass --address.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(huectl::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(huectl::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(huectl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::AmbiguousName { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// A light id the bridge answered 404 for.
    pub fn light_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: "light".into(),
            identifier: identifier.into(),
            list_command: "lights list".into(),
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials => Self::NoCredentials,
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Transport { message } => Self::ConnectionFailed {
                url: "(bridge)".into(),
                source: message.into(),
            },

            CoreError::Timeout => Self::Timeout,

            CoreError::AuthenticationFailed { message: _ } => Self::AuthFailed {
                path: huectl_config::config_path().display().to_string(),
            },

            CoreError::DeviceNotFound { name } => Self::NotFound {
                resource_type: "device".into(),
                identifier: name,
                list_command: "devices list".into(),
            },

            CoreError::ServiceNotFound { name, rtype } => Self::NotFound {
                resource_type: format!("{rtype} service of"),
                identifier: name,
                list_command: "devices list".into(),
            },

            CoreError::AmbiguousName { name, count } => Self::AmbiguousName { name, count },

            CoreError::EntertainmentNotFound { name } => Self::NotFound {
                resource_type: "entertainment configuration".into(),
                identifier: name,
                list_command: "entertainment list".into(),
            },

            CoreError::Api { status, message } => Self::ApiError { status, message },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}
