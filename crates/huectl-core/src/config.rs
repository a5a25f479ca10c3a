// ── Runtime connection configuration ──
//
// Describes how to reach one bridge. Carries the application key and
// connection tuning but never touches disk; huectl-config builds a
// `BridgeConfig` from the YAML file and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use huectl_api::{BridgeEndpoint, TlsMode, TransportConfig};

use crate::model::Archetype;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Bridges ship a self-signed certificate.
    #[default]
    DangerAcceptInvalid,
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to a single bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Host or `host:port` of the bridge.
    pub address: String,
    pub app_key: SecretString,
    pub scheme: String,
    /// Path prefix of the CLIP API, normally `/clip/v2/`.
    pub api_root: String,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Device archetypes the catalog admits, in grouping order.
    pub archetypes: Vec<Archetype>,
}

impl BridgeConfig {
    pub fn new(address: impl Into<String>, app_key: SecretString) -> Self {
        Self {
            address: address.into(),
            app_key,
            scheme: BridgeEndpoint::DEFAULT_SCHEME.to_owned(),
            api_root: BridgeEndpoint::DEFAULT_API_ROOT.to_owned(),
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            archetypes: Archetype::defaults(),
        }
    }

    pub fn endpoint(&self) -> BridgeEndpoint {
        BridgeEndpoint::new(self.address.clone())
            .with_scheme(self.scheme.clone())
            .with_api_root(self.api_root.clone())
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
