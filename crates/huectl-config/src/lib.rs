//! Configuration for the huectl CLI.
//!
//! Reads the bridge's YAML config file, layers `HUECTL_*` environment
//! variables over it, and translates the result into
//! `huectl_core::BridgeConfig`.
//!
//! The file is a list whose first `PhilipsHue` entry holds the settings:
//!
//! ```yaml
//! - PhilipsHue:
//!     HUE-APPLICATION-KEY: 1a2b3c...
//!     IPADDR: 192.168.1.20
//!     TIMEOUT: 10          # optional, seconds
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use huectl_core::{Archetype, BridgeConfig, TlsVerification};

pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const ENV_PREFIX: &str = "HUECTL_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("no PhilipsHue section in {}", path.display())]
    MissingSection { path: PathBuf },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no application key configured (HUE-APPLICATION-KEY or HUECTL_APP_KEY)")]
    NoCredentials,
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Effective settings after defaults, file and environment are merged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    pub scheme: String,
    pub api_root: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub archetypes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(default)]
    pub verify_tls: bool,
    /// The file these settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            address: None,
            app_key: None,
            scheme: "https".into(),
            api_root: "/clip/v2/".into(),
            timeout: 30,
            archetypes: Archetype::defaults().into_iter().map(String::from).collect(),
            ca_cert: None,
            verify_tls: false,
            source: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("address", &self.address)
            .field("app_key", &self.app_key.as_ref().map(|_| "[REDACTED]"))
            .field("scheme", &self.scheme)
            .field("api_root", &self.api_root)
            .field("timeout", &self.timeout)
            .field("archetypes", &self.archetypes)
            .field("ca_cert", &self.ca_cert)
            .field("verify_tls", &self.verify_tls)
            .field("source", &self.source)
            .finish()
    }
}

// ── File shape ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    List(Vec<ConfigEntry>),
    Single(ConfigEntry),
}

#[derive(Debug, Deserialize)]
struct ConfigEntry {
    #[serde(rename = "PhilipsHue")]
    philips_hue: Option<HueSection>,
}

/// The `PhilipsHue` mapping as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
struct HueSection {
    #[serde(default, deserialize_with = "scalar_text")]
    hue_application_key: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    ipaddr: Option<String>,
    scheme: Option<String>,
    api_root: Option<String>,
    timeout: Option<u64>,
    archetypes: Option<Vec<String>>,
    ca_cert: Option<PathBuf>,
    verify_tls: Option<bool>,
}

/// Reads a YAML scalar as text, so an all-digit key needs no quotes.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, got {other:?}"
        ))),
    }
}

/// What the file contributes to the figment; unset keys stay absent so
/// they do not shadow defaults.
#[derive(Serialize)]
struct FileLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archetypes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ca_cert: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verify_tls: Option<bool>,
}

impl From<HueSection> for FileLayer {
    fn from(s: HueSection) -> Self {
        Self {
            address: s.ipaddr,
            app_key: s.hue_application_key,
            scheme: s.scheme,
            api_root: s.api_root,
            timeout: s.timeout,
            archetypes: s.archetypes,
            ca_cert: s.ca_cert,
            verify_tls: s.verify_tls,
        }
    }
}

fn parse_file(path: &Path, contents: &str) -> Result<HueSection, ConfigError> {
    let missing = || ConfigError::MissingSection {
        path: path.to_path_buf(),
    };
    if contents.trim().is_empty() {
        return Err(missing());
    }
    let entries = match serde_yaml::from_str::<ConfigFile>(contents)? {
        ConfigFile::List(entries) => entries,
        ConfigFile::Single(entry) => vec![entry],
    };
    entries
        .into_iter()
        .find_map(|e| e.philips_hue)
        .ok_or_else(missing)
}

// ── Config file path ────────────────────────────────────────────────

/// Platform config location: `<config_dir>/huectl/config.yml`.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "huectl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("huectl");
            p.push(CONFIG_FILE_NAME);
            p
        },
        |dirs| dirs.config_dir().join(CONFIG_FILE_NAME),
    )
}

/// Explicit path, else `./config.yml` when present, else [`config_path`].
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }
    config_path()
}

// ── Loading ─────────────────────────────────────────────────────────

/// Loads settings from defaults, the config file and `HUECTL_*` variables.
///
/// An explicit path must exist. Without one, a missing file is fine and
/// the environment alone may supply the address and key.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = resolve_config_path(explicit);

    let file = if explicit.is_some() || path.is_file() {
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "reading config file");
        Some(parse_file(&path, &contents)?)
    } else {
        debug!(path = %path.display(), "no config file, using environment only");
        None
    };

    let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
    if let Some(section) = file {
        figment = figment.merge(Serialized::defaults(FileLayer::from(section)));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).only(&["scheme", "api_root", "timeout"]));
    // Address and key are taken verbatim; typed parsing would turn an
    // all-digit key into an integer.
    for (key, value) in Env::prefixed(ENV_PREFIX).only(&["address", "app_key"]).iter() {
        let key = key.as_str().to_ascii_lowercase();
        figment = figment.merge(Serialized::default(&key, value));
    }

    let mut settings: Settings = figment.extract()?;
    if explicit.is_some() || path.is_file() {
        settings.source = Some(path);
    }
    Ok(settings)
}

// ── Translation ─────────────────────────────────────────────────────

/// Validates settings and builds the runtime `BridgeConfig`.
pub fn settings_to_bridge_config(settings: &Settings) -> Result<BridgeConfig, ConfigError> {
    let address = settings
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ConfigError::Validation {
            field: "address".into(),
            reason: format!("no bridge address configured (IPADDR or {ENV_PREFIX}ADDRESS)"),
        })?;
    if address.contains("://") || address.contains('/') {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: format!("expected host or host:port, got '{address}'"),
        });
    }

    let app_key = settings
        .app_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::NoCredentials)?;

    if !matches!(settings.scheme.as_str(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "scheme".into(),
            reason: format!("expected 'http' or 'https', got '{}'", settings.scheme),
        });
    }
    if settings.timeout == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }
    if settings.archetypes.is_empty() {
        return Err(ConfigError::Validation {
            field: "archetypes".into(),
            reason: "at least one archetype is required".into(),
        });
    }

    let tls = if let Some(ref ca) = settings.ca_cert {
        TlsVerification::CustomCa(ca.clone())
    } else if settings.verify_tls {
        TlsVerification::SystemDefaults
    } else {
        TlsVerification::DangerAcceptInvalid
    };

    let mut config = BridgeConfig::new(address, SecretString::from(app_key.to_owned()));
    config.scheme.clone_from(&settings.scheme);
    config.api_root.clone_from(&settings.api_root);
    config.tls = tls;
    config.timeout = Duration::from_secs(settings.timeout);
    config.archetypes = settings
        .archetypes
        .iter()
        .map(|a| Archetype::from(a.as_str()))
        .collect();
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const BASIC: &str = "\
- PhilipsHue:
    HUE-APPLICATION-KEY: secret-key
    IPADDR: 192.168.1.20
";

    #[test]
    fn reads_list_shape() {
        let file = write_config(BASIC);
        let section = parse_file(file.path(), BASIC).unwrap();
        assert_eq!(section.ipaddr.as_deref(), Some("192.168.1.20"));
        assert_eq!(section.hue_application_key.as_deref(), Some("secret-key"));
        assert!(section.timeout.is_none());
    }

    #[test]
    fn optional_keys_are_read() {
        let yaml = "\
- PhilipsHue:
    HUE-APPLICATION-KEY: k
    IPADDR: hue.local
    SCHEME: http
    API-ROOT: /clip/v2
    TIMEOUT: 5
    ARCHETYPES: [sultan_bulb, hue_lightstrip]
";
        let section = parse_file(Path::new("x.yml"), yaml).unwrap();
        assert_eq!(section.scheme.as_deref(), Some("http"));
        assert_eq!(section.api_root.as_deref(), Some("/clip/v2"));
        assert_eq!(section.timeout, Some(5));
        assert_eq!(
            section.archetypes,
            Some(vec!["sultan_bulb".to_string(), "hue_lightstrip".to_string()])
        );
    }

    #[test]
    fn missing_section_is_reported() {
        let err = parse_file(Path::new("x.yml"), "- Other:\n    KEY: v\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { .. }));
        let err = parse_file(Path::new("x.yml"), "  \n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { .. }));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = parse_file(Path::new("x.yml"), "- PhilipsHue: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let err = load_settings(Some(Path::new("/nonexistent/huectl/config.yml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn file_values_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "hue.yml",
                "- PhilipsHue:\n    HUE-APPLICATION-KEY: k\n    IPADDR: 10.0.0.2\n    TIMEOUT: 7\n",
            )?;
            let settings =
                load_settings(Some(Path::new("hue.yml"))).map_err(|e| e.to_string())?;
            assert_eq!(settings.address.as_deref(), Some("10.0.0.2"));
            assert_eq!(settings.timeout, 7);
            assert_eq!(settings.scheme, "https");
            assert_eq!(settings.source.as_deref(), Some(Path::new("hue.yml")));
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, BASIC)?;
            jail.set_env("HUECTL_ADDRESS", "10.9.8.7");
            jail.set_env("HUECTL_TIMEOUT", "12");
            let settings = load_settings(None).map_err(|e| e.to_string())?;
            assert_eq!(settings.address.as_deref(), Some("10.9.8.7"));
            assert_eq!(settings.app_key.as_deref(), Some("secret-key"));
            assert_eq!(settings.timeout, 12);
            assert_eq!(settings.source.as_deref(), Some(Path::new(CONFIG_FILE_NAME)));
            Ok(())
        });
    }

    #[test]
    fn environment_alone_is_enough() {
        figment::Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", home);
            jail.set_env("HUECTL_ADDRESS", "hue.local");
            jail.set_env("HUECTL_APP_KEY", "env-key");
            let settings = load_settings(None).map_err(|e| e.to_string())?;
            let config = settings_to_bridge_config(&settings).map_err(|e| e.to_string())?;
            assert_eq!(config.address, "hue.local");
            assert_eq!(config.app_key.expose_secret(), "env-key");
            Ok(())
        });
    }

    #[test]
    fn numeric_environment_values_stay_text() {
        figment::Jail::expect_with(|jail| {
            let home = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", home);
            jail.set_env("HUECTL_ADDRESS", "10");
            jail.set_env("HUECTL_APP_KEY", "0071234567890");
            let settings = load_settings(None).map_err(|e| e.to_string())?;
            assert_eq!(settings.address.as_deref(), Some("10"));
            assert_eq!(settings.app_key.as_deref(), Some("0071234567890"));
            Ok(())
        });
    }

    #[test]
    fn numeric_file_key_is_read_as_text() {
        let yaml = "- PhilipsHue:\n    HUE-APPLICATION-KEY: 1234567890\n    IPADDR: hue.local\n";
        let section = parse_file(Path::new("x.yml"), yaml).unwrap();
        assert_eq!(section.hue_application_key.as_deref(), Some("1234567890"));

        let err = parse_file(Path::new("x.yml"), "- PhilipsHue:\n    IPADDR: [a, b]\n");
        assert!(err.is_err());
    }

    #[test]
    fn translation_builds_bridge_config() {
        let settings = Settings {
            address: Some("192.168.1.20".into()),
            app_key: Some("secret-key".into()),
            timeout: 9,
            archetypes: vec!["sultan_bulb".into()],
            ..Settings::default()
        };
        let config = settings_to_bridge_config(&settings).unwrap();
        assert_eq!(config.address, "192.168.1.20");
        assert_eq!(config.timeout, Duration::from_secs(9));
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.archetypes, vec![Archetype::SultanBulb]);
    }

    #[test]
    fn translation_rejects_bad_settings() {
        let base = Settings {
            address: Some("192.168.1.20".into()),
            app_key: Some("k".into()),
            ..Settings::default()
        };

        let no_key = Settings {
            app_key: None,
            ..base.clone()
        };
        assert!(matches!(
            settings_to_bridge_config(&no_key),
            Err(ConfigError::NoCredentials)
        ));

        let url_address = Settings {
            address: Some("https://192.168.1.20".into()),
            ..base.clone()
        };
        assert!(matches!(
            settings_to_bridge_config(&url_address),
            Err(ConfigError::Validation { ref field, .. }) if field == "address"
        ));

        let bad_scheme = Settings {
            scheme: "ftp".into(),
            ..base
        };
        assert!(matches!(
            settings_to_bridge_config(&bad_scheme),
            Err(ConfigError::Validation { ref field, .. }) if field == "scheme"
        ));
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let settings = Settings {
            address: Some("hue.local".into()),
            app_key: Some("k".into()),
            ca_cert: Some(PathBuf::from("/etc/hue/ca.pem")),
            ..Settings::default()
        };
        let config = settings_to_bridge_config(&settings).unwrap();
        assert_eq!(config.tls, TlsVerification::CustomCa(PathBuf::from("/etc/hue/ca.pem")));
    }

    #[test]
    fn debug_redacts_app_key() {
        let settings = Settings {
            app_key: Some("super-secret".into()),
            ..Settings::default()
        };
        assert!(!format!("{settings:?}").contains("super-secret"));
    }
}
