//! Glue between the global flags and `huectl-config`.
//!
//! Flags win over the file and the environment layers `load_settings`
//! already merged.

use huectl_config::{Settings, load_settings, resolve_config_path, settings_to_bridge_config};
use huectl_core::BridgeConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Merged settings with `--address`, `--app-key` and `--timeout` applied.
pub fn effective_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = load_settings(global.config.as_deref())?;
    if let Some(ref address) = global.address {
        settings.address = Some(address.clone());
    }
    if let Some(ref key) = global.app_key {
        settings.app_key = Some(key.clone());
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
    Ok(settings)
}

pub fn build_bridge_config(global: &GlobalOpts) -> Result<BridgeConfig, CliError> {
    let settings = effective_settings(global)?;
    if settings.address.is_none() {
        return Err(CliError::NoConfig {
            path: resolve_config_path(global.config.as_deref())
                .display()
                .to_string(),
        });
    }
    Ok(settings_to_bridge_config(&settings)?)
}
