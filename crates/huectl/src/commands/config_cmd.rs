//! Config subcommand handlers. These never contact the bridge.

use std::path::PathBuf;

use serde::Serialize;

use huectl_config::{Settings, resolve_config_path};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::effective_settings;
use crate::error::CliError;
use crate::output;

/// Settings as shown to the user, application key masked.
#[derive(Debug, Serialize)]
struct SettingsView {
    source: Option<PathBuf>,
    address: Option<String>,
    app_key: Option<&'static str>,
    scheme: String,
    api_root: String,
    timeout: u64,
    archetypes: Vec<String>,
    tls: String,
}

impl From<Settings> for SettingsView {
    fn from(s: Settings) -> Self {
        let tls = match (&s.ca_cert, s.verify_tls) {
            (Some(ca), _) => format!("custom CA {}", ca.display()),
            (None, true) => "system roots".to_owned(),
            (None, false) => "accept invalid certificates".to_owned(),
        };
        Self {
            source: s.source,
            address: s.address,
            app_key: s.app_key.map(|_| "****"),
            scheme: s.scheme,
            api_root: s.api_root,
            timeout: s.timeout,
            archetypes: s.archetypes,
            tls,
        }
    }
}

fn detail(v: &SettingsView) -> String {
    let or_unset = |o: Option<&str>| o.unwrap_or("(unset)").to_owned();
    let source = v
        .source
        .as_ref()
        .map_or_else(|| "(none, environment only)".to_owned(), |p| p.display().to_string());
    [
        format!("source:     {source}"),
        format!("address:    {}", or_unset(v.address.as_deref())),
        format!("app_key:    {}", or_unset(v.app_key)),
        format!("scheme:     {}", v.scheme),
        format!("api_root:   {}", v.api_root),
        format!("timeout:    {}s", v.timeout),
        format!("archetypes: {}", v.archetypes.join(", ")),
        format!("tls:        {}", v.tls),
    ]
    .join("\n")
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let view = SettingsView::from(effective_settings(global)?);
            let out = output::render_single(global.output, &view, detail, |v| {
                v.address.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            let path = resolve_config_path(global.config.as_deref());
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_masks_the_key() {
        let settings = Settings {
            address: Some("10.0.0.2".into()),
            app_key: Some("super-secret".into()),
            ..Settings::default()
        };
        let text = detail(&SettingsView::from(settings));
        assert!(text.contains("app_key:    ****"));
        assert!(!text.contains("super-secret"));
        assert!(text.contains("accept invalid certificates"));
    }
}
