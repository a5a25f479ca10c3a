//! Output formatting: table, JSON, YAML, plain.
//!
//! Table uses `tabled`, structured formats go through serde, plain emits
//! one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// `on`/`off` label, green or dimmed.
pub fn power_label(on: Option<bool>, color: bool) -> String {
    match (on, color) {
        (Some(true), true) => "on".green().to_string(),
        (Some(false), true) => "off".dimmed().to_string(),
        (Some(true), false) => "on".into(),
        (Some(false), false) => "off".into(),
        (None, _) => "-".into(),
    }
}

/// Entertainment status, `active` highlighted.
pub fn status_label(status: &str, active: bool, color: bool) -> String {
    if color && active {
        status.cyan().bold().to_string()
    } else {
        status.to_owned()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list in the chosen format. `to_row` feeds the table,
/// `id_fn` the plain format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// Render a single item. Tables use `detail_fn`, a pre-formatted block.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Plain => Ok(id_fn(data)),
        structured => render_structured(structured, data),
    }
}

/// Print rendered output to stdout unless `--quiet`.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: &'static str,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    const ITEMS: [Item; 2] = [
        Item { id: "a1", name: "Lamp" },
        Item { id: "b2", name: "Desk" },
    ];

    fn render(format: OutputFormat) -> String {
        render_list(format, &ITEMS, |i| Row { name: i.name }, |i| i.id.to_owned()).unwrap()
    }

    #[test]
    fn plain_emits_ids() {
        assert_eq!(render(OutputFormat::Plain), "a1\nb2");
    }

    #[test]
    fn table_uses_rows() {
        let out = render(OutputFormat::Table);
        assert!(out.contains("Name"));
        assert!(out.contains("Desk"));
        assert!(!out.contains("a1"));
    }

    #[test]
    fn compact_json_is_one_line() {
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"id":"a1","name":"Lamp"},{"id":"b2","name":"Desk"}]"#
        );
    }

    #[test]
    fn power_label_without_color() {
        assert_eq!(power_label(Some(true), false), "on");
        assert_eq!(power_label(None, true), "-");
    }
}
