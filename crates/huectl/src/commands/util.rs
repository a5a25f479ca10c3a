//! Shared helpers for command handlers.

use std::path::Path;

use huectl_core::{ClipResponse, EntertainmentTarget, LightTarget, ResourceId, ResourceRef, XyColor};

use crate::cli::{BodyArgs, EntertainmentTargetArgs, GlobalOpts, LightTargetArgs, XyArgs};
use crate::error::CliError;
use crate::output;

pub fn light_target(args: &LightTargetArgs) -> Result<LightTarget, CliError> {
    LightTarget::from_parts(args.rid.as_deref(), args.name.as_deref()).ok_or_else(|| {
        CliError::Validation {
            field: "target".into(),
            reason: "pass a device name or --rid".into(),
        }
    })
}

pub fn entertainment_target(args: &EntertainmentTargetArgs) -> Result<EntertainmentTarget, CliError> {
    match (&args.id, &args.name) {
        (Some(id), _) => Ok(EntertainmentTarget::Id(ResourceId::from(id.clone()))),
        (None, Some(name)) => Ok(EntertainmentTarget::Name(name.clone())),
        (None, None) => Err(CliError::Validation {
            field: "target".into(),
            reason: "pass a configuration name or --id".into(),
        }),
    }
}

/// `None` when neither coordinate was given; clap enforces both-or-neither.
pub fn xy(args: &XyArgs) -> Option<XyColor> {
    match (args.x, args.y) {
        (Some(x), Some(y)) => Some(XyColor::new(x, y)),
        _ => None,
    }
}

pub fn read_body(args: &BodyArgs) -> Result<serde_json::Value, CliError> {
    match (&args.body, &args.from_file) {
        (Some(inline), _) => parse_json(inline, "body"),
        (None, Some(path)) => read_json_file(path),
        (None, None) => Err(CliError::Validation {
            field: "body".into(),
            reason: "pass --body or --from-file".into(),
        }),
    }
}

pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    parse_json(&contents, "from-file")
}

fn parse_json(text: &str, field: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("invalid JSON: {e}"),
    })?;
    if !value.is_object() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: "expected a JSON object".into(),
        });
    }
    Ok(value)
}

/// Prints the outcome of a PUT. A 404 becomes a not-found error, other
/// bridge-reported errors are shown but do not fail the command.
pub fn report_update(
    resp: &ClipResponse<ResourceRef>,
    what: &str,
    identifier: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if resp.is_not_found() {
        return Err(CliError::NotFound {
            resource_type: what.into(),
            identifier: identifier.into(),
            list_command: if what == "light" {
                "lights list".into()
            } else {
                "entertainment list".into()
            },
        });
    }
    if !resp.errors.is_empty() && !global.quiet {
        eprintln!("warning: bridge reported: {}", resp.error_summary());
    }

    let out = output::render_single(
        global.output,
        resp,
        |r| {
            let rids: Vec<&str> = r.data.iter().map(|d| d.rid.as_str()).collect();
            if rids.is_empty() {
                format!("{what} {identifier}: HTTP {}", r.status)
            } else {
                format!("{what} {} updated", rids.join(", "))
            }
        },
        |r| {
            r.data
                .iter()
                .map(|d| d.rid.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn body_must_be_an_object() {
        let args = BodyArgs {
            body: Some("[1, 2]".into()),
            from_file: None,
        };
        assert!(matches!(read_body(&args), Err(CliError::Validation { .. })));
    }

    #[test]
    fn body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"on": {"on": false}}"#).unwrap();
        let args = BodyArgs {
            body: None,
            from_file: Some(path),
        };
        assert_eq!(read_body(&args).unwrap()["on"]["on"], false);
    }

    #[test]
    fn rid_wins_over_name() {
        let args = LightTargetArgs {
            name: Some("Lamp".into()),
            rid: Some("abc123".into()),
        };
        assert!(matches!(light_target(&args).unwrap(), LightTarget::Rid(_)));
    }

    #[test]
    fn xy_needs_both_coordinates() {
        assert!(xy(&XyArgs { x: Some(0.3), y: None }).is_none());
        let c = xy(&XyArgs { x: Some(0.3), y: Some(1.4) }).unwrap();
        assert!((c.y - 1.4).abs() < f64::EPSILON);
    }
}
