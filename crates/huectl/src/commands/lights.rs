//! Light state queries.

use tabled::Tabled;

use huectl_core::{Bridge, LightResponse};

use crate::cli::{GlobalOpts, LightsArgs, LightsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Brightness")]
    brightness: String,
    #[tabled(rename = "Mirek")]
    mirek: String,
    #[tabled(rename = "XY")]
    xy: String,
}

impl LightRow {
    fn new(l: &LightResponse, color: bool) -> Self {
        Self {
            id: l.id.clone(),
            name: light_name(l).to_owned(),
            state: output::power_label(l.on.map(|o| o.on), color),
            brightness: l
                .dimming
                .map_or_else(|| "-".into(), |d| format!("{:.1}", d.brightness)),
            mirek: l
                .color_temperature
                .and_then(|c| c.mirek)
                .map_or_else(|| "-".into(), |m| m.to_string()),
            xy: l
                .color
                .map_or_else(|| "-".into(), |c| format!("{:.4}, {:.4}", c.xy.x, c.xy.y)),
        }
    }
}

fn light_name(l: &LightResponse) -> &str {
    l.metadata.as_ref().map_or("-", |m| m.name.as_str())
}

fn detail(l: &LightResponse, color: bool) -> String {
    let row = LightRow::new(l, color);
    let mut lines = vec![
        format!("ID:         {}", row.id),
        format!("Name:       {}", row.name),
        format!("State:      {}", row.state),
        format!("Brightness: {}", row.brightness),
        format!("Mirek:      {}", row.mirek),
        format!("XY:         {}", row.xy),
    ];
    if let Some(ref owner) = l.owner {
        lines.push(format!("Owner:      {} ({})", owner.rid, owner.rtype));
    }
    lines.join("\n")
}

pub async fn handle(bridge: &Bridge, args: LightsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        LightsCommand::List => {
            let lights = bridge.lights().await?;
            let out = output::render_list(
                global.output,
                &lights,
                |l| LightRow::new(l, color),
                |l| l.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LightsCommand::Get(target_args) => {
            let target = util::light_target(&target_args)?;
            let light = bridge.light_info(&target).await?.ok_or_else(|| {
                CliError::light_not_found(target_args.rid.or(target_args.name).unwrap_or_default())
            })?;
            let out = output::render_single(
                global.output,
                &light,
                |l| detail(l, color),
                |l| l.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
