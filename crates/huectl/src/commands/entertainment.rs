//! Entertainment configuration listing and streaming control.

use tabled::Tabled;

use huectl_core::{Bridge, EntertainmentAction, EntertainmentConfig, EntertainmentTarget};

use crate::cli::{EntertainmentArgs, EntertainmentCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct EntertainmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Lights")]
    lights: usize,
}

pub async fn handle(
    bridge: &Bridge,
    args: EntertainmentArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (target_args, action) = match args.command {
        EntertainmentCommand::List => {
            let color = output::should_color(global.color);
            let catalog = bridge.catalog();
            let out = output::render_list(
                global.output,
                catalog.entertainment_configs(),
                |c: &EntertainmentConfig| EntertainmentRow {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                    status: output::status_label(&c.status, c.is_active(), color),
                    lights: c.light_services.len(),
                },
                |c| c.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        EntertainmentCommand::Start(t) => (t, EntertainmentAction::from_flag(Some(true))),
        EntertainmentCommand::Stop(t) => (t, EntertainmentAction::from_flag(Some(false))),
    };

    let target = util::entertainment_target(&target_args)?;
    let resp = bridge.entertainment_action(&target, action).await?;

    let identifier = match target {
        EntertainmentTarget::Id(id) => id.to_string(),
        EntertainmentTarget::Name(name) => name,
    };
    util::report_update(&resp, "entertainment configuration", &identifier, global)
}
