use huectl_core::{Bridge, BridgeConfigResponse};

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand};
use crate::error::CliError;
use crate::output;

fn detail(c: &BridgeConfigResponse) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
    [
        format!("Name:       {}", field(&c.name)),
        format!("Bridge ID:  {}", field(&c.bridgeid)),
        format!("Model:      {}", field(&c.modelid)),
        format!("MAC:        {}", field(&c.mac)),
        format!("Software:   {}", field(&c.swversion)),
        format!("API:        {}", field(&c.apiversion)),
        format!("Datastore:  {}", field(&c.datastoreversion)),
    ]
    .join("\n")
}

pub async fn handle(bridge: &Bridge, args: SystemArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SystemCommand::Version => {
            let info = bridge.software_version().await?;
            let out = output::render_single(global.output, &info, detail, |c| {
                c.swversion.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
