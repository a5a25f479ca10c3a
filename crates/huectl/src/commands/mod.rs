//! Command dispatch.
//!
//! Commands that look things up by name, and entertainment listing, need
//! the catalog, so the bridge is connected (devices and entertainment
//! listed) before they run. The rest only build the client.

pub mod config_cmd;
pub mod demo;
pub mod devices;
pub mod entertainment;
pub mod light;
pub mod lights;
pub mod system;
pub mod util;

use huectl_core::{Bridge, BridgeConfig};

use crate::cli::{
    Command, EntertainmentCommand, GlobalOpts, LightCommand, LightTargetArgs, LightsCommand,
};
use crate::error::CliError;

pub async fn dispatch(
    cmd: Command,
    config: BridgeConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bridge = if needs_catalog(&cmd) {
        Bridge::connect(config).await?
    } else {
        Bridge::new(config)?
    };

    match cmd {
        Command::Devices(args) => devices::handle(&bridge, args, global),
        Command::Lights(args) => lights::handle(&bridge, args, global).await,
        Command::Light(args) => light::handle(&bridge, args, global).await,
        Command::Entertainment(args) => entertainment::handle(&bridge, args, global).await,
        Command::Demo(args) => demo::handle(&bridge, args, global).await,
        Command::System(args) => system::handle(&bridge, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a bridge".into(),
        )),
    }
}

fn needs_catalog(cmd: &Command) -> bool {
    let by_name = |target: &LightTargetArgs| target.rid.is_none();
    match cmd {
        Command::Devices(_) | Command::Demo(_) => true,
        Command::Entertainment(args) => match &args.command {
            EntertainmentCommand::List => true,
            EntertainmentCommand::Start(target) | EntertainmentCommand::Stop(target) => {
                target.id.is_none()
            }
        },
        Command::Lights(args) => match &args.command {
            LightsCommand::List => false,
            LightsCommand::Get(target) => by_name(target),
        },
        Command::Light(args) => match &args.command {
            LightCommand::On(target)
            | LightCommand::Off(target)
            | LightCommand::Dim { target, .. }
            | LightCommand::Temp { target, .. }
            | LightCommand::Color { target, .. }
            | LightCommand::Set { target, .. } => by_name(target),
        },
        Command::System(_) | Command::Config(_) | Command::Completions(_) => false,
    }
}
