//! Single-light control: power, brightness, temperature, color, raw body.

use huectl_core::{Bridge, LightTarget};

use crate::cli::{GlobalOpts, LightArgs, LightCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(bridge: &Bridge, args: LightArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (target, resp) = match args.command {
        LightCommand::On(t) => {
            let target = util::light_target(&t)?;
            let resp = bridge.light_state(&target, true).await?;
            (target, resp)
        }
        LightCommand::Off(t) => {
            let target = util::light_target(&t)?;
            let resp = bridge.light_state(&target, false).await?;
            (target, resp)
        }
        LightCommand::Dim { target, brightness } => {
            let target = util::light_target(&target)?;
            let resp = bridge.light_dimming(&target, brightness).await?;
            (target, resp)
        }
        LightCommand::Temp { target, mirek } => {
            let target = util::light_target(&target)?;
            let resp = bridge.light_temperature(&target, mirek).await?;
            (target, resp)
        }
        LightCommand::Color { target, xy } => {
            let target = util::light_target(&target)?;
            let resp = bridge.light_color(&target, util::xy(&xy)).await?;
            (target, resp)
        }
        LightCommand::Set { target, body } => {
            let target = util::light_target(&target)?;
            let body = util::read_body(&body)?;
            let resp = bridge.light_body(&target, &body).await?;
            (target, resp)
        }
    };

    let identifier = match target {
        LightTarget::Rid(rid) => rid.to_string(),
        LightTarget::Name(name) => name,
    };
    util::report_update(&resp, "light", &identifier, global)
}
