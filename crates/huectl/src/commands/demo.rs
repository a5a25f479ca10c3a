//! Demo animation handlers.

use rand::SeedableRng;
use rand::rngs::StdRng;

use huectl_core::animation::{self, AnimationOptions, AnimationReport, BounceOptions};
use huectl_core::{Archetype, Bridge};

use crate::cli::{AnimationArgs, DemoArgs, DemoCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn options(args: AnimationArgs) -> AnimationOptions {
    AnimationOptions {
        archetype: Archetype::from(args.archetype),
        iterations: args.iterations,
        sleep: args.sleep,
        names: (!args.names.is_empty()).then_some(args.names),
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

pub async fn handle(bridge: &Bridge, args: DemoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let report = match args.command {
        DemoCommand::RandomSync(a) => {
            let opts = options(a.animation);
            animation::random_sync(bridge, &opts, &mut rng(a.seed)).await?
        }
        DemoCommand::RandomLights(a) => {
            let opts = options(a.animation);
            animation::random_lights(bridge, &opts, &mut rng(a.seed)).await?
        }
        DemoCommand::RandomByRid(a) => {
            let opts = options(a.animation);
            animation::random_lights_by_rid(bridge, &opts, &mut rng(a.seed)).await?
        }
        DemoCommand::Bounce(a) => {
            if !(a.increment.is_finite() && a.increment > 0.0) {
                return Err(CliError::Validation {
                    field: "increment".into(),
                    reason: format!("must be a positive number, got {}", a.increment),
                });
            }
            let opts = BounceOptions {
                color: util::xy(&a.xy),
                increment: a.increment,
                animation: options(a.animation),
            };
            animation::bounce_brightness(bridge, &opts).await?
        }
    };

    let out = output::render_single(
        global.output,
        &report,
        |r: &AnimationReport| {
            format!(
                "{} iterations, {} updates sent, {} rejected",
                r.iterations, r.updates, r.rejected
            )
        },
        |r| r.updates.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
