// ── Demo animations ──
//
// Loops that repeatedly PUT random or ramped light states. Everything runs
// sequentially: each PUT is awaited before the next one is sent, and the
// optional pause sits between iterations.

use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::bridge::{Bridge, LIGHT_RTYPE};
use crate::command::{LightCommand, LightTarget, LightUpdate, XyColor};
use crate::error::CoreError;
use crate::model::Archetype;

/// Shared knobs for the random loops.
#[derive(Debug, Clone)]
pub struct AnimationOptions {
    /// Which lights take part.
    pub archetype: Archetype,
    pub iterations: u32,
    pub sleep: Option<Duration>,
    /// Explicit device names; overrides `archetype` when set.
    pub names: Option<Vec<String>>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            archetype: Archetype::SultanBulb,
            iterations: 10,
            sleep: None,
            names: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BounceOptions {
    pub animation: AnimationOptions,
    pub increment: f64,
    /// Fixed color sent alongside every brightness step, uncapped.
    pub color: Option<XyColor>,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            animation: AnimationOptions::default(),
            increment: 1.0,
            color: None,
        }
    }
}

/// What a loop did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimationReport {
    pub iterations: u32,
    /// PUTs sent.
    pub updates: u32,
    /// PUTs the bridge did not accept.
    pub rejected: u32,
}

/// Random brightness in `[0, 100)` and a random xy color in `[0, 1)`.
pub fn random_body<R: Rng + ?Sized>(rng: &mut R) -> LightUpdate {
    LightUpdate::default()
        .with_dimming(rng.gen_range(0.0..100.0))
        .with_color(Some(XyColor::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0))))
}

// ── Brightness bounce ────────────────────────────────────────────────

/// Endless brightness ramp between 0 and 100.
///
/// Starts at 1 and climbs by `increment`. Once a step overshoots 99 the
/// direction flips and the downward steps are twice the increment; falling
/// below 0 resets to 0 and starts climbing again.
#[derive(Debug, Clone)]
pub struct BrightnessBounce {
    value: f64,
    increment: f64,
    rising: bool,
}

impl BrightnessBounce {
    pub fn new(increment: f64) -> Self {
        Self {
            value: 1.0,
            increment,
            rising: true,
        }
    }

    fn step(&mut self) {
        if self.value < 100.0 && self.rising {
            self.value += self.increment;
        }
        if self.value > 99.0 {
            self.rising = false;
            self.value -= self.increment;
        }
        if self.value > 0.0 && !self.rising {
            self.value -= self.increment;
        }
        if self.value < 99.0 && !self.rising {
            self.value -= self.increment;
        }
        if self.value < 0.0 {
            self.rising = true;
            self.value = 0.0;
        }
    }
}

impl Iterator for BrightnessBounce {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let current = self.value;
        self.step();
        Some(current)
    }
}

// ── Loops ────────────────────────────────────────────────────────────

/// One random body per iteration, applied to every light by name.
pub async fn random_sync<R: Rng + ?Sized>(
    bridge: &Bridge,
    opts: &AnimationOptions,
    rng: &mut R,
) -> Result<AnimationReport, CoreError> {
    let targets = name_targets(bridge, opts);
    let mut report = AnimationReport::default();

    for _ in 0..opts.iterations {
        let command = LightCommand::Update(random_body(rng));
        for target in &targets {
            apply(bridge, target, &command, &mut report).await?;
        }
        finish_iteration(&mut report, opts.sleep).await;
    }
    Ok(report)
}

/// A fresh random body per light per iteration, by name.
pub async fn random_lights<R: Rng + ?Sized>(
    bridge: &Bridge,
    opts: &AnimationOptions,
    rng: &mut R,
) -> Result<AnimationReport, CoreError> {
    let targets = name_targets(bridge, opts);
    random_each(bridge, &targets, opts, rng).await
}

/// Like [`random_lights`], with names resolved to light ids once up front.
pub async fn random_lights_by_rid<R: Rng + ?Sized>(
    bridge: &Bridge,
    opts: &AnimationOptions,
    rng: &mut R,
) -> Result<AnimationReport, CoreError> {
    let targets = rid_targets(bridge, opts)?;
    random_each(bridge, &targets, opts, rng).await
}

/// Ramps brightness up and down on every light, by id.
pub async fn bounce_brightness(bridge: &Bridge, opts: &BounceOptions) -> Result<AnimationReport, CoreError> {
    let targets = rid_targets(bridge, &opts.animation)?;
    let mut report = AnimationReport::default();
    let iterations = usize::try_from(opts.animation.iterations).unwrap_or(usize::MAX);
    let steps = BrightnessBounce::new(opts.increment).take(iterations);

    for brightness in steps {
        let mut update = LightUpdate::dimming(brightness);
        if let Some(xy) = opts.color {
            update = update.with_exact_color(xy);
        }
        let command = LightCommand::Update(update);
        debug!(brightness, "bounce step");
        for target in &targets {
            apply(bridge, target, &command, &mut report).await?;
        }
        finish_iteration(&mut report, opts.animation.sleep).await;
    }
    Ok(report)
}

async fn random_each<R: Rng + ?Sized>(
    bridge: &Bridge,
    targets: &[LightTarget],
    opts: &AnimationOptions,
    rng: &mut R,
) -> Result<AnimationReport, CoreError> {
    let mut report = AnimationReport::default();
    for _ in 0..opts.iterations {
        for target in targets {
            let command = LightCommand::Update(random_body(rng));
            apply(bridge, target, &command, &mut report).await?;
        }
        finish_iteration(&mut report, opts.sleep).await;
    }
    Ok(report)
}

// ── Helpers ──────────────────────────────────────────────────────────

fn participant_names(bridge: &Bridge, opts: &AnimationOptions) -> Vec<String> {
    match &opts.names {
        Some(names) => names.clone(),
        None => bridge.catalog().fetch_names_of_type(opts.archetype.as_str()),
    }
}

fn name_targets(bridge: &Bridge, opts: &AnimationOptions) -> Vec<LightTarget> {
    participant_names(bridge, opts)
        .into_iter()
        .map(LightTarget::Name)
        .collect()
}

fn rid_targets(bridge: &Bridge, opts: &AnimationOptions) -> Result<Vec<LightTarget>, CoreError> {
    let names = participant_names(bridge, opts);
    let rids = bridge.catalog().names_to_rids(&names, LIGHT_RTYPE)?;
    Ok(rids.into_iter().map(LightTarget::Rid).collect())
}

/// Sends one PUT. Rejections and unresolvable names are logged and
/// counted; transport and auth failures end the loop.
async fn apply(
    bridge: &Bridge,
    target: &LightTarget,
    command: &LightCommand,
    report: &mut AnimationReport,
) -> Result<(), CoreError> {
    match bridge.light(target, command).await {
        Ok(resp) => {
            report.updates += 1;
            if !resp.is_ok() {
                report.rejected += 1;
                warn!(?target, status = resp.status, errors = %resp.error_summary(), "light update not applied");
            }
            Ok(())
        }
        Err(CoreError::Api { status, message }) => {
            report.updates += 1;
            report.rejected += 1;
            warn!(?target, status, %message, "light update rejected");
            Ok(())
        }
        Err(e @ (CoreError::AmbiguousName { .. }
        | CoreError::DeviceNotFound { .. }
        | CoreError::ServiceNotFound { .. })) => {
            warn!(?target, error = %e, "skipping light");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

async fn finish_iteration(report: &mut AnimationReport, sleep: Option<Duration>) {
    report.iterations += 1;
    if let Some(pause) = sleep.filter(|d| !d.is_zero()) {
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bounce_reproduces_stepping() {
        let values: Vec<f64> = BrightnessBounce::new(10.0).take(17).collect();
        let expected = [
            1.0, 11.0, 21.0, 31.0, 41.0, 51.0, 61.0, 71.0, 81.0, 91.0, 71.0, 51.0, 31.0, 11.0, 0.0,
            10.0, 20.0,
        ];
        assert_eq!(values, expected);
    }

    #[test]
    fn bounce_with_unit_increment_turns_at_the_top() {
        let values: Vec<f64> = BrightnessBounce::new(1.0).skip(97).take(6).collect();
        assert_eq!(values, [98.0, 99.0, 97.0, 95.0, 93.0, 91.0]);
    }

    #[test]
    fn bounce_stays_in_range() {
        for inc in [1.0, 3.0, 7.5, 10.0, 33.0] {
            assert!(
                BrightnessBounce::new(inc)
                    .take(500)
                    .all(|v| (0.0..=100.0).contains(&v)),
                "increment {inc}"
            );
        }
    }

    #[test]
    fn random_body_is_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let body = random_body(&mut rng);
            let brightness = body.dimming.unwrap().brightness;
            let xy = body.color.unwrap().xy;
            assert!((0.0..100.0).contains(&brightness));
            assert!((0.0..1.0).contains(&xy.x));
            assert!((0.0..1.0).contains(&xy.y));
            assert!(body.on.is_none());
        }
    }
}
