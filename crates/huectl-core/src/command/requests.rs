// ── Typed light-update payloads ──
//
// Every PUT to `resource/light/<rid>` that the crate shapes itself goes
// through `LightUpdate`. Only the fields that were set are serialized, so
// `LightUpdate::power(true)` becomes exactly `{"on":{"on":true}}`.

use serde::{Deserialize, Serialize};

pub const BRIGHTNESS_MIN: f64 = 0.0;
pub const BRIGHTNESS_MAX: f64 = 100.0;

/// Coldest white the bulbs render (6500 K).
pub const MIREK_MIN: u16 = 153;
/// Warmest white the bulbs render (2000 K).
pub const MIREK_MAX: u16 = 500;

pub const XY_MAX: f64 = 1.0;

/// Fallback color when a color change is requested without coordinates.
pub const DEFAULT_XY: XyColor = XyColor { x: 0.1, y: 0.1 };

/// A point on the CIE 1931 chromaticity diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyColor {
    pub x: f64,
    pub y: f64,
}

impl XyColor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Caps each component at 1. Values below 0 are left alone, the bridge
    /// rejects them itself.
    pub fn capped(self) -> Self {
        Self {
            x: cap_xy(self.x),
            y: cap_xy(self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimming {
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemperature {
    pub mirek: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub xy: XyColor,
}

/// Body of a light PUT.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<Power>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimming: Option<Dimming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<ColorTemperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl LightUpdate {
    pub fn power(on: bool) -> Self {
        Self::default().with_power(on)
    }

    pub fn dimming(brightness: f64) -> Self {
        Self::default().with_dimming(brightness)
    }

    pub fn color_temperature(mirek: i64) -> Self {
        Self::default().with_color_temperature(mirek)
    }

    pub fn color(xy: Option<XyColor>) -> Self {
        Self::default().with_color(xy)
    }

    #[must_use]
    pub fn with_power(mut self, on: bool) -> Self {
        self.on = Some(Power { on });
        self
    }

    /// Brightness in percent, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_dimming(mut self, brightness: f64) -> Self {
        self.dimming = Some(Dimming {
            brightness: clamp_brightness(brightness),
        });
        self
    }

    /// Color temperature in mirek, clamped to `[153, 500]`.
    #[must_use]
    pub fn with_color_temperature(mut self, mirek: i64) -> Self {
        self.color_temperature = Some(ColorTemperature {
            mirek: clamp_mirek(mirek),
        });
        self
    }

    /// `None` selects [`DEFAULT_XY`].
    #[must_use]
    pub fn with_color(mut self, xy: Option<XyColor>) -> Self {
        let xy = xy.map_or(DEFAULT_XY, XyColor::capped);
        self.color = Some(Color { xy });
        self
    }

    /// Sets the color as given, without capping.
    #[must_use]
    pub fn with_exact_color(mut self, xy: XyColor) -> Self {
        self.color = Some(Color { xy });
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Clamping ─────────────────────────────────────────────────────────

pub fn clamp_brightness(v: f64) -> f64 {
    if v > BRIGHTNESS_MAX {
        BRIGHTNESS_MAX
    } else if v < BRIGHTNESS_MIN {
        BRIGHTNESS_MIN
    } else {
        v
    }
}

pub fn clamp_mirek(v: i64) -> u16 {
    let clamped = v.clamp(i64::from(MIREK_MIN), i64::from(MIREK_MAX));
    u16::try_from(clamped).unwrap_or(MIREK_MAX)
}

fn cap_xy(v: f64) -> f64 {
    if v > XY_MAX { XY_MAX } else { v }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn power_serializes_only_on() {
        let body = serde_json::to_value(LightUpdate::power(true)).unwrap();
        assert_eq!(body, json!({ "on": { "on": true } }));
    }

    #[test]
    fn dimming_is_clamped_both_ways() {
        for (input, expected) in [(-5.0, 0.0), (0.0, 0.0), (42.5, 42.5), (100.0, 100.0), (250.0, 100.0)] {
            let body = serde_json::to_value(LightUpdate::dimming(input)).unwrap();
            assert_eq!(body, json!({ "dimming": { "brightness": expected } }), "input {input}");
        }
    }

    #[test]
    fn mirek_is_clamped_both_ways() {
        assert_eq!(clamp_mirek(0), 153);
        assert_eq!(clamp_mirek(-40), 153);
        assert_eq!(clamp_mirek(366), 366);
        assert_eq!(clamp_mirek(9000), 500);
        let body = serde_json::to_value(LightUpdate::color_temperature(600)).unwrap();
        assert_eq!(body, json!({ "color_temperature": { "mirek": 500 } }));
    }

    #[test]
    fn xy_has_upper_bound_only() {
        let xy = XyColor::new(1.7, -0.3).capped();
        assert_eq!(xy.x, 1.0);
        assert_eq!(xy.y, -0.3);
    }

    #[test]
    fn exact_color_skips_the_cap() {
        let update = LightUpdate::default().with_exact_color(XyColor::new(1.5, 0.2));
        let body = serde_json::to_value(update).unwrap();
        assert_eq!(body, json!({ "color": { "xy": { "x": 1.5, "y": 0.2 } } }));
    }

    #[test]
    fn missing_color_defaults_to_point_one() {
        let body = serde_json::to_value(LightUpdate::color(None)).unwrap();
        assert_eq!(body, json!({ "color": { "xy": { "x": 0.1, "y": 0.1 } } }));
    }

    #[test]
    fn combined_update_carries_every_field() {
        let update = LightUpdate::default()
            .with_dimming(55.0)
            .with_color(Some(XyColor::new(0.4, 0.1)));
        let body = serde_json::to_value(update).unwrap();
        assert_eq!(
            body,
            json!({
                "dimming": { "brightness": 55.0 },
                "color": { "xy": { "x": 0.4, "y": 0.1 } }
            })
        );
        assert!(!update.is_empty());
        assert!(LightUpdate::default().is_empty());
    }
}
