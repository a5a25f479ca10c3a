// ── Command API ──
//
// Every write against the bridge is expressed as a target plus a command.
// `Bridge::light` resolves the target, shapes the body and issues the PUT.

pub mod requests;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::ResourceId;

pub use requests::{DEFAULT_XY, LightUpdate, MIREK_MAX, MIREK_MIN, XyColor};

/// Which light a command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightTarget {
    /// A light service id, used verbatim.
    Rid(ResourceId),
    /// A device name, resolved to its `light` service through the catalog.
    Name(String),
}

impl LightTarget {
    /// Builds a target from optional CLI-style arguments; a rid wins over a name.
    pub fn from_parts(rid: Option<&str>, name: Option<&str>) -> Option<Self> {
        match (rid, name) {
            (Some(rid), _) => Some(Self::Rid(ResourceId::from(rid))),
            (None, Some(name)) => Some(Self::Name(name.to_owned())),
            (None, None) => None,
        }
    }
}

/// A light state change.
#[derive(Debug, Clone, PartialEq)]
pub enum LightCommand {
    Power(bool),
    /// Brightness percentage; clamped to `[0, 100]`.
    Dimming(f64),
    /// Mirek; clamped to `[153, 500]`.
    Temperature(i64),
    /// `None` falls back to [`DEFAULT_XY`].
    Color(Option<XyColor>),
    /// Several fields at once, already clamped by [`LightUpdate`].
    Update(LightUpdate),
    /// Sent verbatim without any clamping.
    Raw(serde_json::Value),
}

impl LightCommand {
    /// The JSON body this command PUTs.
    pub fn body(&self) -> serde_json::Value {
        let update = match self {
            Self::Raw(value) => return value.clone(),
            Self::Power(on) => LightUpdate::power(*on),
            Self::Dimming(v) => LightUpdate::dimming(*v),
            Self::Temperature(m) => LightUpdate::color_temperature(*m),
            Self::Color(xy) => LightUpdate::color(*xy),
            Self::Update(u) => *u,
        };
        serde_json::to_value(update).unwrap_or_default()
    }
}

/// Which entertainment configuration to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntertainmentTarget {
    Id(ResourceId),
    Name(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntertainmentAction {
    Start,
    Stop,
}

impl EntertainmentAction {
    /// `Some(true)` starts a session; `Some(false)` and `None` stop it.
    pub fn from_flag(flag: Option<bool>) -> Self {
        if flag == Some(true) {
            Self::Start
        } else {
            Self::Stop
        }
    }
}

/// Body of an entertainment configuration PUT: `{"action": "start"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntertainmentActionRequest {
    pub action: EntertainmentAction,
}
