// ── Resource identity ──
//
// CLIP v2 identifies every resource with a UUID, but the bridge never
// promises that, and test fixtures and older bridges hand out other
// strings. `ResourceId` accepts both and prints them back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of any bridge resource (device, light, entertainment
/// configuration, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Uuid(Uuid),
    Opaque(String),
}

impl ResourceId {
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            Self::Opaque(_) => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&str> {
        match self {
            Self::Opaque(s) => Some(s),
            Self::Uuid(_) => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Opaque(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<Uuid> for ResourceId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        // Only canonical (lowercase, hyphenated) UUIDs are promoted so the
        // id always prints back exactly as the bridge sent it.
        match Uuid::parse_str(&s) {
            Ok(u) if u.to_string() == s => Self::Uuid(u),
            _ => Self::Opaque(s),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}
