// ── Device domain types ──

use serde::{Deserialize, Serialize};
use std::fmt;

use huectl_api::{DeviceResponse, ResourceRef};

use super::resource_id::ResourceId;

/// Device archetype as reported in `metadata.archetype`.
///
/// The bridge knows dozens of archetypes; only the ones the catalog filters
/// on by default get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Archetype {
    BridgeV2,
    SultanBulb,
    Other(String),
}

impl Archetype {
    pub fn as_str(&self) -> &str {
        match self {
            Self::BridgeV2 => "bridge_v2",
            Self::SultanBulb => "sultan_bulb",
            Self::Other(s) => s,
        }
    }

    /// The allow-list a catalog uses when none is configured.
    pub fn defaults() -> Vec<Self> {
        vec![Self::BridgeV2, Self::SultanBulb]
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Archetype {
    fn from(s: &str) -> Self {
        match s {
            "bridge_v2" => Self::BridgeV2,
            "sultan_bulb" => Self::SultanBulb,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Archetype {
    fn from(s: String) -> Self {
        match s.as_str() {
            "bridge_v2" => Self::BridgeV2,
            "sultan_bulb" => Self::SultanBulb,
            _ => Self::Other(s),
        }
    }
}

impl From<Archetype> for String {
    fn from(a: Archetype) -> Self {
        match a {
            Archetype::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// A service hanging off a device, e.g. its `light` or `entertainment` service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub rid: ResourceId,
    pub rtype: String,
}

impl From<&ResourceRef> for ServiceRef {
    fn from(r: &ResourceRef) -> Self {
        Self {
            rid: ResourceId::from(r.rid.as_str()),
            rtype: r.rtype.clone(),
        }
    }
}

/// A device stored in the catalog: the bridge's record plus the archetype
/// it was admitted under.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    pub data: DeviceResponse,
    pub device_type: Archetype,
}

impl Device {
    pub fn new(data: DeviceResponse, device_type: Archetype) -> Self {
        Self { data, device_type }
    }

    pub fn id(&self) -> ResourceId {
        ResourceId::from(self.data.id.as_str())
    }

    pub fn name(&self) -> &str {
        &self.data.metadata.name
    }

    pub fn services(&self) -> impl Iterator<Item = ServiceRef> + '_ {
        self.data.services.iter().map(ServiceRef::from)
    }

    pub fn product_name(&self) -> Option<&str> {
        self.data
            .product_data
            .as_ref()
            .and_then(|p| p.product_name.as_deref())
    }
}

/// Name plus services, kept beside the device list for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    pub name: String,
    pub services: Vec<ServiceRef>,
}

impl From<&Device> for ServiceEntry {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name().to_owned(),
            services: d.services().collect(),
        }
    }
}
