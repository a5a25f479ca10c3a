// CLIP v2 wire types
//
// Every CLIP endpoint wraps its payload in `{ "errors": [...], "data": [...] }`.
// Fields use `#[serde(default)]` liberally and keep unknown keys in `extra`
// because the bridge grows new fields with every firmware release.

use serde::{Deserialize, Serialize};

// ── Response envelope ────────────────────────────────────────────────

/// Raw CLIP envelope as it arrives on the wire.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ClipEnvelope<T> {
    #[serde(default)]
    pub errors: Vec<ClipErrorEntry>,
    #[serde(default)]
    pub data: Vec<T>,
}

/// One entry of the envelope's `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipErrorEntry {
    #[serde(default)]
    pub description: String,
}

/// A decoded CLIP answer that the client classified as valid
/// (HTTP 200 or 404). Callers inspect `status` and `errors` themselves.
#[derive(Debug, Clone, Serialize)]
pub struct ClipResponse<T> {
    pub status: u16,
    pub errors: Vec<ClipErrorEntry>,
    pub data: Vec<T>,
}

impl<T> ClipResponse<T> {
    pub(crate) fn from_envelope(status: u16, envelope: ClipEnvelope<T>) -> Self {
        Self {
            status,
            errors: envelope.errors,
            data: envelope.data,
        }
    }

    pub(crate) fn empty(status: u16) -> Self {
        Self {
            status,
            errors: Vec::new(),
            data: Vec::new(),
        }
    }

    /// 200 with no reported errors.
    pub fn is_ok(&self) -> bool {
        self.status == 200 && self.errors.is_empty()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// All error descriptions joined with `"; "`.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ── Shared ───────────────────────────────────────────────────────────

/// Reference to another bridge resource: `{ "rid": "...", "rtype": "light" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub rid: String,
    pub rtype: String,
}

// ── Device ───────────────────────────────────────────────────────────

/// A device from `GET resource/device`.
///
/// Only the fields the client acts on are modeled; everything else is
/// preserved in `extra` so the record serializes back to the raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_v1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_data: Option<ProductData>,
    pub metadata: DeviceMetadata,
    #[serde(default)]
    pub services: Vec<ResourceRef>,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMetadata {
    pub name: String,
    pub archetype: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_archetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Light ────────────────────────────────────────────────────────────

/// A light service from `GET resource/light`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LightMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<OnState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimming: Option<DimmingState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_temperature: Option<ColorTemperatureState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorState>,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub archetype: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnState {
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimmingState {
    pub brightness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemperatureState {
    #[serde(default)]
    pub mirek: Option<u16>,
    #[serde(default)]
    pub mirek_valid: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorState {
    pub xy: XyPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

// ── Entertainment configuration ──────────────────────────────────────

/// An entry of `GET resource/entertainment_configuration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntertainmentConfigurationResponse {
    pub id: String,
    /// Older firmware reports the name at top level; newer firmware moves
    /// it under `metadata.name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NameMetadata>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_type: Option<String>,
    #[serde(default)]
    pub light_services: Vec<ResourceRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EntertainmentConfigurationResponse {
    /// The configuration's name, preferring the top-level field.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.metadata.as_ref().map(|m| m.name.as_str()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMetadata {
    #[serde(default)]
    pub name: String,
}

// ── Bridge config (legacy, unauthenticated) ──────────────────────────

/// `GET /api/config`: bridge identity and firmware versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfigResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub swversion: Option<String>,
    #[serde(default)]
    pub apiversion: Option<String>,
    #[serde(default)]
    pub datastoreversion: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub bridgeid: Option<String>,
    #[serde(default)]
    pub modelid: Option<String>,
    #[serde(default)]
    pub factorynew: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn device_round_trips_unknown_fields() {
        let raw = json!({
            "id": "3f1d6c8a-0000-4000-8000-000000000001",
            "metadata": { "name": "Lamp", "archetype": "sultan_bulb" },
            "services": [{ "rid": "abc123", "rtype": "light" }],
            "type": "device",
            "identify": {}
        });
        let dev: DeviceResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(dev.metadata.archetype, "sultan_bulb");
        assert_eq!(dev.services[0].rtype, "light");
        assert!(dev.extra.contains_key("identify"));
        assert_eq!(serde_json::to_value(&dev).unwrap(), raw);
    }

    #[test]
    fn device_without_metadata_is_rejected() {
        let raw = json!({ "id": "x", "services": [] });
        assert!(serde_json::from_value::<DeviceResponse>(raw).is_err());
    }

    #[test]
    fn envelope_fields_default_to_empty() {
        let env: ClipEnvelope<ResourceRef> = serde_json::from_str("{}").unwrap();
        assert!(env.errors.is_empty());
        assert!(env.data.is_empty());
    }

    #[test]
    fn envelope_decodes_items_without_default() {
        let raw = json!({
            "errors": [{ "description": "partial failure" }],
            "data": [
                { "rid": "abc123", "rtype": "light" },
                { "rid": "def456", "rtype": "light" }
            ]
        });
        let env: ClipEnvelope<ResourceRef> = serde_json::from_value(raw).unwrap();
        assert_eq!(env.errors.len(), 1);
        assert_eq!(env.data[1].rid, "def456");

        let lights: ClipEnvelope<LightResponse> =
            serde_json::from_value(json!({ "data": [{ "id": "l1", "type": "light" }] })).unwrap();
        assert!(lights.errors.is_empty());
        assert_eq!(lights.data[0].id, "l1");
    }

    #[test]
    fn entertainment_name_falls_back_to_metadata() {
        let raw = json!({
            "id": "e1",
            "metadata": { "name": "Movie night" },
            "status": "inactive",
            "type": "entertainment_configuration"
        });
        let ent: EntertainmentConfigurationResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(ent.display_name(), "Movie night");
        assert!(ent.light_services.is_empty());
    }

    #[test]
    fn error_summary_joins_descriptions() {
        let resp: ClipResponse<ResourceRef> = ClipResponse {
            status: 404,
            errors: vec![
                ClipErrorEntry {
                    description: "not found".into(),
                },
                ClipErrorEntry {
                    description: "try again".into(),
                },
            ],
            data: vec![],
        };
        assert!(resp.is_not_found());
        assert!(!resp.is_ok());
        assert_eq!(resp.error_summary(), "not found; try again");
    }
}
