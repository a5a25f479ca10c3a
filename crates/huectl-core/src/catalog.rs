// ── Device catalog ──
//
// Flat, immutable snapshot of the bridge's devices and entertainment
// configurations. Lookups are linear scans; a household has tens of
// devices, not thousands. `Bridge::refresh` replaces the whole catalog
// instead of mutating it.

use tracing::debug;

use huectl_api::{DeviceResponse, EntertainmentConfigurationResponse};

use crate::error::CoreError;
use crate::model::{Archetype, Device, EntertainmentConfig, ResourceId, ServiceEntry, ServiceRef};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    devices: Vec<Device>,
    services: Vec<ServiceEntry>,
    entertainment: Vec<EntertainmentConfig>,
}

impl Catalog {
    /// Builds a catalog from raw bridge listings.
    ///
    /// Devices are admitted when their archetype is in `archetypes` and are
    /// grouped in allow-list order; within a group they keep the order the
    /// bridge returned them in.
    pub fn from_snapshot(
        devices: &[DeviceResponse],
        entertainment: &[EntertainmentConfigurationResponse],
        archetypes: &[Archetype],
    ) -> Self {
        let mut stored = Vec::new();
        for archetype in archetypes {
            for item in devices {
                if item.metadata.archetype == archetype.as_str() {
                    stored.push(Device::new(item.clone(), archetype.clone()));
                }
            }
        }

        let services = stored.iter().map(ServiceEntry::from).collect();
        let entertainment = entertainment.iter().map(EntertainmentConfig::from).collect();

        debug!(
            total = devices.len(),
            admitted = stored.len(),
            "catalog built from snapshot"
        );

        Self {
            devices: stored,
            services,
            entertainment,
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    pub fn entertainment_configs(&self) -> &[EntertainmentConfig] {
        &self.entertainment
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Names of every stored device of the given archetype, in catalog order.
    pub fn fetch_names_of_type(&self, archetype: &str) -> Vec<String> {
        self.devices
            .iter()
            .filter(|d| d.device_type.as_str() == archetype)
            .map(|d| d.name().to_owned())
            .collect()
    }

    /// First stored device with this exact name.
    pub fn device_by_name(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    pub fn device_details_by_name(&self, name: &str) -> Option<&DeviceResponse> {
        self.device_by_name(name).map(|d| &d.data)
    }

    /// The last service of type `rtype` across every device named `name`.
    pub fn device_rid(&self, name: &str, rtype: &str) -> Option<ServiceRef> {
        self.devices
            .iter()
            .filter(|d| d.name() == name)
            .flat_map(Device::services)
            .filter(|s| s.rtype == rtype)
            .last()
    }

    /// Strict variant of [`device_rid`](Self::device_rid) for control
    /// operations: the name must match exactly one device.
    pub fn resolve_rid(&self, name: &str, rtype: &str) -> Result<ServiceRef, CoreError> {
        let mut matches = self.devices.iter().filter(|d| d.name() == name);
        let Some(device) = matches.next() else {
            return Err(CoreError::DeviceNotFound {
                name: name.to_owned(),
            });
        };
        let others = matches.count();
        if others > 0 {
            return Err(CoreError::AmbiguousName {
                name: name.to_owned(),
                count: others + 1,
            });
        }

        device
            .services()
            .filter(|s| s.rtype == rtype)
            .last()
            .ok_or_else(|| CoreError::ServiceNotFound {
                name: name.to_owned(),
                rtype: rtype.to_owned(),
            })
    }

    /// Converts names to service ids with [`device_rid`](Self::device_rid)
    /// semantics. Fails on the first name that yields nothing.
    pub fn names_to_rids(&self, names: &[String], rtype: &str) -> Result<Vec<ResourceId>, CoreError> {
        names
            .iter()
            .map(|name| {
                self.device_rid(name, rtype).map(|s| s.rid).ok_or_else(|| {
                    if self.device_by_name(name).is_some() {
                        CoreError::ServiceNotFound {
                            name: name.clone(),
                            rtype: rtype.to_owned(),
                        }
                    } else {
                        CoreError::DeviceNotFound { name: name.clone() }
                    }
                })
            })
            .collect()
    }

    /// Id of the last entertainment configuration named `name`.
    pub fn entertainment_id(&self, name: &str) -> Option<ResourceId> {
        self.entertainment
            .iter()
            .rev()
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn device(id: &str, name: &str, archetype: &str, services: serde_json::Value) -> DeviceResponse {
        serde_json::from_value(json!({
            "id": id,
            "metadata": { "name": name, "archetype": archetype },
            "services": services,
            "type": "device"
        }))
        .unwrap()
    }

    fn entertainment(id: &str, name: &str) -> EntertainmentConfigurationResponse {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "status": "inactive",
            "type": "entertainment_configuration",
            "light_services": []
        }))
        .unwrap()
    }

    fn catalog(devices: &[DeviceResponse]) -> Catalog {
        Catalog::from_snapshot(devices, &[], &Archetype::defaults())
    }

    #[test]
    fn one_bridge_two_bulbs_yields_three_entries() {
        let devices = [
            device("d1", "Hue Bridge", "bridge_v2", json!([{ "rid": "b1", "rtype": "bridge" }])),
            device("d2", "Lamp", "sultan_bulb", json!([{ "rid": "l1", "rtype": "light" }])),
            device("d3", "Desk", "sultan_bulb", json!([{ "rid": "l2", "rtype": "light" }])),
        ];
        let cat = catalog(&devices);

        assert_eq!(cat.devices().len(), 3);
        assert_eq!(cat.services().len(), 3);
        let names: Vec<_> = cat.services().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Hue Bridge", "Lamp", "Desk"]);
    }

    #[test]
    fn devices_are_grouped_by_allow_list_order() {
        let devices = [
            device("d2", "Lamp", "sultan_bulb", json!([])),
            device("d9", "Strip", "hue_lightstrip", json!([])),
            device("d1", "Hue Bridge", "bridge_v2", json!([])),
            device("d3", "Desk", "sultan_bulb", json!([])),
        ];
        let cat = catalog(&devices);

        let ids: Vec<_> = cat.devices().iter().map(|d| d.data.id.as_str()).collect();
        assert_eq!(ids, ["d1", "d2", "d3"]);
    }

    #[test]
    fn names_of_missing_type_is_empty() {
        let cat = catalog(&[device("d1", "Hue Bridge", "bridge_v2", json!([]))]);
        assert!(cat.fetch_names_of_type("sultan_bulb").is_empty());
        assert_eq!(cat.fetch_names_of_type("bridge_v2"), vec!["Hue Bridge".to_string()]);
    }

    #[test]
    fn device_rid_returns_last_matching_service() {
        let cat = catalog(&[device(
            "d2",
            "Lamp",
            "sultan_bulb",
            json!([
                { "rid": "first", "rtype": "light" },
                { "rid": "zb", "rtype": "zigbee_connectivity" },
                { "rid": "second", "rtype": "light" }
            ]),
        )]);

        let svc = cat.device_rid("Lamp", "light").unwrap();
        assert_eq!(svc.rid.to_string(), "second");
        assert!(cat.device_rid("Lamp", "motion").is_none());
        assert!(cat.device_rid("lamp", "light").is_none());
    }

    #[test]
    fn details_by_name_returns_first_match() {
        let cat = catalog(&[
            device("d2", "Lamp", "sultan_bulb", json!([])),
            device("d3", "Lamp", "sultan_bulb", json!([])),
        ]);
        assert_eq!(cat.device_details_by_name("Lamp").unwrap().id, "d2");
        assert!(cat.device_details_by_name("Nope").is_none());
    }

    #[test]
    fn resolve_rid_distinguishes_failures() {
        let cat = catalog(&[
            device("d1", "Hue Bridge", "bridge_v2", json!([{ "rid": "b1", "rtype": "bridge" }])),
            device("d2", "Lamp", "sultan_bulb", json!([{ "rid": "l1", "rtype": "light" }])),
            device("d3", "Twin", "sultan_bulb", json!([{ "rid": "l2", "rtype": "light" }])),
            device("d4", "Twin", "sultan_bulb", json!([{ "rid": "l3", "rtype": "light" }])),
        ]);

        assert_eq!(cat.resolve_rid("Lamp", "light").unwrap().rid.to_string(), "l1");
        assert!(matches!(
            cat.resolve_rid("Nope", "light"),
            Err(CoreError::DeviceNotFound { .. })
        ));
        assert!(matches!(
            cat.resolve_rid("Hue Bridge", "light"),
            Err(CoreError::ServiceNotFound { .. })
        ));
        assert!(matches!(
            cat.resolve_rid("Twin", "light"),
            Err(CoreError::AmbiguousName { count: 2, .. })
        ));
        // The lenient lookup still answers for duplicated names.
        assert_eq!(cat.device_rid("Twin", "light").unwrap().rid.to_string(), "l3");
    }

    #[test]
    fn names_to_rids_reports_the_missing_name() {
        let cat = catalog(&[device("d2", "Lamp", "sultan_bulb", json!([{ "rid": "l1", "rtype": "light" }]))]);

        let rids = cat.names_to_rids(&["Lamp".into()], "light").unwrap();
        assert_eq!(rids, vec![ResourceId::from("l1")]);

        let err = cat.names_to_rids(&["Lamp".into(), "Ghost".into()], "light").unwrap_err();
        assert!(matches!(err, CoreError::DeviceNotFound { ref name } if name == "Ghost"));
    }

    #[test]
    fn entertainment_id_returns_last_match() {
        let cat = Catalog::from_snapshot(
            &[],
            &[entertainment("e1", "Test"), entertainment("e2", "Other"), entertainment("e3", "Test")],
            &Archetype::defaults(),
        );
        assert_eq!(cat.entertainment_configs().len(), 3);
        assert_eq!(cat.entertainment_id("Test"), Some(ResourceId::from("e3")));
        assert_eq!(cat.entertainment_id("Missing"), None);
    }

    #[test]
    fn custom_allow_list_admits_other_archetypes() {
        let devices = [
            device("d2", "Lamp", "sultan_bulb", json!([])),
            device("d9", "Strip", "hue_lightstrip", json!([])),
        ];
        let cat = Catalog::from_snapshot(&devices, &[], &[Archetype::from("hue_lightstrip")]);
        assert_eq!(cat.fetch_names_of_type("hue_lightstrip"), vec!["Strip".to_string()]);
        assert!(cat.device_by_name("Lamp").is_none());
    }
}
