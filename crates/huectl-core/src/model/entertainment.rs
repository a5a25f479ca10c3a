// ── Entertainment configuration domain types ──

use serde::{Deserialize, Serialize};

use huectl_api::EntertainmentConfigurationResponse;

use super::device::ServiceRef;
use super::resource_id::ResourceId;

/// One entertainment configuration, flattened from the bridge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntertainmentConfig {
    pub id: ResourceId,
    pub name: String,
    /// `"active"` while a streaming session runs, `"inactive"` otherwise.
    pub status: String,
    #[serde(rename = "type")]
    pub config_type: String,
    pub light_services: Vec<ServiceRef>,
}

impl EntertainmentConfig {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

impl From<&EntertainmentConfigurationResponse> for EntertainmentConfig {
    fn from(r: &EntertainmentConfigurationResponse) -> Self {
        Self {
            id: ResourceId::from(r.id.as_str()),
            name: r.display_name().to_owned(),
            status: r.status.clone(),
            config_type: r.resource_type.clone(),
            light_services: r.light_services.iter().map(ServiceRef::from).collect(),
        }
    }
}
