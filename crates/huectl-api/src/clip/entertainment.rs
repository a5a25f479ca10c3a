// CLIP entertainment configuration endpoints

use serde::Serialize;
use tracing::debug;

use crate::clip::client::ClipClient;
use crate::clip::models::{ClipResponse, EntertainmentConfigurationResponse, ResourceRef};
use crate::error::Error;

impl ClipClient {
    /// List entertainment configurations (synchronized lighting areas).
    ///
    /// `GET resource/entertainment_configuration`
    pub async fn list_entertainment_configurations(
        &self,
    ) -> Result<ClipResponse<EntertainmentConfigurationResponse>, Error> {
        let url = self.resource_url("entertainment_configuration")?;
        debug!("listing entertainment configurations");
        self.get(url).await
    }

    /// Update an entertainment configuration, typically `{"action": "start"}`.
    ///
    /// `PUT resource/entertainment_configuration/{id}`
    pub async fn update_entertainment_configuration(
        &self,
        id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<ClipResponse<ResourceRef>, Error> {
        debug!(id, "updating entertainment configuration");
        self.put_resource("entertainment_configuration", id, body)
            .await
    }
}
