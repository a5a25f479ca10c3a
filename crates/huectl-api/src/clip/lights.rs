// CLIP light endpoints

use serde::Serialize;
use tracing::debug;

use crate::clip::client::ClipClient;
use crate::clip::models::{ClipResponse, LightResponse, ResourceRef};
use crate::error::Error;

impl ClipClient {
    /// List every light service.
    ///
    /// `GET resource/light`
    pub async fn list_lights(&self) -> Result<ClipResponse<LightResponse>, Error> {
        let url = self.resource_url("light")?;
        debug!("listing lights");
        self.get(url).await
    }

    /// Fetch a single light service.
    ///
    /// `GET resource/light/{rid}`
    pub async fn get_light(&self, rid: &str) -> Result<ClipResponse<LightResponse>, Error> {
        let url = self.resource_item_url("light", rid)?;
        debug!(rid, "fetching light");
        self.get(url).await
    }

    /// Change light state.
    ///
    /// `PUT resource/light/{rid}` with the body sent verbatim.
    pub async fn update_light(
        &self,
        rid: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<ClipResponse<ResourceRef>, Error> {
        debug!(rid, "updating light");
        self.put_resource("light", rid, body).await
    }
}
