// CLIP device endpoints

use tracing::debug;

use crate::clip::client::ClipClient;
use crate::clip::models::{ClipResponse, DeviceResponse};
use crate::error::Error;

impl ClipClient {
    /// List every device known to the bridge.
    ///
    /// `GET resource/device`
    pub async fn list_devices(&self) -> Result<ClipResponse<DeviceResponse>, Error> {
        let url = self.resource_url("device")?;
        debug!("listing devices");
        self.get(url).await
    }
}
