// Bridge identity endpoint
//
// `/api/config` predates CLIP v2 and answers without an application key.

use tracing::debug;

use crate::clip::client::ClipClient;
use crate::clip::models::BridgeConfigResponse;
use crate::error::Error;

impl ClipClient {
    /// Bridge name, firmware and API versions.
    ///
    /// `GET {scheme}://{address}/api/config` (unauthenticated)
    pub async fn bridge_config(&self) -> Result<BridgeConfigResponse, Error> {
        let url = self.endpoint().config_url()?;
        debug!("GET {}", url);

        let resp = self.http().get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("bridge config request failed: HTTP {status}"),
            });
        }
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
