// ── Bridge facade ──
//
// Owns the CLIP client and the current catalog. Control operations resolve
// their target against the catalog, shape the body and issue one PUT each.
// The catalog is only replaced by an explicit `refresh()`.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::{debug, info, warn};

use huectl_api::{
    BridgeConfigResponse, ClipClient, ClipResponse, LightResponse, ResourceRef,
};

use crate::catalog::Catalog;
use crate::command::{
    EntertainmentAction, EntertainmentActionRequest, EntertainmentTarget, LightCommand,
    LightTarget, XyColor,
};
use crate::config::BridgeConfig;
use crate::error::CoreError;
use crate::model::ResourceId;

/// `rtype` of the service a light command is sent to.
pub const LIGHT_RTYPE: &str = "light";

pub struct Bridge {
    client: ClipClient,
    config: BridgeConfig,
    catalog: ArcSwap<Catalog>,
}

impl Bridge {
    /// Builds the HTTP client without contacting the bridge. The catalog
    /// starts empty until [`refresh`](Self::refresh) runs.
    pub fn new(config: BridgeConfig) -> Result<Self, CoreError> {
        let client = ClipClient::new(config.endpoint(), &config.app_key, &config.transport())?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: ClipClient, config: BridgeConfig) -> Self {
        Self {
            client,
            config,
            catalog: ArcSwap::from_pointee(Catalog::default()),
        }
    }

    /// Builds the client and loads the initial catalog.
    pub async fn connect(config: BridgeConfig) -> Result<Self, CoreError> {
        let bridge = Self::new(config)?;
        bridge.refresh().await?;
        Ok(bridge)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn client(&self) -> &ClipClient {
        &self.client
    }

    /// The catalog as of the last refresh.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Re-reads devices and entertainment configurations and swaps in a
    /// new catalog.
    ///
    /// A failing device listing aborts the refresh and keeps the old
    /// catalog. A failing entertainment listing only logs a warning and
    /// leaves the configurations empty, unless the bridge was unreachable.
    pub async fn refresh(&self) -> Result<Arc<Catalog>, CoreError> {
        let devices = self.client.list_devices().await?;
        if !devices.errors.is_empty() {
            warn!(status = devices.status, errors = %devices.error_summary(), "device listing reported errors");
        }

        let entertainment = match self.client.list_entertainment_configurations().await {
            Ok(resp) => resp.data,
            Err(e) if e.is_transport() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "entertainment configurations unavailable");
                Vec::new()
            }
        };

        let catalog = Arc::new(Catalog::from_snapshot(
            &devices.data,
            &entertainment,
            &self.config.archetypes,
        ));
        info!(
            devices = catalog.devices().len(),
            entertainment = catalog.entertainment_configs().len(),
            "catalog refreshed"
        );
        self.catalog.store(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Bridge identity and firmware versions from the legacy config endpoint.
    pub async fn software_version(&self) -> Result<BridgeConfigResponse, CoreError> {
        Ok(self.client.bridge_config().await?)
    }

    // ── Lights ───────────────────────────────────────────────────────

    pub async fn lights(&self) -> Result<Vec<LightResponse>, CoreError> {
        Ok(self.client.list_lights().await?.data)
    }

    /// Current state of one light; `None` when the bridge answers 404.
    pub async fn light_info(&self, target: &LightTarget) -> Result<Option<LightResponse>, CoreError> {
        let rid = self.resolve_light(target)?;
        let resp = self.client.get_light(&rid.to_string()).await?;
        Ok(resp.data.into_iter().next())
    }

    /// Turns a target into the light service id to PUT to.
    pub fn resolve_light(&self, target: &LightTarget) -> Result<ResourceId, CoreError> {
        match target {
            LightTarget::Rid(rid) => Ok(rid.clone()),
            LightTarget::Name(name) => Ok(self.catalog.load().resolve_rid(name, LIGHT_RTYPE)?.rid),
        }
    }

    /// Applies a light command to one target.
    pub async fn light(
        &self,
        target: &LightTarget,
        command: &LightCommand,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        let rid = self.resolve_light(target)?;
        let body = command.body();
        debug!(%rid, %body, "light command");
        self.put_light(&rid, &body).await
    }

    /// PUTs `body` unchanged.
    pub async fn light_body(
        &self,
        target: &LightTarget,
        body: &serde_json::Value,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        let rid = self.resolve_light(target)?;
        self.put_light(&rid, body).await
    }

    pub async fn light_state(
        &self,
        target: &LightTarget,
        on: bool,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        self.light(target, &LightCommand::Power(on)).await
    }

    pub async fn light_dimming(
        &self,
        target: &LightTarget,
        brightness: f64,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        self.light(target, &LightCommand::Dimming(brightness)).await
    }

    pub async fn light_temperature(
        &self,
        target: &LightTarget,
        mirek: i64,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        self.light(target, &LightCommand::Temperature(mirek)).await
    }

    pub async fn light_color(
        &self,
        target: &LightTarget,
        xy: Option<XyColor>,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        self.light(target, &LightCommand::Color(xy)).await
    }

    async fn put_light(
        &self,
        rid: &ResourceId,
        body: &(impl Serialize + Sync),
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        Ok(self.client.update_light(&rid.to_string(), body).await?)
    }

    // ── Entertainment ────────────────────────────────────────────────

    pub fn resolve_entertainment(&self, target: &EntertainmentTarget) -> Result<ResourceId, CoreError> {
        match target {
            EntertainmentTarget::Id(id) => Ok(id.clone()),
            EntertainmentTarget::Name(name) => self
                .catalog
                .load()
                .entertainment_id(name)
                .ok_or_else(|| CoreError::EntertainmentNotFound { name: name.clone() }),
        }
    }

    /// Starts or stops a streaming session.
    pub async fn entertainment_action(
        &self,
        target: &EntertainmentTarget,
        action: EntertainmentAction,
    ) -> Result<ClipResponse<ResourceRef>, CoreError> {
        let id = self.resolve_entertainment(target)?;
        debug!(%id, %action, "entertainment action");
        let body = EntertainmentActionRequest { action };
        Ok(self
            .client
            .update_entertainment_configuration(&id.to_string(), &body)
            .await?)
    }
}
