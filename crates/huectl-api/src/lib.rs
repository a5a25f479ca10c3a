// huectl-api: Async Rust client for the Hue bridge local API (CLIP v2)

pub mod clip;
pub mod endpoint;
pub mod error;
pub mod transport;

pub use clip::ClipClient;
pub use clip::models::{
    BridgeConfigResponse, ClipErrorEntry, ClipResponse, DeviceMetadata, DeviceResponse,
    EntertainmentConfigurationResponse, LightResponse, ProductData, ResourceRef,
};
pub use endpoint::BridgeEndpoint;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
