//! Domain layer between `huectl-api` and the `huectl` CLI.
//!
//! - **[`Bridge`]**: facade owning the CLIP client and the current
//!   [`Catalog`]. [`connect()`](Bridge::connect) loads the first snapshot,
//!   [`refresh()`](Bridge::refresh) swaps in a new one. Light and
//!   entertainment control resolve their targets against the catalog.
//!
//! - **[`Catalog`]**: immutable device and entertainment lists with
//!   name-to-id lookup.
//!
//! - **Commands** ([`command`]): light targets, clamped light payloads and
//!   entertainment actions.
//!
//! - **Animations** ([`animation`]): demo loops built on the above.

pub mod animation;
pub mod bridge;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use animation::{AnimationOptions, AnimationReport, BounceOptions, BrightnessBounce};
pub use bridge::Bridge;
pub use catalog::Catalog;
pub use command::{
    EntertainmentAction, EntertainmentTarget, LightCommand, LightTarget, LightUpdate, XyColor,
};
pub use config::{BridgeConfig, TlsVerification};
pub use error::CoreError;
pub use model::{Archetype, Device, EntertainmentConfig, ResourceId, ServiceEntry, ServiceRef};

// Wire types the CLI renders directly.
pub use huectl_api::{BridgeConfigResponse, ClipResponse, LightResponse, ResourceRef};
