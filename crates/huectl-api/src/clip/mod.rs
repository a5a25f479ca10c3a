// CLIP v2 API surface
//
// `client` owns transport mechanics; the remaining modules add endpoint
// groups to `ClipClient` as inherent methods.

pub mod client;
pub mod devices;
pub mod entertainment;
pub mod lights;
pub mod models;
pub mod system;

pub use client::{APP_KEY_HEADER, ClipClient};
