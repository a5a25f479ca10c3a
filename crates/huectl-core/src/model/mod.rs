// ── Domain model ──
//
// Typed records validated at the bridge boundary. Everything the catalog
// and the control operations hand out is built from these.

pub mod device;
pub mod entertainment;
pub mod resource_id;

pub use device::{Archetype, Device, ServiceEntry, ServiceRef};
pub use entertainment::EntertainmentConfig;
pub use resource_id::ResourceId;
