//! `fm-topology` — the entities a migration decision reads and writes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`zone`]     | `MigrationZone`, `MigPointPolicy`                        |
//! | [`device`]   | `MobileDevice`                                           |
//! | [`entity`]   | `ApDevice`, `Server`, `ServerSpec`                       |
//! | [`topology`] | `Topology` (validated rosters), `TopologyBuilder`        |
//! | [`error`]    | `TopologyError`, `TopologyResult<T>`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod device;
pub mod entity;
pub mod error;
pub mod topology;
pub mod zone;


pub use device::MobileDevice;
pub use entity::{ApDevice, Server, ServerSpec};
pub use error::{TopologyError, TopologyResult};
pub use topology::{Topology, TopologyBuilder};
pub use zone::{MigPointPolicy, MigrationZone};
