//! `fm-core` — foundational types for the `fogmig` migration engine.
//!
//! This crate is a dependency of every other `fm-*` crate.  It has no `fm-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `DeviceId`, `ApId`, `ServerId`                        |
//! | [`geo`]   | `Coordinate`, bearing and heading helpers             |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`error`] | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult, ensure_finite};
pub use geo::{Coordinate, angle_between_deg, normalize_deg};
pub use ids::{ApId, DeviceId, ServerId};
pub use time::{SimClock, SimConfig, Tick};
