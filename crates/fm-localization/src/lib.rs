//! `fm-localization` — where a device stands relative to its access point.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`position`] | `PositionCode`, `classify_position`                       |
//! | [`zone`]     | `LocalizationParams`, `update_zone_and_point`, `localize` |
//!
//! The classifier must run before any policy reads `in_migration_zone` or
//! `at_migration_point`; those flags describe the tick they were computed in
//! and nothing else.

pub mod position;
pub mod zone;


pub use position::{PositionCode, classify_position};
pub use zone::{LocalizationParams, localize, update_zone_and_point};
