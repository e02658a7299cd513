//! `fm-sim` — a minimal tick driver for the migration engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Move     — advance every device along its heading; hand off to the
//!                nearest covering AP.
//!   ② Decide   — in ascending DeviceId order, call
//!                DecisionPolicy::should_migrate once per device.
//!   ③ Migrate  — on approval, move the workload's load unit to the
//!                destination server and re-point the device.
//! ```
//!
//! Evaluation is strictly sequential: a migration approved for device *n*
//! is visible (as server load) to device *n + 1* in the same tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_policy::{MigrationConfig, PolicyKind, build_engine};
//! use fm_sim::{LinearMobility, MigrationSimBuilder, NoopObserver};
//!
//! let engine = build_engine(PolicyKind::LowestLatency, &MigrationConfig::default())?;
//! let mut sim = MigrationSimBuilder::new(config, topology, engine, LinearMobility::default())
//!     .devices(devices)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod mobility;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::MigrationSimBuilder;
pub use error::{SimError, SimResult};
pub use mobility::{LinearMobility, MobilityModel};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::MigrationSim;
