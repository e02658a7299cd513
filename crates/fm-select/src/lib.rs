//! `fm-select` — candidate selection for a migrating workload.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`selector`]  | `SelectorParams`, `next_ap`, `is_edge_ap`, server scans      |
//! | [`cost`]      | `LatencyCostModel` trait, `DistanceLoadCost`                 |
//! | [`admission`] | `AdmissionControl` trait, `CapacityAgreement`                |
//!
//! # Determinism
//!
//! Every scan walks the roster in index order and replaces its incumbent
//! only on a strict improvement, so ties always resolve to the lowest index.
//! Nothing here allocates or mutates the topology.

pub mod admission;
pub mod cost;
pub mod selector;


pub use admission::{AdmissionControl, CapacityAgreement};
pub use cost::{DistanceLoadCost, LatencyCostModel};
pub use selector::{
    SelectorParams, closest_other_server, is_edge_ap, local_server, lowest_latency_cost_server,
    nearest_server, next_ap,
};
