//! Access points and edge servers.

use fm_core::{ApId, Coordinate, ServerId};

use crate::MigrationZone;

/// A wireless access point.  Immutable after bootstrap.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApDevice {
    pub id:    ApId,
    pub name:  String,
    pub coord: Coordinate,
    /// Radio coverage radius; used by handoff, not by the decision core.
    pub coverage_radius: f64,
    pub zone: MigrationZone,
    /// Server co-located with this AP.  `None` for APs without edge compute.
    pub server: Option<ServerId>,
    /// Candidate APs for "next AP" discovery, in discovery order.
    pub neighbors: Vec<ApId>,
}

/// An edge server ("cloudlet").
///
/// Load counters are mutated by the driver when workloads arrive or leave;
/// the decision core only reads them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Server {
    pub id:    ServerId,
    pub name:  String,
    pub coord: Coordinate,
    /// Fixed processing/queueing latency, independent of distance.
    pub base_latency_ms: f64,
    /// Workload slots.
    pub capacity: u32,
    /// Workloads currently hosted.
    pub load: u32,
    /// Operator switch: a server that is not accepting refuses every
    /// service agreement regardless of headroom.
    pub accepting: bool,
}

impl Server {
    /// Fraction of capacity in use; `1.0` for a zero-capacity server.
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            1.0
        } else {
            self.load as f64 / self.capacity as f64
        }
    }

    #[inline]
    pub fn has_headroom(&self) -> bool {
        self.load < self.capacity
    }
}

/// Static attributes for [`TopologyBuilder::add_server`][crate::TopologyBuilder::add_server].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerSpec {
    pub base_latency_ms: f64,
    pub capacity:        u32,
}

impl Default for ServerSpec {
    fn default() -> Self {
        Self { base_latency_ms: 5.0, capacity: 16 }
    }
}
