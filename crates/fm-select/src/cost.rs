//! Latency cost models.

use fm_topology::{MobileDevice, Server};

/// Estimated latency cost of hosting `device`'s workload on `server`.
///
/// Lower is better.  A non-finite cost marks the server as unusable for this
/// device.  Implementations must be pure: the selector may call them any
/// number of times per evaluation.
pub trait LatencyCostModel: Send + Sync + 'static {
    fn cost(&self, server: &Server, device: &MobileDevice) -> f64;
}

impl<T: LatencyCostModel + ?Sized> LatencyCostModel for Box<T> {
    fn cost(&self, server: &Server, device: &MobileDevice) -> f64 {
        (**self).cost(server, device)
    }
}

/// `base_latency_ms + distance_weight · distance + load_weight · load / capacity`.
///
/// A zero-capacity server costs `+∞`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DistanceLoadCost {
    /// Milliseconds per distance unit between device and server.
    pub distance_weight: f64,
    /// Milliseconds added at full utilisation.
    pub load_weight: f64,
}

impl Default for DistanceLoadCost {
    fn default() -> Self {
        Self { distance_weight: 0.5, load_weight: 10.0 }
    }
}

impl LatencyCostModel for DistanceLoadCost {
    fn cost(&self, server: &Server, device: &MobileDevice) -> f64 {
        if server.capacity == 0 {
            return f64::INFINITY;
        }
        let dist = server.coord.distance(device.coord);
        server.base_latency_ms + self.distance_weight * dist + self.load_weight * server.utilization()
    }
}
