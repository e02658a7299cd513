//! Next-AP discovery and server scans.

use fm_core::{ApId, ServerId, angle_between_deg};
use fm_topology::{ApDevice, MobileDevice, Server, Topology};

use crate::LatencyCostModel;

/// A candidate AP counts as "ahead" when its bearing from the device is
/// strictly less than this many degrees off the device heading.
const AHEAD_DEG: f64 = 90.0;

/// Limits applied while ranking candidates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorParams {
    /// Neighbour APs farther than this from the device are not candidates.
    pub max_handoff_distance: f64,
    /// Servers whose latency cost exceeds this are ineligible.
    pub max_latency_cost: f64,
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self { max_handoff_distance: 100.0, max_latency_cost: 1_000.0 }
    }
}

/// The neighbour of the device's source AP that the device is heading for.
///
/// Candidates lie ahead of the device and within
/// [`max_handoff_distance`](SelectorParams::max_handoff_distance).  Among
/// them the smallest angular deviation wins, then the smaller distance, then
/// the lowest index.  `None` if the source AP is unknown or nothing qualifies.
pub fn next_ap(topology: &Topology, device: &MobileDevice, params: &SelectorParams) -> Option<ApId> {
    let source = topology.ap(device.source_ap)?;

    let mut best: Option<(ApId, f64, f64)> = None;
    for &id in &source.neighbors {
        let Some(ap) = topology.ap(id) else { continue };
        let dist = device.coord.distance(ap.coord);
        if dist > params.max_handoff_distance {
            continue;
        }
        // Standing on the candidate counts as dead ahead.
        let deviation = device
            .coord
            .bearing_to(ap.coord)
            .map_or(0.0, |b| angle_between_deg(b, device.direction));
        if deviation >= AHEAD_DEG {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_id, best_dev, best_dist)) => {
                (deviation, dist, id) < (best_dev, best_dist, best_id)
            }
        };
        if better {
            best = Some((id, deviation, dist));
        }
    }
    best.map(|(id, _, _)| id)
}

/// `true` when moving to `candidate` would change the hosting server.
///
/// An AP without a co-located server is an edge AP for a device that has
/// one, and vice versa.
#[inline]
pub fn is_edge_ap(candidate: &ApDevice, device: &MobileDevice) -> bool {
    candidate.server != device.current_server
}

/// The server with the lowest latency cost for `device`.
///
/// Servers with a non-finite cost, or a cost above
/// [`max_latency_cost`](SelectorParams::max_latency_cost), are skipped.
/// Ties go to the lowest index.
pub fn lowest_latency_cost_server<C>(
    topology:   &Topology,
    device:     &MobileDevice,
    cost_model: &C,
    params:     &SelectorParams,
) -> Option<ServerId>
where
    C: LatencyCostModel + ?Sized,
{
    let mut best: Option<(ServerId, f64)> = None;
    for server in topology.servers() {
        let cost = cost_model.cost(server, device);
        if !cost.is_finite() || cost > params.max_latency_cost {
            continue;
        }
        match best {
            Some((_, best_cost)) if best_cost <= cost => {}
            _ => best = Some((server.id, cost)),
        }
    }
    best.map(|(id, _)| id)
}

/// The server physically closest to the device, optionally skipping the one
/// it is currently using.  Ties go to the lowest index.
pub fn nearest_server(topology: &Topology, device: &MobileDevice, exclude_current: bool) -> Option<ServerId> {
    nearest_where(topology, device, |s| !(exclude_current && Some(s.id) == device.current_server))
        .map(|(s, _)| s.id)
}

/// The server currently hosting the device's workload and its distance.
pub fn local_server<'t>(topology: &'t Topology, device: &MobileDevice) -> Option<(&'t Server, f64)> {
    let server = topology.server(device.current_server?)?;
    Some((server, server.coord.distance(device.coord)))
}

/// The closest server other than the local one, with its distance.
pub fn closest_other_server<'t>(topology: &'t Topology, device: &MobileDevice) -> Option<(&'t Server, f64)> {
    nearest_where(topology, device, |s| Some(s.id) != device.current_server)
}

fn nearest_where<'t>(
    topology: &'t Topology,
    device:   &MobileDevice,
    keep:     impl Fn(&Server) -> bool,
) -> Option<(&'t Server, f64)> {
    let mut best: Option<(&Server, f64)> = None;
    for server in topology.servers().iter().filter(|s| keep(s)) {
        let dist = server.coord.distance(device.coord);
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((server, dist)),
        }
    }
    best
}
