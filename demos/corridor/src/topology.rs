//! A five-cell roadside corridor.
//!
//! APs sit every 40 units along the x axis.  Every AP except the middle one
//! has a co-located cloudlet; cloudlets further east are faster, so eastbound
//! traffic has a reason to follow the road.

use fm_core::Coordinate;
use fm_topology::{MigrationZone, ServerSpec, Topology, TopologyBuilder, TopologyResult};

pub const AP_SPACING: f64 = 40.0;
pub const AP_COUNT:   usize = 5;
pub const COVERAGE:   f64 = 25.0;

/// Workloads already running on the fastest cloudlet before the run starts.
const BACKGROUND_LOAD: u32 = 4;

/// Road extent as `(min, max)`, with a margin around the outer APs.
pub fn bounds() -> (Coordinate, Coordinate) {
    let east = AP_SPACING * (AP_COUNT - 1) as f64;
    (Coordinate::new(-20.0, -10.0), Coordinate::new(east + 20.0, 10.0))
}

pub fn build_corridor() -> TopologyResult<Topology> {
    let mut b = TopologyBuilder::new();
    let mut last_server = None;

    for i in 0..AP_COUNT {
        let x = AP_SPACING * i as f64;
        let server = (i != AP_COUNT / 2).then(|| {
            let spec = ServerSpec { base_latency_ms: 40.0 - 8.0 * i as f64, capacity: 6 };
            b.add_server(format!("cloudlet-{i}"), Coordinate::new(x, 5.0), spec)
        });
        last_server = server.or(last_server);
        // Migration points face east.
        b.add_ap(format!("ap-{i}"), Coordinate::new(x, 0.0), COVERAGE, MigrationZone::new(15.0, 0.0), server);
    }
    if let Some(fastest) = last_server {
        b.preload(fastest, BACKGROUND_LOAD);
    }
    b.link_within(AP_SPACING + 1.0);
    b.build()
}
