//! The validated AP/server roster and its builder.

use std::collections::HashSet;

use fm_core::{ApId, Coordinate, ServerId, ensure_finite};

use crate::{ApDevice, MigrationZone, MobileDevice, Server, ServerSpec, TopologyError, TopologyResult};

// ── Topology ──────────────────────────────────────────────────────────────────

/// Ordered rosters of access points and edge servers.
///
/// Roster order is significant: ids are positions, and every selector breaks
/// ties by lowest index, so the same topology always yields the same
/// decisions.  AP data is immutable after construction; server load counters
/// may be changed through [`server_mut`](Self::server_mut) and
/// [`move_workload`](Self::move_workload).
///
/// Construct with [`TopologyBuilder`] or [`Topology::new`]; both validate.
#[derive(Clone, Debug)]
pub struct Topology {
    aps:     Vec<ApDevice>,
    servers: Vec<Server>,
}

impl Topology {
    /// Validate and wrap pre-built rosters.
    ///
    /// # Errors
    ///
    /// Rejects mismatched ids, dangling server or neighbour references,
    /// self-neighbours, duplicate names, and non-positive or non-finite
    /// geometry.
    pub fn new(aps: Vec<ApDevice>, servers: Vec<Server>) -> TopologyResult<Self> {
        let mut names = HashSet::new();
        for (i, s) in servers.iter().enumerate() {
            if s.id.index() != i {
                return Err(TopologyError::IdMismatch { kind: "server", position: i, id: s.id.0 });
            }
            check_coord(s.coord)?;
            ensure_finite("server base latency", s.base_latency_ms)?;
            if !names.insert(s.name.as_str()) {
                return Err(TopologyError::DuplicateName { kind: "server", name: s.name.clone() });
            }
        }

        let mut names = HashSet::new();
        for (i, ap) in aps.iter().enumerate() {
            if ap.id.index() != i {
                return Err(TopologyError::IdMismatch { kind: "AP", position: i, id: ap.id.0 });
            }
            check_coord(ap.coord)?;
            check_positive("coverage radius", &ap.name, ap.coverage_radius)?;
            check_positive("migration zone radius", &ap.name, ap.zone.radius)?;
            ensure_finite("migration point angle", ap.zone.point_angle_deg)?;
            if let Some(server) = ap.server {
                if server.index() >= servers.len() {
                    return Err(TopologyError::DanglingServer { ap: ap.id, server });
                }
            }
            for &n in &ap.neighbors {
                if n == ap.id {
                    return Err(TopologyError::SelfNeighbor(ap.id));
                }
                if n.index() >= aps.len() {
                    return Err(TopologyError::DanglingNeighbor { ap: ap.id, neighbor: n });
                }
            }
            if !names.insert(ap.name.as_str()) {
                return Err(TopologyError::DuplicateName { kind: "AP", name: ap.name.clone() });
            }
        }

        Ok(Self { aps, servers })
    }

    // ── Roster access ─────────────────────────────────────────────────────

    pub fn aps(&self) -> &[ApDevice] {
        &self.aps
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    #[inline]
    pub fn ap(&self, id: ApId) -> Option<&ApDevice> {
        self.aps.get(id.index())
    }

    #[inline]
    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id.index())
    }

    pub fn server_mut(&mut self, id: ServerId) -> Option<&mut Server> {
        self.servers.get_mut(id.index())
    }

    pub fn ap_count(&self) -> usize {
        self.aps.len()
    }

    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    // ── Device checks ─────────────────────────────────────────────────────

    /// Check a device's references and kinematics against this topology.
    ///
    /// Call once when a device joins the run; policies assume it held.
    pub fn validate_device(&self, device: &MobileDevice) -> TopologyResult<()> {
        let invalid = |reason: String| TopologyError::InvalidDevice { device: device.id, reason };

        if self.ap(device.source_ap).is_none() {
            return Err(invalid(format!("source AP {} does not exist", device.source_ap)));
        }
        if let Some(server) = device.current_server {
            if self.server(server).is_none() {
                return Err(invalid(format!("current server {server} does not exist")));
            }
        }
        if !device.coord.x.is_finite() || !device.coord.y.is_finite() {
            return Err(invalid(format!("position {} is not finite", device.coord)));
        }
        if !device.speed.is_finite() || device.speed < 0.0 {
            return Err(invalid(format!("speed {} must be finite and non-negative", device.speed)));
        }
        if !device.direction.is_finite() {
            return Err(invalid(format!("direction {} is not finite", device.direction)));
        }
        Ok(())
    }

    // ── Driver helpers ────────────────────────────────────────────────────

    /// The AP whose coverage contains `coord` and whose centre is closest.
    /// Ties go to the lowest index.
    pub fn nearest_covering_ap(&self, coord: Coordinate) -> Option<ApId> {
        let mut best: Option<(ApId, f64)> = None;
        for ap in &self.aps {
            let d = ap.coord.distance(coord);
            if d > ap.coverage_radius {
                continue;
            }
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((ap.id, d)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Move one workload's load unit from `from` (if any) to `to`.
    pub fn move_workload(&mut self, from: Option<ServerId>, to: ServerId) -> TopologyResult<()> {
        if self.server(to).is_none() {
            return Err(TopologyError::UnknownServer(to));
        }
        if let Some(from) = from {
            let src = self.server_mut(from).ok_or(TopologyError::UnknownServer(from))?;
            src.load = src.load.saturating_sub(1);
        }
        if let Some(dst) = self.server_mut(to) {
            dst.load += 1;
        }
        Ok(())
    }
}

fn check_coord(c: Coordinate) -> TopologyResult<()> {
    ensure_finite("x coordinate", c.x)?;
    ensure_finite("y coordinate", c.y)?;
    Ok(())
}

fn check_positive(what: &'static str, name: &str, value: f64) -> TopologyResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TopologyError::InvalidGeometry { what, name: name.to_owned(), value })
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use fm_core::Coordinate;
/// use fm_topology::{MigrationZone, ServerSpec, TopologyBuilder};
///
/// let mut b = TopologyBuilder::new();
/// let s0 = b.add_server("cloudlet-0", Coordinate::new(0.0, 0.0), ServerSpec::default());
/// let s1 = b.add_server("cloudlet-1", Coordinate::new(20.0, 0.0), ServerSpec::default());
/// let a0 = b.add_ap("ap-0", Coordinate::new(0.0, 0.0), 15.0, MigrationZone::new(10.0, 0.0), Some(s0));
/// let a1 = b.add_ap("ap-1", Coordinate::new(20.0, 0.0), 15.0, MigrationZone::new(10.0, 180.0), Some(s1));
/// b.link(a0, a1);
/// let topo = b.build().unwrap();
/// assert_eq!(topo.ap_count(), 2);
/// assert_eq!(topo.ap(a0).unwrap().neighbors, vec![a1]);
/// ```
#[derive(Default)]
pub struct TopologyBuilder {
    aps:     Vec<ApDevice>,
    servers: Vec<Server>,
    links:   Vec<(ApId, ApId)>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a server and return its `ServerId` (sequential from 0).
    pub fn add_server(&mut self, name: impl Into<String>, coord: Coordinate, spec: ServerSpec) -> ServerId {
        let id = ServerId(self.servers.len() as u32);
        self.servers.push(Server {
            id,
            name: name.into(),
            coord,
            base_latency_ms: spec.base_latency_ms,
            capacity: spec.capacity,
            load: 0,
            accepting: true,
        });
        id
    }

    /// Add an access point and return its `ApId` (sequential from 0).
    pub fn add_ap(
        &mut self,
        name:            impl Into<String>,
        coord:           Coordinate,
        coverage_radius: f64,
        zone:            MigrationZone,
        server:          Option<ServerId>,
    ) -> ApId {
        let id = ApId(self.aps.len() as u32);
        self.aps.push(ApDevice {
            id,
            name: name.into(),
            coord,
            coverage_radius,
            zone,
            server,
            neighbors: Vec::new(),
        });
        id
    }

    /// Make `a` and `b` neighbours of each other.  Repeated links are ignored.
    ///
    /// Links are applied by [`build`](Self::build), which reports unknown ids.
    pub fn link(&mut self, a: ApId, b: ApId) {
        self.links.push((a, b));
    }

    /// Link every pair of APs whose centres are at most `range` apart.
    pub fn link_within(&mut self, range: f64) {
        let n = self.aps.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.aps[i].coord.distance(self.aps[j].coord) <= range {
                    self.link(self.aps[i].id, self.aps[j].id);
                }
            }
        }
    }

    /// Set a server's initial load (workloads already hosted at bootstrap).
    pub fn preload(&mut self, server: ServerId, load: u32) {
        if let Some(s) = self.servers.get_mut(server.index()) {
            s.load = load;
        }
    }

    /// Consume the builder and produce a validated [`Topology`].
    pub fn build(mut self) -> TopologyResult<Topology> {
        let n = self.aps.len();
        for (a, b) in std::mem::take(&mut self.links) {
            for id in [a, b] {
                if id.index() >= n {
                    return Err(TopologyError::UnknownAp(id));
                }
            }
            if a == b {
                return Err(TopologyError::SelfNeighbor(a));
            }
            for (from, to) in [(a, b), (b, a)] {
                let nbrs = &mut self.aps[from.index()].neighbors;
                if !nbrs.contains(&to) {
                    nbrs.push(to);
                }
            }
        }
        Topology::new(self.aps, self.servers)
    }
}
