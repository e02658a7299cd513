//! Mobile clients whose workloads may migrate between edge servers.

use fm_core::{ApId, Coordinate, DeviceId, ServerId, normalize_deg};

use crate::MigPointPolicy;

/// A mobile client attached to an access point.
///
/// Created once at bootstrap and never destroyed during a run.  Movement
/// (`coord`, `speed`, `direction`, `source_ap`) is written by the driver;
/// the zone/point flags and the destination fields are written by decision
/// policies.
///
/// `in_migration_zone` and `at_migration_point` are only meaningful for the
/// tick in which the localization classifier last ran.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MobileDevice {
    pub id:   DeviceId,
    pub name: String,

    // ── Kinematics ────────────────────────────────────────────────────────
    pub coord: Coordinate,
    /// Distance units per simulated second; never negative.
    pub speed: f64,
    /// Heading in degrees, `[0, 360)`.
    pub direction: f64,

    // ── Attachment ────────────────────────────────────────────────────────
    /// AP currently serving the radio link.
    pub source_ap: ApId,
    /// Server hosting the workload, if one has been assigned.
    pub current_server: Option<ServerId>,
    pub mig_point_policy: MigPointPolicy,

    // ── Localization flags (per tick) ─────────────────────────────────────
    pub in_migration_zone:  bool,
    pub at_migration_point: bool,

    /// Seconds spent in the current migration attempt.
    pub mig_time_secs: f64,

    // ── Policy output ─────────────────────────────────────────────────────
    pub destination_ap:     Option<ApId>,
    pub destination_server: Option<ServerId>,

    /// Completed migrations, counted by the driver.
    pub migrations: u32,
}

impl MobileDevice {
    /// A stationary device at `coord`, attached to `source_ap`, with no
    /// server assigned yet.
    pub fn new(id: DeviceId, name: impl Into<String>, coord: Coordinate, source_ap: ApId) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
            speed: 0.0,
            direction: 0.0,
            source_ap,
            current_server: None,
            mig_point_policy: MigPointPolicy::default(),
            in_migration_zone: false,
            at_migration_point: false,
            mig_time_secs: 0.0,
            destination_ap: None,
            destination_server: None,
            migrations: 0,
        }
    }

    pub fn with_motion(mut self, speed: f64, direction_deg: f64) -> Self {
        self.speed = speed.max(0.0);
        self.direction = normalize_deg(direction_deg);
        self
    }

    pub fn with_server(mut self, server: ServerId) -> Self {
        self.current_server = Some(server);
        self
    }

    pub fn with_policy(mut self, policy: MigPointPolicy) -> Self {
        self.mig_point_policy = policy;
        self
    }

    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.speed <= 0.0
    }
}
