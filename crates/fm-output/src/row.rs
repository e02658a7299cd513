//! Flat row types shared by every backend.

use fm_policy::DecisionRecord;

/// Column order for decision rows in every backend.
pub const DECISION_COLUMNS: [&str; 21] = [
    "time_secs",
    "tick",
    "device_id",
    "policy",
    "pos_x",
    "pos_y",
    "direction",
    "speed",
    "source_ap",
    "distance_to_source_ap",
    "mig_time_secs",
    "should_migrate",
    "next_server",
    "next_ap",
    "reason",
    "local_server",
    "distance_to_local_server",
    "closest_server",
    "distance_to_closest_server",
    "is_mig_point",
    "is_mig_zone",
];

pub const SUMMARY_COLUMNS: [&str; 5] = ["tick", "time_secs", "evaluated", "migrated", "handoffs"];

/// One [`DecisionRecord`], flattened for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRow {
    pub time_secs:             f64,
    pub tick:                  u64,
    pub device_id:             u32,
    pub policy:                &'static str,
    pub pos_x:                 f64,
    pub pos_y:                 f64,
    pub direction:             f64,
    pub speed:                 f64,
    pub source_ap:             Option<String>,
    pub distance_to_source_ap: Option<f64>,
    pub mig_time_secs:         f64,
    pub should_migrate:        bool,
    pub next_server:           Option<String>,
    pub next_ap:               Option<String>,
    pub reason:                &'static str,
    pub local_server:               Option<String>,
    pub distance_to_local_server:   Option<f64>,
    pub closest_server:             Option<String>,
    pub distance_to_closest_server: Option<f64>,
    pub is_mig_point:          bool,
    pub is_mig_zone:           bool,
}

impl From<&DecisionRecord> for DecisionRow {
    fn from(r: &DecisionRecord) -> Self {
        Self {
            time_secs: r.time_secs,
            tick: r.tick.0,
            device_id: r.device.0,
            policy: r.policy.as_str(),
            pos_x: r.position.x,
            pos_y: r.position.y,
            direction: r.direction,
            speed: r.speed,
            source_ap: r.source_ap.clone(),
            distance_to_source_ap: r.distance_to_source_ap,
            mig_time_secs: r.mig_time_secs,
            should_migrate: r.should_migrate,
            next_server: r.next_server.clone(),
            next_ap: r.next_ap.clone(),
            reason: r.reason.as_str(),
            local_server: r.local_server.clone(),
            distance_to_local_server: r.distance_to_local_server,
            closest_server: r.closest_server.clone(),
            distance_to_closest_server: r.distance_to_closest_server,
            is_mig_point: r.at_migration_point,
            is_mig_zone: r.in_migration_zone,
        }
    }
}

/// Per-tick counters from the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub evaluated: u64,
    pub migrated:  u64,
    pub handoffs:  u64,
}
