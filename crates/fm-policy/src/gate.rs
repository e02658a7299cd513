//! What distinguishes one policy variant from another.
//!
//! The engine runs the same pipeline for every variant.  A gate decides
//! whether to look for a destination at all, and which server to send the
//! workload to once the next AP is known.

use fm_inference::{FeatureVector, MigrationAdvisor};
use fm_localization::PositionCode;
use fm_topology::{ApDevice, MobileDevice};
use tracing::warn;

use crate::{DecisionReason, PolicyKind};

/// How the destination server is picked after the next AP is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServerChoice {
    /// The server co-located with the next AP.
    CoLocated,
    /// The server with the lowest latency cost.
    LowestLatency,
    /// The nearest server other than the current one.
    Nearest,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Reject(DecisionReason),
}

/// What a gate sees: the device with fresh zone/point flags, plus the
/// distances computed for this evaluation.
#[derive(Debug)]
pub struct Probe<'a> {
    pub device:                     &'a MobileDevice,
    pub source_ap:                  &'a ApDevice,
    pub position:                   PositionCode,
    pub distance_to_source_ap:      f64,
    pub distance_to_local_server:   Option<f64>,
    pub distance_to_closest_server: Option<f64>,
}

impl Probe<'_> {
    #[inline]
    pub fn in_zone_at_point(&self) -> bool {
        self.device.in_migration_zone && self.device.at_migration_point
    }

    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            pos_x: self.device.coord.x,
            pos_y: self.device.coord.y,
            direction: self.device.direction,
            speed: self.device.speed,
            distance_to_source_ap: self.distance_to_source_ap,
            distance_to_local_server: self.distance_to_local_server,
            distance_to_closest_server: self.distance_to_closest_server,
            is_mig_point: self.device.at_migration_point,
            is_mig_zone: self.device.in_migration_zone,
        }
    }
}

/// The variant-specific part of a policy.
///
/// Gates are stateless between calls, like the engine that owns them.
pub trait MigrationGate: Send + Sync + 'static {
    fn kind(&self) -> PolicyKind;

    /// Called once per evaluation, after localization.
    fn decide(&self, probe: &Probe<'_>) -> GateDecision;

    fn server_choice(&self) -> ServerChoice;
}

impl<G: MigrationGate + ?Sized> MigrationGate for Box<G> {
    fn kind(&self) -> PolicyKind {
        (**self).kind()
    }

    fn decide(&self, probe: &Probe<'_>) -> GateDecision {
        (**self).decide(probe)
    }

    fn server_choice(&self) -> ServerChoice {
        (**self).server_choice()
    }
}

fn zone_and_point(probe: &Probe<'_>) -> GateDecision {
    if probe.in_zone_at_point() {
        GateDecision::Proceed
    } else {
        GateDecision::Reject(DecisionReason::OutsideZoneOrPoint)
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

/// Delegates the go/no-go to a [`MigrationAdvisor`].
#[derive(Debug)]
pub struct RemoteGate<A> {
    advisor: A,
}

impl<A: MigrationAdvisor> RemoteGate<A> {
    pub fn new(advisor: A) -> Self {
        Self { advisor }
    }

    pub fn advisor(&self) -> &A {
        &self.advisor
    }
}

impl<A: MigrationAdvisor> MigrationGate for RemoteGate<A> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RemoteDelegated
    }

    fn decide(&self, probe: &Probe<'_>) -> GateDecision {
        match self.advisor.advise(&probe.features()) {
            Ok(true) => GateDecision::Proceed,
            Ok(false) => GateDecision::Reject(DecisionReason::InferenceRejected),
            Err(e) => {
                warn!(device = %probe.device.id, advisor = self.advisor.name(), error = %e, "inference failed");
                GateDecision::Reject(DecisionReason::InferenceFailure)
            }
        }
    }

    fn server_choice(&self) -> ServerChoice {
        ServerChoice::LowestLatency
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NearestApGate;

impl MigrationGate for NearestApGate {
    fn kind(&self) -> PolicyKind {
        PolicyKind::NearestAp
    }

    fn decide(&self, probe: &Probe<'_>) -> GateDecision {
        zone_and_point(probe)
    }

    fn server_choice(&self) -> ServerChoice {
        ServerChoice::CoLocated
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LowestLatencyGate;

impl MigrationGate for LowestLatencyGate {
    fn kind(&self) -> PolicyKind {
        PolicyKind::LowestLatency
    }

    fn decide(&self, probe: &Probe<'_>) -> GateDecision {
        if probe.device.is_stationary() {
            return GateDecision::Reject(DecisionReason::Stationary);
        }
        zone_and_point(probe)
    }

    fn server_choice(&self) -> ServerChoice {
        ServerChoice::LowestLatency
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NearestServerGate;

impl MigrationGate for NearestServerGate {
    fn kind(&self) -> PolicyKind {
        PolicyKind::NearestServer
    }

    fn decide(&self, probe: &Probe<'_>) -> GateDecision {
        zone_and_point(probe)
    }

    fn server_choice(&self) -> ServerChoice {
        ServerChoice::Nearest
    }
}
