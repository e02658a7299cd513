//! The decision pipeline shared by every variant.

use fm_localization::{PositionCode, localize};
use fm_select::{
    AdmissionControl, LatencyCostModel, closest_other_server, is_edge_ap, local_server,
    lowest_latency_cost_server, nearest_server, next_ap,
};
use fm_topology::{ApDevice, MobileDevice, Server};
use tracing::{debug, error};

use crate::gate::{GateDecision, Probe, ServerChoice};
use crate::{
    DecisionContext, DecisionReason, DecisionRecord, DecisionRecorder, MigrationConfig, MigrationGate,
    PolicyKind,
};

/// Decides whether a device's workload should move, and where.
///
/// # Contract
///
/// * Refreshes `device.in_migration_zone` / `device.at_migration_point`.
/// * On `true`, writes `device.destination_ap` and
///   `device.destination_server`; on `false` leaves them exactly as they were.
/// * Emits exactly one [`DecisionRecord`] per call.
///
/// The caller performs the migration itself.
pub trait DecisionPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    fn should_migrate(
        &self,
        device:   &mut MobileDevice,
        ctx:      &DecisionContext<'_>,
        recorder: &mut dyn DecisionRecorder,
    ) -> bool;
}

impl<P: DecisionPolicy + ?Sized> DecisionPolicy for Box<P> {
    fn kind(&self) -> PolicyKind {
        (**self).kind()
    }

    fn should_migrate(
        &self,
        device:   &mut MobileDevice,
        ctx:      &DecisionContext<'_>,
        recorder: &mut dyn DecisionRecorder,
    ) -> bool {
        (**self).should_migrate(device, ctx, recorder)
    }
}

/// The one orchestrator behind every policy variant.
///
/// `G` picks the variant, `A` is the admission check, `C` ranks servers by
/// latency.  The engine holds configuration only; everything computed during
/// a call lives in a local [`Evaluation`] and is dropped when the call
/// returns.
#[derive(Debug)]
pub struct MigrationEngine<G, A, C> {
    gate:      G,
    admission: A,
    cost:      C,
    config:    MigrationConfig,
}

impl<G, A, C> MigrationEngine<G, A, C>
where
    G: MigrationGate,
    A: AdmissionControl,
    C: LatencyCostModel,
{
    pub fn new(gate: G, admission: A, cost: C, config: MigrationConfig) -> Self {
        Self { gate, admission, cost, config }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn admission(&self) -> &A {
        &self.admission
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Steps 2 onwards: the gate, then candidate resolution, then admission.
    fn evaluate<'t>(
        &self,
        device: &MobileDevice,
        ctx:    &DecisionContext<'t>,
        eval:   &mut Evaluation<'t>,
    ) -> DecisionReason {
        let topology = ctx.topology;

        let probe = Probe {
            device,
            source_ap: eval.source,
            position: eval.position,
            distance_to_source_ap: eval.distance_to_source_ap,
            distance_to_local_server: eval.local.map(|(_, d)| d),
            distance_to_closest_server: eval.closest.map(|(_, d)| d),
        };
        if let GateDecision::Reject(reason) = self.gate.decide(&probe) {
            return reason;
        }

        let Some(ap) = next_ap(topology, device, &self.config.selector).and_then(|id| topology.ap(id)) else {
            return DecisionReason::NoNextAp;
        };
        eval.candidate_ap = Some(ap);
        if !is_edge_ap(ap, device) {
            return DecisionReason::NotEdgeAp;
        }

        let server = match self.gate.server_choice() {
            ServerChoice::CoLocated => match ap.server {
                Some(id) => id,
                None => return DecisionReason::NoApServer,
            },
            ServerChoice::LowestLatency => {
                match lowest_latency_cost_server(topology, device, &self.cost, &self.config.selector) {
                    Some(id) => id,
                    None => return DecisionReason::NoEligibleServer,
                }
            }
            ServerChoice::Nearest => match nearest_server(topology, device, true) {
                Some(id) => id,
                None => return DecisionReason::NoEligibleServer,
            },
        };
        let Some(server) = topology.server(server) else {
            return DecisionReason::NoEligibleServer;
        };
        eval.candidate_server = Some(server);
        if Some(server.id) == device.current_server {
            return DecisionReason::SameServer;
        }

        if self.admission.service_agreement(server, device) {
            DecisionReason::Approved
        } else {
            DecisionReason::ServiceAgreementDeclined
        }
    }
}

impl<G, A, C> DecisionPolicy for MigrationEngine<G, A, C>
where
    G: MigrationGate,
    A: AdmissionControl,
    C: LatencyCostModel,
{
    fn kind(&self) -> PolicyKind {
        self.gate.kind()
    }

    fn should_migrate(
        &self,
        device:   &mut MobileDevice,
        ctx:      &DecisionContext<'_>,
        recorder: &mut dyn DecisionRecorder,
    ) -> bool {
        let Some(source) = ctx.topology.ap(device.source_ap) else {
            error!(device = %device.id, source_ap = %device.source_ap, "source AP missing from topology");
            recorder.record(self.record(device, ctx, None, DecisionReason::SourceApMissing));
            return false;
        };

        let position = localize(device, source, &self.config.localization);

        let mut eval = Evaluation {
            source,
            position,
            distance_to_source_ap: source.coord.distance(device.coord),
            local: local_server(ctx.topology, device),
            closest: closest_other_server(ctx.topology, device),
            candidate_ap: None,
            candidate_server: None,
        };
        let reason = self.evaluate(device, ctx, &mut eval);
        let approved = reason.is_approved();

        if approved {
            device.destination_ap = eval.candidate_ap.map(|ap| ap.id);
            device.destination_server = eval.candidate_server.map(|s| s.id);
        }

        debug!(
            device = %device.id,
            policy = %self.gate.kind(),
            position = %position,
            in_zone = device.in_migration_zone,
            at_point = device.at_migration_point,
            next_ap = ?eval.candidate_ap.map(|ap| ap.id),
            next_server = ?eval.candidate_server.map(|s| s.id),
            approved,
            reason = %reason,
            "migration decision"
        );

        recorder.record(self.record(device, ctx, Some(&eval), reason));
        approved
    }
}

impl<G: MigrationGate, A, C> MigrationEngine<G, A, C> {
    fn record(
        &self,
        device: &MobileDevice,
        ctx:    &DecisionContext<'_>,
        eval:   Option<&Evaluation<'_>>,
        reason: DecisionReason,
    ) -> DecisionRecord {
        let name = |s: &Server| s.name.clone();
        DecisionRecord {
            time_secs: ctx.now_secs(),
            tick: ctx.tick(),
            device: device.id,
            policy: self.gate.kind(),
            position: device.coord,
            direction: device.direction,
            speed: device.speed,
            source_ap: eval.map(|e| e.source.name.clone()),
            distance_to_source_ap: eval.map(|e| e.distance_to_source_ap),
            mig_time_secs: device.mig_time_secs,
            should_migrate: reason.is_approved(),
            next_server: eval.and_then(|e| e.candidate_server).map(name),
            next_ap: eval.and_then(|e| e.candidate_ap).map(|ap| ap.name.clone()),
            reason,
            local_server: eval.and_then(|e| e.local).map(|(s, _)| name(s)),
            distance_to_local_server: eval.and_then(|e| e.local).map(|(_, d)| d),
            closest_server: eval.and_then(|e| e.closest).map(|(s, _)| name(s)),
            distance_to_closest_server: eval.and_then(|e| e.closest).map(|(_, d)| d),
            in_migration_zone: device.in_migration_zone,
            at_migration_point: device.at_migration_point,
        }
    }
}

/// Per-call scratch.  Borrows from the topology, never from the device.
struct Evaluation<'t> {
    source:                &'t ApDevice,
    position:              PositionCode,
    distance_to_source_ap: f64,
    local:                 Option<(&'t Server, f64)>,
    closest:               Option<(&'t Server, f64)>,
    candidate_ap:          Option<&'t ApDevice>,
    candidate_server:      Option<&'t Server>,
}
