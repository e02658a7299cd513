//! Unit tests for fm-sim.

#[cfg(test)]
mod helpers {
    use fm_core::{ApId, Coordinate, DeviceId, ServerId, SimConfig, Tick};
    use fm_policy::{DecisionRecord, DynEngine, MigrationConfig, PolicyKind, build_engine};
    use fm_topology::{MigrationZone, MobileDevice, ServerSpec, Topology, TopologyBuilder};

    use crate::{SimObserver, TickStats};

    /// Two cells 20 apart on the x axis; the eastern server is cheaper.
    pub fn corridor() -> Topology {
        let mut b = TopologyBuilder::new();
        let s0 = b.add_server("srv-0", Coordinate::new(0.0, 0.0), ServerSpec { base_latency_ms: 50.0, capacity: 4 });
        let s1 = b.add_server("srv-1", Coordinate::new(20.0, 0.0), ServerSpec { base_latency_ms: 1.0, capacity: 4 });
        let zone = MigrationZone::new(10.0, 0.0);
        let a0 = b.add_ap("ap-0", Coordinate::new(0.0, 0.0), 10.0, zone, Some(s0));
        let a1 = b.add_ap("ap-1", Coordinate::new(20.0, 0.0), 10.0, zone, Some(s1));
        b.link(a0, a1);
        b.build().unwrap()
    }

    pub fn car(id: u32, speed: f64) -> MobileDevice {
        MobileDevice::new(DeviceId(id), format!("car-{id}"), Coordinate::new(-2.0, 0.0), ApId(0))
            .with_motion(speed, 0.0)
            .with_server(ServerId(0))
    }

    pub fn config(ticks: u64) -> SimConfig {
        SimConfig { tick_duration_ms: 1_000, total_ticks: ticks, seed: 1 }
    }

    pub fn engine(kind: PolicyKind) -> DynEngine {
        build_engine(kind, &MigrationConfig::default()).unwrap()
    }

    /// Records every callback.
    #[derive(Default)]
    pub struct Tape {
        pub starts:     Vec<Tick>,
        pub decisions:  Vec<DecisionRecord>,
        pub migrations: Vec<(Tick, DeviceId, Option<ServerId>, ServerId)>,
        pub ends:       Vec<(Tick, TickStats)>,
        pub sim_end:    Option<Tick>,
    }

    impl SimObserver for Tape {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }

        fn on_decision(&mut self, record: &DecisionRecord) {
            self.decisions.push(record.clone());
        }

        fn on_migration(&mut self, tick: Tick, device: &MobileDevice, from: Option<ServerId>, to: ServerId) {
            self.migrations.push((tick, device.id, from, to));
        }

        fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
            self.ends.push((tick, *stats));
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.sim_end = Some(final_tick);
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fm_core::{ApId, ServerId};
    use fm_policy::PolicyKind;

    use super::helpers::{car, config, corridor, engine};
    use crate::{LinearMobility, MigrationSimBuilder, SimError};

    #[test]
    fn counts_hosted_workloads() {
        let sim = MigrationSimBuilder::new(config(1), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 1.0), car(1, 1.0)])
            .build()
            .unwrap();
        assert_eq!(sim.topology.server(ServerId(0)).unwrap().load, 2);
        assert_eq!(sim.topology.server(ServerId(1)).unwrap().load, 0);
    }

    #[test]
    fn id_mismatch() {
        let r = MigrationSimBuilder::new(config(1), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(3, 1.0)])
            .build();
        assert!(matches!(r, Err(SimError::DeviceIdMismatch { position: 0, id: 3 })));
    }

    #[test]
    fn invalid_device_rejected() {
        let mut d = car(0, 1.0);
        d.source_ap = ApId(9);
        let r = MigrationSimBuilder::new(config(1), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![d])
            .build();
        assert!(matches!(r, Err(SimError::Topology(_))));
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let mut cfg = config(1);
        cfg.tick_duration_ms = 0;
        let r = MigrationSimBuilder::new(cfg, corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 1.0)])
            .build();
        assert!(matches!(r, Err(SimError::Config(_))));
    }
}

// ── Mobility ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mobility {
    use fm_core::Coordinate;

    use super::helpers::car;
    use crate::{LinearMobility, MobilityModel};

    #[test]
    fn straight_line() {
        let mut d = car(0, 2.0).with_motion(2.0, 90.0);
        LinearMobility::default().advance(&mut d, 1.5);
        assert!((d.coord.x + 2.0).abs() < 1e-9);
        assert!((d.coord.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn stationary_does_not_move() {
        let mut d = car(0, 0.0);
        LinearMobility::default().advance(&mut d, 10.0);
        assert_eq!(d.coord, Coordinate::new(-2.0, 0.0));
    }

    #[test]
    fn bounces_off_bounds() {
        let m = LinearMobility::bounded(Coordinate::new(-5.0, -5.0), Coordinate::new(5.0, 5.0));
        let mut d = car(0, 10.0);
        m.advance(&mut d, 1.0);
        assert_eq!(d.coord.x, 5.0);
        assert!((d.direction - 180.0).abs() < 1e-9);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use fm_core::{ApId, DeviceId, ServerId, Tick};
    use fm_policy::{DecisionReason, PolicyKind};

    use super::helpers::{Tape, car, config, corridor, engine};
    use crate::{LinearMobility, MigrationSimBuilder, NoopObserver};

    #[test]
    fn observer_call_counts() {
        let mut sim = MigrationSimBuilder::new(config(5), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 0.0), car(1, 0.0), car(2, 0.0)])
            .build()
            .unwrap();
        let mut tape = Tape::default();
        sim.run(&mut tape).unwrap();

        assert_eq!(tape.starts.len(), 5);
        assert_eq!(tape.ends.len(), 5);
        assert_eq!(tape.decisions.len(), 15);
        assert_eq!(tape.sim_end, Some(Tick(5)));
        assert!(tape.ends.iter().all(|(_, s)| s.evaluated == 3));
        // Records arrive in ascending DeviceId within each tick.
        let first_tick: Vec<_> = tape.decisions[..3].iter().map(|r| r.device).collect();
        assert_eq!(first_tick, vec![DeviceId(0), DeviceId(1), DeviceId(2)]);
    }

    #[test]
    fn approved_migration_updates_device_and_loads() {
        let mut sim = MigrationSimBuilder::new(config(1), corridor(), engine(PolicyKind::LowestLatency), LinearMobility::default())
            .devices(vec![car(0, 1.0)])
            .build()
            .unwrap();
        let mut tape = Tape::default();
        sim.run(&mut tape).unwrap();

        let d = &sim.devices[0];
        assert_eq!(d.current_server, Some(ServerId(1)));
        assert_eq!(d.destination_ap, Some(ApId(1)));
        assert_eq!(d.migrations, 1);
        assert_eq!(sim.topology.server(ServerId(0)).unwrap().load, 0);
        assert_eq!(sim.topology.server(ServerId(1)).unwrap().load, 1);
        assert_eq!(tape.migrations, vec![(Tick(0), DeviceId(0), Some(ServerId(0)), ServerId(1))]);
        assert_eq!(tape.ends[0].1.migrated, 1);
        assert_eq!(tape.decisions[0].reason, DecisionReason::Approved);
    }

    #[test]
    fn second_decision_sees_first_migration() {
        // srv-1 has room for exactly one more workload.
        let mut topo = corridor();
        topo.server_mut(ServerId(1)).unwrap().load = 3;
        let mut sim = MigrationSimBuilder::new(config(1), topo, engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 1.0), car(1, 1.0)])
            .build()
            .unwrap();
        let mut tape = Tape::default();
        sim.run(&mut tape).unwrap();

        assert_eq!(tape.decisions[0].reason, DecisionReason::Approved);
        assert_eq!(tape.decisions[1].reason, DecisionReason::ServiceAgreementDeclined);
        assert_eq!(sim.devices[1].current_server, Some(ServerId(0)));
    }

    #[test]
    fn handoff_to_nearest_covering_ap() {
        let mut sim = MigrationSimBuilder::new(config(3), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 5.0)])
            .build()
            .unwrap();
        let mut tape = Tape::default();
        sim.run(&mut tape).unwrap();

        // -2 → 3 → 8 → 13: the third move crosses the midpoint.
        assert_eq!(sim.devices[0].source_ap, ApId(1));
        let handoffs: usize = tape.ends.iter().map(|(_, s)| s.handoffs).sum();
        assert_eq!(handoffs, 1);
    }

    #[test]
    fn migration_time_accumulates_in_zone() {
        let mut sim = MigrationSimBuilder::new(config(3), corridor(), engine(PolicyKind::LowestLatency), LinearMobility::default())
            .devices(vec![car(0, 0.0)])
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!((sim.devices[0].mig_time_secs - 3.0).abs() < 1e-9);
        assert_eq!(sim.devices[0].migrations, 0);
    }

    #[test]
    fn run_ticks_ignores_end() {
        let mut sim = MigrationSimBuilder::new(config(1), corridor(), engine(PolicyKind::NearestAp), LinearMobility::default())
            .devices(vec![car(0, 0.0)])
            .build()
            .unwrap();
        let mut tape = Tape::default();
        sim.run_ticks(4, &mut tape).unwrap();
        assert_eq!(tape.starts.len(), 4);
        assert_eq!(sim.clock.current_tick, Tick(4));
        assert!(tape.sim_end.is_none());
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use fm_core::{ApId, Coordinate, DeviceId, ServerId};
    use fm_policy::PolicyKind;
    use fm_topology::MobileDevice;
    use proptest::prelude::*;

    use super::helpers::{Tape, config, corridor, engine};
    use crate::{LinearMobility, MigrationSimBuilder};

    fn device(id: u32, x: f64, speed: f64, heading: f64) -> MobileDevice {
        MobileDevice::new(DeviceId(id), format!("d{id}"), Coordinate::new(x, 0.0), ApId(0))
            .with_motion(speed, heading)
            .with_server(ServerId(0))
    }

    proptest! {
        #[test]
        fn workloads_are_conserved(
            specs in prop::collection::vec((-5.0f64..5.0, 0.0f64..4.0, 0.0f64..360.0), 1..4),
            kind in prop::sample::select(vec![PolicyKind::NearestAp, PolicyKind::LowestLatency, PolicyKind::NearestServer]),
        ) {
            let devices: Vec<_> = specs
                .iter()
                .enumerate()
                .map(|(i, &(x, s, h))| device(i as u32, x, s, h))
                .collect();
            let n = devices.len() as u32;
            let bounds = LinearMobility::bounded(Coordinate::new(-10.0, -10.0), Coordinate::new(30.0, 10.0));
            let mut sim = MigrationSimBuilder::new(config(8), corridor(), engine(kind), bounds)
                .devices(devices)
                .build()
                .unwrap();
            let mut tape = Tape::default();
            sim.run(&mut tape).unwrap();

            let load: u32 = sim.topology.servers().iter().map(|s| s.load).sum();
            prop_assert_eq!(load, n);
            let migrated: usize = tape.ends.iter().map(|(_, s)| s.migrated).sum();
            prop_assert_eq!(migrated, tape.migrations.len());
            let per_device: u32 = sim.devices.iter().map(|d| d.migrations).sum();
            prop_assert_eq!(per_device as usize, migrated);
            prop_assert_eq!(tape.decisions.len(), 8 * n as usize);
            for (_, _, from, to) in &tape.migrations {
                prop_assert_ne!(*from, Some(*to));
            }
        }
    }
}
