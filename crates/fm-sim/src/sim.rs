//! The `MigrationSim` struct and its tick loop.

use fm_core::{SimClock, SimConfig, Tick};
use fm_policy::{DecisionContext, DecisionPolicy, MemoryRecorder};
use fm_topology::{MobileDevice, Topology};
use tracing::{debug, info};

use crate::{MobilityModel, SimObserver, SimResult, TickStats};

/// The simulation runner.
///
/// Holds the topology, the device roster, one decision policy and one
/// mobility model, and drives the move / decide / migrate loop described in
/// the crate docs.
///
/// Create via [`MigrationSimBuilder`][crate::MigrationSimBuilder].
pub struct MigrationSim<P: DecisionPolicy, M: MobilityModel> {
    pub config: SimConfig,

    /// Current tick; also the time source handed to the policy.
    pub clock: SimClock,

    /// Server loads change as migrations are applied.
    pub topology: Topology,

    /// Indexed by `DeviceId`.
    pub devices: Vec<MobileDevice>,

    pub policy: P,

    pub mobility: M,
}

impl<P: DecisionPolicy, M: MobilityModel> MigrationSim<P, M> {
    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let mut migrations = 0usize;
        while self.clock.current_tick < self.config.end_tick() {
            migrations += self.step(observer)?.migrated;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            policy = %self.policy.kind(),
            ticks = self.clock.current_tick.0,
            devices = self.devices.len(),
            migrations,
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &stats);
        debug!(tick = %now, migrated = stats.migrated, handoffs = stats.handoffs, "tick complete");
        self.clock.advance();
        Ok(stats)
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickStats> {
        let dt = self.clock.tick_secs();
        let mut stats = TickStats { evaluated: self.devices.len(), ..TickStats::default() };

        // ── Move and hand off ─────────────────────────────────────────────
        for device in &mut self.devices {
            self.mobility.advance(device, dt);
            if let Some(ap) = self.topology.nearest_covering_ap(device.coord) {
                if ap != device.source_ap {
                    debug!(device = %device.id, from = %device.source_ap, to = %ap, "handoff");
                    device.source_ap = ap;
                    stats.handoffs += 1;
                }
            }
        }

        // ── Decide and migrate, ascending DeviceId ────────────────────────
        let mut records = MemoryRecorder::new();
        for device in &mut self.devices {
            let approved = {
                let ctx = DecisionContext::new(&self.clock, &self.topology);
                self.policy.should_migrate(device, &ctx, &mut records)
            };
            for record in records.take() {
                observer.on_decision(&record);
            }

            if !approved {
                if device.in_migration_zone {
                    device.mig_time_secs += dt;
                } else {
                    device.mig_time_secs = 0.0;
                }
                continue;
            }
            let Some(to) = device.destination_server else { continue };

            let from = device.current_server;
            self.topology.move_workload(from, to)?;
            device.current_server = Some(to);
            device.mig_time_secs = 0.0;
            device.migrations += 1;
            stats.migrated += 1;
            observer.on_migration(now, device, from, to);
        }

        Ok(stats)
    }
}
