//! Simulation observer trait for progress reporting and data collection.

use fm_core::{ServerId, Tick};
use fm_policy::DecisionRecord;
use fm_topology::MobileDevice;

/// Per-tick counters passed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Devices evaluated (always the whole roster).
    pub evaluated: usize,
    /// Approved and applied migrations.
    pub migrated:  usize,
    /// Devices whose serving AP changed during the move step.
    pub handoffs:  usize,
}

/// Callbacks invoked by [`MigrationSim::run`][crate::MigrationSim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — migration counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SimObserver for Counter {
///     fn on_migration(&mut self, _: Tick, _: &MobileDevice, _: Option<ServerId>, _: ServerId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any device moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per decision record, in emission order.
    fn on_decision(&mut self, _record: &DecisionRecord) {}

    /// Called after a migration has been applied to the device and topology.
    fn on_migration(
        &mut self,
        _tick:   Tick,
        _device: &MobileDevice,
        _from:   Option<ServerId>,
        _to:     ServerId,
    ) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
