//! Read-only state shared by every evaluation in a tick.

use fm_core::{SimClock, Tick};
use fm_topology::Topology;

/// Borrowed view of the clock and topology for one tick.
///
/// Built by the driver once per tick and passed to every
/// [`DecisionPolicy::should_migrate`](crate::DecisionPolicy::should_migrate)
/// call in that tick.
#[derive(Copy, Clone)]
pub struct DecisionContext<'a> {
    pub clock:    &'a SimClock,
    pub topology: &'a Topology,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(clock: &'a SimClock, topology: &'a Topology) -> Self {
        Self { clock, topology }
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.clock.current_tick
    }

    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }
}
