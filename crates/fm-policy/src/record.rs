//! Decision records and where they go.

use fm_core::{Coordinate, DeviceId, Tick};

use crate::{DecisionReason, PolicyKind};

/// Everything known about one evaluation, captured when it finishes.
///
/// Exactly one record is emitted per [`should_migrate`] call, whatever the
/// outcome.  Candidate names are the ones resolved during *that* call; they
/// are `None` when evaluation stopped before reaching them.
///
/// [`should_migrate`]: crate::DecisionPolicy::should_migrate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionRecord {
    pub time_secs: f64,
    pub tick:      Tick,
    pub device:    DeviceId,
    pub policy:    PolicyKind,

    pub position:  Coordinate,
    pub direction: f64,
    pub speed:     f64,

    /// `None` only when the source AP could not be resolved.
    pub source_ap:             Option<String>,
    pub distance_to_source_ap: Option<f64>,
    pub mig_time_secs:         f64,

    pub should_migrate: bool,
    pub next_server:    Option<String>,
    pub next_ap:        Option<String>,
    pub reason:         DecisionReason,

    pub local_server:               Option<String>,
    pub distance_to_local_server:   Option<f64>,
    pub closest_server:             Option<String>,
    pub distance_to_closest_server: Option<f64>,

    pub in_migration_zone:  bool,
    pub at_migration_point: bool,
}

/// Sink for decision records.
///
/// Recording is fire-and-forget: implementations that can fail must keep
/// the error to themselves.
pub trait DecisionRecorder {
    fn record(&mut self, record: DecisionRecord);
}

impl<R: DecisionRecorder + ?Sized> DecisionRecorder for &mut R {
    fn record(&mut self, record: DecisionRecord) {
        (**self).record(record);
    }
}

impl<R: DecisionRecorder + ?Sized> DecisionRecorder for Box<R> {
    fn record(&mut self, record: DecisionRecord) {
        (**self).record(record);
    }
}

/// Discards every record.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopRecorder;

impl DecisionRecorder for NoopRecorder {
    #[inline]
    fn record(&mut self, _record: DecisionRecord) {}
}

/// Keeps every record in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    records: Vec<DecisionRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&DecisionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drain the buffer.
    pub fn take(&mut self) -> Vec<DecisionRecord> {
        std::mem::take(&mut self.records)
    }
}

impl DecisionRecorder for MemoryRecorder {
    fn record(&mut self, record: DecisionRecord) {
        self.records.push(record);
    }
}
