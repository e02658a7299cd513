//! `RecordOutputObserver<W>`: bridges the driver and the policy to a
//! [`RecordWriter`].

use fm_core::{SimConfig, Tick};
use fm_policy::{DecisionRecord, DecisionRecorder};
use fm_sim::{SimObserver, TickStats};

use crate::row::{DecisionRow, TickSummaryRow};
use crate::writer::RecordWriter;
use crate::{OutputError, OutputResult};

/// Buffers decision records and writes them once per tick, together with
/// the tick summary.
///
/// Usable in two roles:
///
/// * as a [`SimObserver`], fed by `MigrationSim::run`;
/// * as a [`DecisionRecorder`] passed straight to `should_migrate`, in which
///   case call [`flush`](Self::flush) and [`finish`](Self::finish) yourself.
///
/// Neither role can report a failure, so writer errors are kept and
/// retrieved with [`take_error`](Self::take_error) after the run.
pub struct RecordOutputObserver<W: RecordWriter> {
    writer:     W,
    tick_secs:  f64,
    pending:    Vec<DecisionRow>,
    last_error: Option<OutputError>,
}

impl<W: RecordWriter> RecordOutputObserver<W> {
    /// `config` supplies the tick length used for summary timestamps.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_secs:  config.make_clock().tick_secs(),
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Rows buffered since the last flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Write buffered decision rows.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_decisions(&rows);
        self.store_err(result);
    }

    /// Flush, then close the writer.
    pub fn finish(&mut self) {
        self.flush();
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // First error wins.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RecordWriter> DecisionRecorder for RecordOutputObserver<W> {
    fn record(&mut self, record: DecisionRecord) {
        self.pending.push(DecisionRow::from(&record));
    }
}

impl<W: RecordWriter> SimObserver for RecordOutputObserver<W> {
    fn on_decision(&mut self, record: &DecisionRecord) {
        self.pending.push(DecisionRow::from(record));
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.flush();
        let row = TickSummaryRow {
            tick:      tick.0,
            time_secs: tick.0 as f64 * self.tick_secs,
            evaluated: stats.evaluated as u64,
            migrated:  stats.migrated as u64,
            handoffs:  stats.handoffs as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
