//! The `RecordWriter` trait implemented by all backend writers.

use crate::{DecisionRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV, SQLite, and Parquet writers.
///
/// Errors surface to the caller here; [`RecordOutputObserver`] stores them
/// instead, because neither of its roles can fail.
///
/// [`RecordOutputObserver`]: crate::RecordOutputObserver
pub trait RecordWriter {
    /// Write a batch of decision rows.  An empty batch is a no-op.
    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
