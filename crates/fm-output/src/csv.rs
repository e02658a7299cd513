//! CSV output backend.
//!
//! Creates `decisions.csv` and `tick_summaries.csv` in the output directory.
//! Booleans are written as `0`/`1`; absent values as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RecordWriter;
use crate::{DECISION_COLUMNS, DecisionRow, OutputResult, SUMMARY_COLUMNS, TickSummaryRow};

pub struct CsvWriter {
    decisions: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create both files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(DECISION_COLUMNS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_COLUMNS)?;

        Ok(Self { decisions, summaries, finished: false })
    }
}

fn opt_f64(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(v: bool) -> String {
    (v as u8).to_string()
}

impl RecordWriter for CsvWriter {
    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
        for row in rows {
            self.decisions.write_record(&[
                row.time_secs.to_string(),
                row.tick.to_string(),
                row.device_id.to_string(),
                row.policy.to_owned(),
                row.pos_x.to_string(),
                row.pos_y.to_string(),
                row.direction.to_string(),
                row.speed.to_string(),
                row.source_ap.clone().unwrap_or_default(),
                opt_f64(row.distance_to_source_ap),
                row.mig_time_secs.to_string(),
                flag(row.should_migrate),
                row.next_server.clone().unwrap_or_default(),
                row.next_ap.clone().unwrap_or_default(),
                row.reason.to_owned(),
                row.local_server.clone().unwrap_or_default(),
                opt_f64(row.distance_to_local_server),
                row.closest_server.clone().unwrap_or_default(),
                opt_f64(row.distance_to_closest_server),
                flag(row.is_mig_point),
                flag(row.is_mig_zone),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.evaluated.to_string(),
            row.migrated.to_string(),
            row.handoffs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.decisions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
