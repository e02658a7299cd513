//! `fm-output` — writers for migration decision records.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                   |
//! |-----------|---------|-------------------------------------------------|
//! | *(none)*  | CSV     | `decisions.csv`, `tick_summaries.csv`           |
//! | `sqlite`  | SQLite  | `output.db`                                     |
//! | `parquet` | Parquet | `decisions.parquet`, `tick_summaries.parquet`   |
//!
//! All backends implement [`RecordWriter`] and are driven by
//! [`RecordOutputObserver`], which is both an `fm_sim::SimObserver` and an
//! `fm_policy::DecisionRecorder`.
//!
//! Optional values (no local server, evaluation stopped before a candidate
//! was found, …) are written as empty CSV fields, SQL `NULL`s, or Parquet
//! nulls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fm_output::{CsvWriter, RecordOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RecordOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordOutputObserver;
pub use row::{DECISION_COLUMNS, DecisionRow, SUMMARY_COLUMNS, TickSummaryRow};
pub use writer::RecordWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
