//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` with two tables, `decisions` and `tick_summaries`.
//! Absent values are stored as `NULL`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::RecordWriter;
use crate::{DecisionRow, OutputResult, TickSummaryRow};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS decisions (
                 time_secs                  REAL    NOT NULL,
                 tick                       INTEGER NOT NULL,
                 device_id                  INTEGER NOT NULL,
                 policy                     TEXT    NOT NULL,
                 pos_x                      REAL    NOT NULL,
                 pos_y                      REAL    NOT NULL,
                 direction                  REAL    NOT NULL,
                 speed                      REAL    NOT NULL,
                 source_ap                  TEXT,
                 distance_to_source_ap      REAL,
                 mig_time_secs              REAL    NOT NULL,
                 should_migrate             INTEGER NOT NULL,
                 next_server                TEXT,
                 next_ap                    TEXT,
                 reason                     TEXT    NOT NULL,
                 local_server               TEXT,
                 distance_to_local_server   REAL,
                 closest_server             TEXT,
                 distance_to_closest_server REAL,
                 is_mig_point               INTEGER NOT NULL,
                 is_mig_zone                INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick      INTEGER PRIMARY KEY,
                 time_secs REAL    NOT NULL,
                 evaluated INTEGER NOT NULL,
                 migrated  INTEGER NOT NULL,
                 handoffs  INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl RecordWriter for SqliteWriter {
    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO decisions VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, \
                  ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.time_secs,
                    row.tick,
                    row.device_id,
                    row.policy,
                    row.pos_x,
                    row.pos_y,
                    row.direction,
                    row.speed,
                    row.source_ap,
                    row.distance_to_source_ap,
                    row.mig_time_secs,
                    row.should_migrate,
                    row.next_server,
                    row.next_ap,
                    row.reason,
                    row.local_server,
                    row.distance_to_local_server,
                    row.closest_server,
                    row.distance_to_closest_server,
                    row.is_mig_point,
                    row.is_mig_zone,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, time_secs, evaluated, migrated, handoffs) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.tick, row.time_secs, row.evaluated, row.migrated, row.handoffs],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
