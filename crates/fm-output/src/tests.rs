//! Unit tests for fm-output.

#[cfg(test)]
mod helpers {
    use fm_core::{Coordinate, DeviceId, Tick};
    use fm_policy::{DecisionReason, DecisionRecord, PolicyKind};

    use crate::{DecisionRow, TickSummaryRow};

    /// An approved record with every optional field populated.
    pub fn approved(device: u32, tick: u64) -> DecisionRecord {
        DecisionRecord {
            time_secs: tick as f64,
            tick: Tick(tick),
            device: DeviceId(device),
            policy: PolicyKind::LowestLatency,
            position: Coordinate::new(1.5, -2.0),
            direction: 90.0,
            speed: 5.0,
            source_ap: Some("ap-0".into()),
            distance_to_source_ap: Some(2.5),
            mig_time_secs: 3.0,
            should_migrate: true,
            next_server: Some("srv-1".into()),
            next_ap: Some("ap-1".into()),
            reason: DecisionReason::Approved,
            local_server: Some("srv-0".into()),
            distance_to_local_server: Some(2.5),
            closest_server: Some("srv-1".into()),
            distance_to_closest_server: Some(18.5),
            in_migration_zone: true,
            at_migration_point: true,
        }
    }

    /// A rejection that stopped before any candidate, with no server at all.
    pub fn bare(device: u32, tick: u64) -> DecisionRecord {
        DecisionRecord {
            should_migrate: false,
            next_server: None,
            next_ap: None,
            reason: DecisionReason::OutsideZoneOrPoint,
            local_server: None,
            distance_to_local_server: None,
            closest_server: None,
            distance_to_closest_server: None,
            in_migration_zone: false,
            at_migration_point: false,
            ..approved(device, tick)
        }
    }

    pub fn rows(records: &[DecisionRecord]) -> Vec<DecisionRow> {
        records.iter().map(DecisionRow::from).collect()
    }

    pub fn summary(tick: u64) -> TickSummaryRow {
        TickSummaryRow { tick, time_secs: tick as f64 * 0.5, evaluated: 3, migrated: 1, handoffs: 2 }
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::helpers::{approved, bare};
    use crate::{DECISION_COLUMNS, DecisionRow};

    #[test]
    fn flattens_record() {
        let row = DecisionRow::from(&approved(4, 7));
        assert_eq!(row.device_id, 4);
        assert_eq!(row.tick, 7);
        assert_eq!(row.policy, "lowest-latency");
        assert_eq!(row.reason, "approved");
        assert_eq!((row.pos_x, row.pos_y), (1.5, -2.0));
        assert!(row.is_mig_point && row.is_mig_zone);
    }

    #[test]
    fn keeps_absent_values_absent() {
        let row = DecisionRow::from(&bare(0, 0));
        assert_eq!(row.next_server, None);
        assert_eq!(row.distance_to_local_server, None);
        assert_eq!(row.reason, "outside migration zone or point");
    }

    #[test]
    fn column_names_unique() {
        let mut names = DECISION_COLUMNS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DECISION_COLUMNS.len());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::helpers::{approved, bare, rows, summary};
    use crate::csv::CsvWriter;
    use crate::writer::RecordWriter;
    use crate::{DECISION_COLUMNS, SUMMARY_COLUMNS};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let records = rdr.records().map(|r| r.unwrap()).collect();
        (headers, records)
    }

    #[test]
    fn files_and_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, records) = read(&dir, "decisions.csv");
        assert_eq!(headers, DECISION_COLUMNS);
        assert!(records.is_empty());

        let (headers, _) = read(&dir, "tick_summaries.csv");
        assert_eq!(headers, SUMMARY_COLUMNS);
    }

    #[test]
    fn decision_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_decisions(&rows(&[approved(0, 2), bare(1, 2)])).unwrap();
        w.finish().unwrap();

        let (_, records) = read(&dir, "decisions.csv");
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][2], "0");
        assert_eq!(&records[0][11], "1"); // should_migrate
        assert_eq!(&records[0][12], "srv-1");
        assert_eq!(&records[0][14], "approved");
        assert_eq!(&records[1][11], "0");
        assert_eq!(&records[1][12], ""); // next_server
        assert_eq!(&records[1][16], ""); // distance_to_local_server
        assert_eq!(&records[1][14], "outside migration zone or point");
    }

    #[test]
    fn tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary(4)).unwrap();
        w.finish().unwrap();

        let (_, records) = read(&dir, "tick_summaries.csv");
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "4");
        assert_eq!(&records[0][1], "2");
        assert_eq!(&records[0][4], "2");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_decisions(&[]).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use fm_core::{ApId, Coordinate, DeviceId, ServerId, SimConfig, Tick};
    use fm_policy::{DecisionRecorder, MigrationConfig, PolicyKind, build_engine};
    use fm_sim::{LinearMobility, MigrationSimBuilder, SimObserver, TickStats};
    use fm_topology::{MigrationZone, MobileDevice, ServerSpec, TopologyBuilder};
    use tempfile::TempDir;

    use super::helpers::approved;
    use crate::{CsvWriter, DecisionRow, OutputError, OutputResult, RecordOutputObserver, RecordWriter, TickSummaryRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Fails every write after the first `ok` calls.
    struct Flaky {
        ok:     usize,
        calls:  usize,
        rows:   usize,
    }

    impl Flaky {
        fn step(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
            } else {
                Ok(())
            }
        }
    }

    impl RecordWriter for Flaky {
        fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
            self.rows += rows.len();
            self.step()
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.step()
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn recorder_role_buffers_until_flush() {
        let mut obs = RecordOutputObserver::new(Flaky { ok: 10, calls: 0, rows: 0 }, &SimConfig::default());
        obs.record(approved(0, 0));
        obs.record(approved(1, 0));
        assert_eq!(obs.pending(), 2);
        obs.flush();
        assert_eq!(obs.pending(), 0);
        obs.finish();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().rows, 2);
    }

    #[test]
    fn keeps_first_error() {
        let mut obs = RecordOutputObserver::new(Flaky { ok: 1, calls: 0, rows: 0 }, &SimConfig::default());
        let stats = TickStats { evaluated: 1, migrated: 0, handoffs: 0 };
        obs.on_decision(&approved(0, 0));
        obs.on_tick_end(Tick(0), &stats); // decisions ok, summary fails (call 2)
        obs.on_decision(&approved(0, 1));
        obs.on_tick_end(Tick(1), &stats); // call 3 and 4 fail too

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 2"), "got {err}");
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn sim_run_to_csv() {
        let mut b = TopologyBuilder::new();
        let s0 = b.add_server("srv-0", Coordinate::new(0.0, 0.0), ServerSpec { base_latency_ms: 50.0, capacity: 8 });
        let s1 = b.add_server("srv-1", Coordinate::new(20.0, 0.0), ServerSpec { base_latency_ms: 1.0, capacity: 8 });
        let zone = MigrationZone::new(10.0, 0.0);
        b.add_ap("ap-0", Coordinate::new(0.0, 0.0), 10.0, zone, Some(s0));
        b.add_ap("ap-1", Coordinate::new(20.0, 0.0), 10.0, zone, Some(s1));
        b.link_within(25.0);
        let topology = b.build().unwrap();

        let devices = (0..2)
            .map(|i| {
                MobileDevice::new(DeviceId(i), format!("car-{i}"), Coordinate::new(i as f64, 0.0), ApId(0))
                    .with_motion(1.0, 0.0)
                    .with_server(ServerId(0))
            })
            .collect();
        let config = SimConfig { tick_duration_ms: 500, total_ticks: 4, seed: 1 };
        let engine = build_engine(PolicyKind::LowestLatency, &MigrationConfig::default()).unwrap();
        let mut sim = MigrationSimBuilder::new(config.clone(), topology, engine, LinearMobility::default())
            .devices(devices)
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = RecordOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("decisions.csv")).unwrap();
        let decisions: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(decisions.len(), 8, "4 ticks × 2 devices");
        // Both devices migrate on the first tick.
        assert_eq!(&decisions[0][11], "1");
        assert_eq!(&decisions[1][11], "1");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 4);
        assert_eq!(&summaries[0][3], "2"); // migrated
        assert_eq!(&summaries[3][1], "1.5"); // tick 3 × 0.5 s
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::helpers::{approved, bare, rows, summary};
    use crate::sqlite::SqliteWriter;
    use crate::writer::RecordWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn decision_count_and_nulls() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_decisions(&rows(&[approved(0, 1), bare(1, 1), approved(2, 1)])).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM decisions", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);

        let (next, dist): (Option<String>, Option<f64>) = conn
            .query_row(
                "SELECT next_server, distance_to_local_server FROM decisions WHERE device_id = 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(next, None);
        assert_eq!(dist, None);

        let approved: i64 = conn
            .query_row("SELECT should_migrate FROM decisions WHERE device_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(approved, 1);
    }

    #[test]
    fn tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary(6)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, time, migrated): (i64, f64, i64) = conn
            .query_row(
                "SELECT tick, time_secs, migrated FROM tick_summaries WHERE tick = 6",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(tick, 6);
        assert_eq!(time, 3.0);
        assert_eq!(migrated, 1);
    }
}

// ── Parquet ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::array::Array;
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::helpers::{approved, bare, rows};
    use crate::parquet::ParquetWriter;
    use crate::writer::RecordWriter;
    use crate::DECISION_COLUMNS;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("decisions.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn decisions_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_decisions(&rows(&[approved(0, 2), bare(1, 2)])).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("decisions.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
        assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 2);

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, DECISION_COLUMNS);
        assert_eq!(*schema.field_with_name("should_migrate").unwrap().data_type(), DataType::Boolean);
        assert!(schema.field_with_name("next_server").unwrap().is_nullable());

        let next = batches[0].column_by_name("next_server").unwrap();
        assert!(next.is_valid(0));
        assert!(next.is_null(1));
    }

    #[test]
    fn finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_decisions(&rows(&[approved(0, 0)])).unwrap();
        }
        let file = std::fs::File::open(dir.path().join("decisions.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
