//! Parquet output backend (feature `parquet`).
//!
//! Creates `decisions.parquet` and `tick_summaries.parquet`.  Optional
//! columns are nullable.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{BooleanBuilder, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::RecordWriter;
use crate::{DecisionRow, OutputResult, TickSummaryRow};

fn decision_schema() -> Arc<Schema> {
    use arrow::datatypes::DataType::{Boolean, Float64, UInt32, UInt64, Utf8};
    Arc::new(Schema::new(vec![
        Field::new("time_secs",                  Float64, false),
        Field::new("tick",                       UInt64,  false),
        Field::new("device_id",                  UInt32,  false),
        Field::new("policy",                     Utf8,    false),
        Field::new("pos_x",                      Float64, false),
        Field::new("pos_y",                      Float64, false),
        Field::new("direction",                  Float64, false),
        Field::new("speed",                      Float64, false),
        Field::new("source_ap",                  Utf8,    true),
        Field::new("distance_to_source_ap",      Float64, true),
        Field::new("mig_time_secs",              Float64, false),
        Field::new("should_migrate",             Boolean, false),
        Field::new("next_server",                Utf8,    true),
        Field::new("next_ap",                    Utf8,    true),
        Field::new("reason",                     Utf8,    false),
        Field::new("local_server",               Utf8,    true),
        Field::new("distance_to_local_server",   Float64, true),
        Field::new("closest_server",             Utf8,    true),
        Field::new("distance_to_closest_server", Float64, true),
        Field::new("is_mig_point",               Boolean, false),
        Field::new("is_mig_zone",                Boolean, false),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("time_secs", DataType::Float64, false),
        Field::new("evaluated", DataType::UInt64,  false),
        Field::new("migrated",  DataType::UInt64,  false),
        Field::new("handoffs",  DataType::UInt64,  false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes decision rows and tick summaries to two Parquet files.
///
/// `finish()` **must** be called to write the file footers; files written
/// without it cannot be opened by Parquet readers.
pub struct ParquetWriter {
    decisions:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    dec_schema:  Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let dec_schema = decision_schema();
        let summ_schema = summary_schema();

        let decisions = ArrowWriter::try_new(
            File::create(dir.join("decisions.parquet"))?,
            Arc::clone(&dec_schema),
            Some(snappy_props()),
        )?;
        let summaries = ArrowWriter::try_new(
            File::create(dir.join("tick_summaries.parquet"))?,
            Arc::clone(&summ_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            decisions: Some(decisions),
            summaries: Some(summaries),
            dec_schema,
            summ_schema,
        })
    }
}

/// Builders for the decision columns, in schema order.
#[derive(Default)]
struct DecisionColumns {
    time_secs:       Float64Builder,
    tick:            UInt64Builder,
    device_id:       UInt32Builder,
    policy:          StringBuilder,
    pos_x:           Float64Builder,
    pos_y:           Float64Builder,
    direction:       Float64Builder,
    speed:           Float64Builder,
    source_ap:       StringBuilder,
    dist_source_ap:  Float64Builder,
    mig_time_secs:   Float64Builder,
    should_migrate:  BooleanBuilder,
    next_server:     StringBuilder,
    next_ap:         StringBuilder,
    reason:          StringBuilder,
    local_server:    StringBuilder,
    dist_local:      Float64Builder,
    closest_server:  StringBuilder,
    dist_closest:    Float64Builder,
    is_mig_point:    BooleanBuilder,
    is_mig_zone:     BooleanBuilder,
}

impl DecisionColumns {
    fn push(&mut self, row: &DecisionRow) {
        self.time_secs.append_value(row.time_secs);
        self.tick.append_value(row.tick);
        self.device_id.append_value(row.device_id);
        self.policy.append_value(row.policy);
        self.pos_x.append_value(row.pos_x);
        self.pos_y.append_value(row.pos_y);
        self.direction.append_value(row.direction);
        self.speed.append_value(row.speed);
        self.source_ap.append_option(row.source_ap.as_deref());
        self.dist_source_ap.append_option(row.distance_to_source_ap);
        self.mig_time_secs.append_value(row.mig_time_secs);
        self.should_migrate.append_value(row.should_migrate);
        self.next_server.append_option(row.next_server.as_deref());
        self.next_ap.append_option(row.next_ap.as_deref());
        self.reason.append_value(row.reason);
        self.local_server.append_option(row.local_server.as_deref());
        self.dist_local.append_option(row.distance_to_local_server);
        self.closest_server.append_option(row.closest_server.as_deref());
        self.dist_closest.append_option(row.distance_to_closest_server);
        self.is_mig_point.append_value(row.is_mig_point);
        self.is_mig_zone.append_value(row.is_mig_zone);
    }

    fn finish(mut self, schema: Arc<Schema>) -> OutputResult<RecordBatch> {
        Ok(RecordBatch::try_new(
            schema,
            vec![
                Arc::new(self.time_secs.finish()),
                Arc::new(self.tick.finish()),
                Arc::new(self.device_id.finish()),
                Arc::new(self.policy.finish()),
                Arc::new(self.pos_x.finish()),
                Arc::new(self.pos_y.finish()),
                Arc::new(self.direction.finish()),
                Arc::new(self.speed.finish()),
                Arc::new(self.source_ap.finish()),
                Arc::new(self.dist_source_ap.finish()),
                Arc::new(self.mig_time_secs.finish()),
                Arc::new(self.should_migrate.finish()),
                Arc::new(self.next_server.finish()),
                Arc::new(self.next_ap.finish()),
                Arc::new(self.reason.finish()),
                Arc::new(self.local_server.finish()),
                Arc::new(self.dist_local.finish()),
                Arc::new(self.closest_server.finish()),
                Arc::new(self.dist_closest.finish()),
                Arc::new(self.is_mig_point.finish()),
                Arc::new(self.is_mig_zone.finish()),
            ],
        )?)
    }
}

impl RecordWriter for ParquetWriter {
    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.decisions.as_mut() else {
            return Ok(());
        };

        let mut cols = DecisionColumns::default();
        for row in rows {
            cols.push(row);
        }
        let batch = cols.finish(Arc::clone(&self.dec_schema))?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks     = UInt64Builder::new();
        let mut times     = Float64Builder::new();
        let mut evaluated = UInt64Builder::new();
        let mut migrated  = UInt64Builder::new();
        let mut handoffs  = UInt64Builder::new();

        ticks.append_value(row.tick);
        times.append_value(row.time_secs);
        evaluated.append_value(row.evaluated);
        migrated.append_value(row.migrated);
        handoffs.append_value(row.handoffs);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(times.finish()),
                Arc::new(evaluated.finish()),
                Arc::new(migrated.finish()),
                Arc::new(handoffs.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.decisions.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
