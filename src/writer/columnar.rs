//! # Typed Columnar Writer
//!
//! Writes a [`Dataset`] to Parquet using an explicit [`Schema`].
//!
//! Each record is coerced column by column before it is buffered, so a
//! record that violates the schema fails the write with
//! [`SchemaMismatch`](crate::schema::SchemaMismatch) before anything of it
//! reaches the file. Buffered rows are flushed as one record batch per
//! `row_group_size` records; the footer is written only by [`finish`].
//!
//! [`finish`]: ColumnarWriter::finish

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Int64Builder, StringBuilder, TimestampMillisecondBuilder};
use arrow::datatypes::Schema as ArrowSchema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::{ColumnarWriterConfig, ColumnarWriterStats, EncodeError};
use crate::dataset::{Dataset, Record};
use crate::schema::{
    coerce_record, validate_field_order, Coerced, Schema, WireType, KEY_FORMAT_VERSION,
    KEY_RECORD_COUNT, KEY_SCHEMA, USERDATA_FORMAT_VERSION,
};

/// One Arrow builder per declared column
enum ColumnBuilder {
    Utf8(StringBuilder),
    Int64(Int64Builder),
    Boolean(BooleanBuilder),
    TimestampMillis(TimestampMillisecondBuilder),
}

impl ColumnBuilder {
    fn new(wire_type: WireType, capacity: usize) -> Self {
        match wire_type {
            WireType::Utf8 => ColumnBuilder::Utf8(StringBuilder::with_capacity(capacity, capacity * 32)),
            WireType::Int64 => ColumnBuilder::Int64(Int64Builder::with_capacity(capacity)),
            WireType::Boolean => ColumnBuilder::Boolean(BooleanBuilder::with_capacity(capacity)),
            WireType::TimestampMillis => ColumnBuilder::TimestampMillis(
                TimestampMillisecondBuilder::with_capacity(capacity).with_timezone("UTC"),
            ),
        }
    }

    /// Append a value that has already been coerced to this column's type
    fn append(&mut self, value: Coerced<'_>) {
        match (self, value) {
            (ColumnBuilder::Utf8(b), Coerced::Utf8(s)) => b.append_value(s),
            (ColumnBuilder::Int64(b), Coerced::Int64(v)) => b.append_value(v),
            (ColumnBuilder::Boolean(b), Coerced::Boolean(v)) => b.append_value(v),
            (ColumnBuilder::TimestampMillis(b), Coerced::TimestampMillis(v)) => b.append_value(v),
            // coerce_record yields values in schema order and type
            _ => unreachable!("coerced value does not match its column builder"),
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Utf8(b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::Boolean(b) => Arc::new(b.finish()),
            ColumnBuilder::TimestampMillis(b) => Arc::new(b.finish()),
        }
    }
}

/// Streaming Parquet writer for schema-typed records
pub struct ColumnarWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Schema,
    arrow_schema: Arc<ArrowSchema>,
    builders: Vec<ColumnBuilder>,
    batch_size: usize,
    buffered: usize,
    records_written: usize,
    batches_written: usize,
}

impl<W: Write + Send> ColumnarWriter<W> {
    /// Create a writer to any Write implementation.
    ///
    /// `expected_records` is recorded in the footer as
    /// `userdata:record_count`; the footer must be fixed before the first
    /// row group is written.
    pub fn new(
        writer: W,
        schema: &Schema,
        expected_records: usize,
        config: &ColumnarWriterConfig,
    ) -> Result<Self, EncodeError> {
        let arrow_schema = schema.to_arrow_arc();

        let mut metadata = HashMap::new();
        metadata.insert(KEY_FORMAT_VERSION.to_string(), USERDATA_FORMAT_VERSION.to_string());
        metadata.insert(KEY_RECORD_COUNT.to_string(), expected_records.to_string());
        metadata.insert(KEY_SCHEMA.to_string(), serde_json::to_string(schema)?);
        let props = config.to_writer_properties(&metadata);

        let arrow_writer = ArrowWriter::try_new(writer, arrow_schema.clone(), Some(props))?;
        let batch_size = config.row_group_size.max(1);
        let capacity = batch_size.min(expected_records.max(1));

        Ok(Self {
            writer: arrow_writer,
            builders: Self::new_builders(schema, capacity),
            schema: schema.clone(),
            arrow_schema,
            batch_size,
            buffered: 0,
            records_written: 0,
            batches_written: 0,
        })
    }

    fn new_builders(schema: &Schema, capacity: usize) -> Vec<ColumnBuilder> {
        schema
            .fields()
            .iter()
            .map(|f| ColumnBuilder::new(f.wire_type(), capacity))
            .collect()
    }

    /// Coerce and buffer one record; flushes a batch when the buffer is full
    pub fn write_record(&mut self, record: &Record) -> Result<(), EncodeError> {
        let values = coerce_record(&self.schema, self.records_written, record)?;
        for (builder, value) in self.builders.iter_mut().zip(values) {
            builder.append(value);
        }

        self.buffered += 1;
        self.records_written += 1;

        if self.buffered >= self.batch_size {
            self.flush_batch()?;
        }
        Ok(())
    }

    fn flush_batch(&mut self) -> Result<(), EncodeError> {
        if self.buffered == 0 {
            return Ok(());
        }

        let arrays: Vec<ArrayRef> = self.builders.iter_mut().map(ColumnBuilder::finish).collect();
        let batch = RecordBatch::try_new(self.arrow_schema.clone(), arrays)?;
        self.writer.write(&batch)?;

        self.buffered = 0;
        self.batches_written += 1;
        Ok(())
    }

    /// Number of records accepted so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered rows and write the footer
    pub fn finish(mut self) -> Result<ColumnarWriterStats, EncodeError> {
        self.flush_batch()?;
        let file_metadata = self.writer.close()?;

        Ok(ColumnarWriterStats {
            records_written: self.records_written,
            batches_written: self.batches_written,
            row_groups_written: file_metadata.row_groups.len(),
        })
    }
}

/// Write a whole dataset as Parquet.
///
/// The schema must enumerate exactly the dataset's fields, in order.
pub fn write_columnar<W: Write + Send>(
    dataset: &Dataset,
    schema: &Schema,
    writer: W,
    config: &ColumnarWriterConfig,
) -> Result<ColumnarWriterStats, EncodeError> {
    validate_field_order(schema, dataset.field_names())?;

    let mut writer = ColumnarWriter::new(writer, schema, dataset.len(), config)?;
    for record in dataset {
        writer.write_record(record)?;
    }
    let stats = writer.finish()?;

    log::debug!("{}", stats);
    Ok(stats)
}
