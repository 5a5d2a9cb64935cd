//! Delimiter-separated text (CSV and TSV).
//!
//! One header line with the literal field names, then one line per record.
//! A cell is wrapped in double quotes only when it contains the delimiter, a
//! double quote, or a line break; embedded quotes are doubled. Whitespace
//! inside names and values is never touched. Every line, the last one
//! included, ends with `\n`.
//!
//! Leading or trailing spaces alone do not trigger quoting, so the header
//! starts ` Name ,Phone Number ,...` rather than `" Name ","Phone Number ",...`
//! as some spreadsheet-oriented writers emit. Both forms read back to the
//! same names under RFC 4180.

use std::io::{self, Write};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::EncodeError;
use crate::dataset::{Dataset, Record};

/// Field delimiter for CSV
pub const COMMA: u8 = b',';
/// Field delimiter for TSV
pub const TAB: u8 = b'\t';

/// Streaming writer for delimiter-separated text
pub struct DelimitedWriter<W: Write> {
    writer: csv::Writer<W>,
    records_written: usize,
}

impl<W: Write> DelimitedWriter<W> {
    /// Create a writer with the given single-byte delimiter
    pub fn new(inner: W, delimiter: u8) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .quote(b'"')
            .double_quote(true)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .flexible(false)
            .from_writer(inner);

        Self {
            writer,
            records_written: 0,
        }
    }

    /// Write the header line
    pub fn write_header(&mut self, field_names: &[String]) -> Result<(), EncodeError> {
        self.writer.write_record(field_names)?;
        Ok(())
    }

    /// Write one record line, values in record order
    pub fn write_record(&mut self, record: &Record) -> Result<(), EncodeError> {
        for value in record.values() {
            self.writer.write_field(value.to_text().as_bytes())?;
        }
        self.writer.write_record(None::<&[u8]>)?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of record lines written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered output and return the inner writer
    pub fn finish(self) -> Result<W, EncodeError> {
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            EncodeError::IoError(io::Error::new(err.kind(), err.to_string()))
        })
    }
}

/// Write a whole dataset, header first. Returns the number of records written.
pub fn write_delimited<W: Write>(
    dataset: &Dataset,
    inner: W,
    delimiter: u8,
) -> Result<usize, EncodeError> {
    let mut writer = DelimitedWriter::new(inner, delimiter);
    writer.write_header(dataset.field_names())?;
    for record in dataset {
        writer.write_record(record)?;
    }
    let written = writer.records_written();
    writer.finish()?;
    Ok(written)
}
