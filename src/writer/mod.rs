//! # Multi-Format Writer Module
//!
//! Encodes one [`Dataset`] into each of the seven fixture formats.
//!
//! ## Design Principles
//!
//! 1. **Independent Encoders**: Every format reads the same immutable dataset
//!    and shares no mutable state with the others, so they can run in any
//!    order or concurrently.
//!
//! 2. **One Sheet Model**: ODS and XLSX persist the same [`Sheet`], built once
//!    per run, so their cell contents cannot drift apart.
//!
//! 3. **Explicit Typing**: Only the Parquet encoder carries column types, and
//!    it takes them from a declared [`Schema`] rather than from the values.
//!
//! 4. **Atomic Output**: Each file is written to a staging file next to its
//!    target and renamed into place only after a successful flush.

mod columnar;
mod config;
mod delimited;
mod error;
mod format;
mod json;
mod ods;
mod sheet;
mod staging;
mod stats;
mod xlsx;
mod xml;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::schema::Schema;

pub use columnar::{write_columnar, ColumnarWriter};
pub use config::{ColumnarWriterConfig, CompressionType};
pub use delimited::{write_delimited, DelimitedWriter, COMMA, TAB};
pub use error::EncodeError;
pub use format::Format;
pub use json::{write_json_array, write_json_lines};
pub use ods::{write_ods, ODS_MIMETYPE};
pub use sheet::{Cell, Sheet, DEFAULT_SHEET_NAME};
pub use staging::write_atomically;
pub use stats::{ColumnarWriterStats, FileSummary};
pub use xlsx::{column_name, date_from_serial, date_serial, write_xlsx};

/// Everything an encoder may read during one run
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    /// Records to encode
    pub dataset: &'a Dataset,
    /// Declared column types for the Parquet encoder
    pub schema: &'a Schema,
    /// Sheet model shared by the spreadsheet encoders
    pub sheet: &'a Sheet,
    /// Parquet writer settings
    pub columnar: &'a ColumnarWriterConfig,
}

/// Target path for one format: `<dir>/<base_name>.<extension>`
pub fn output_path(dir: &Path, base_name: &str, format: Format) -> PathBuf {
    dir.join(format!("{}.{}", base_name, format.extension()))
}

/// Encode one format to `path`.
///
/// The file appears at `path` only if encoding succeeds; a previous file
/// at that path is replaced atomically.
pub fn encode(format: Format, ctx: &EncodeContext<'_>, path: &Path) -> Result<FileSummary, EncodeError> {
    log::debug!("Encoding {} to {}", format, path.display());

    let (records_written, file_size_bytes) = write_atomically(path, |w| match format {
        Format::Csv => write_delimited(ctx.dataset, w, COMMA),
        Format::Tsv => write_delimited(ctx.dataset, w, TAB),
        Format::Json => write_json_array(ctx.dataset, w),
        Format::JsonLines => write_json_lines(ctx.dataset, w),
        Format::Ods => {
            write_ods(ctx.sheet, w)?;
            Ok(ctx.sheet.record_count())
        }
        Format::Xlsx => {
            write_xlsx(ctx.sheet, w)?;
            Ok(ctx.sheet.record_count())
        }
        Format::Parquet => {
            write_columnar(ctx.dataset, ctx.schema, w, ctx.columnar).map(|s| s.records_written)
        }
    })?;

    Ok(FileSummary {
        format,
        path: path.to_path_buf(),
        records_written,
        file_size_bytes,
    })
}
