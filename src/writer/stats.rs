use std::fmt;
use std::path::PathBuf;

use super::Format;

/// Summary of one finished fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Encoding of the file
    pub format: Format,
    /// Final location on disk
    pub path: PathBuf,
    /// Number of data records written (header rows excluded)
    pub records_written: usize,
    /// Total file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} ({} records, {} bytes)",
            self.path.display(),
            self.records_written,
            self.file_size_bytes
        )
    }
}

/// Statistics from a completed Parquet write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnarWriterStats {
    /// Number of records written
    pub records_written: usize,
    /// Number of record batches handed to the Parquet writer
    pub batches_written: usize,
    /// Number of Parquet row groups in the footer
    pub row_groups_written: usize,
}

impl fmt::Display for ColumnarWriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} records in {} row groups",
            self.records_written, self.row_groups_written
        )
    }
}
