use crate::schema::SchemaMismatch;

/// Errors that can occur while encoding a fixture file
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the delimited-text writer
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error serializing JSON
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error writing a spreadsheet XML part
    #[error("XML error: {0}")]
    XmlError(String),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// A record violates the typed schema
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),
}

impl EncodeError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        EncodeError::XmlError(err.to_string())
    }
}
