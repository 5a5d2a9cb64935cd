use std::collections::HashMap;

use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

/// Compression options for the Parquet fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression at the given level
    Zstd(i32),
    /// Snappy compression
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration for the Parquet fixture writer
#[derive(Debug, Clone)]
pub struct ColumnarWriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Maximum rows per row group; also the number of records buffered
    /// before a batch is handed to the Parquet writer
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Columns written without dictionary encoding, usually free text that
    /// is nearly unique per row
    pub plain_columns: Vec<String>,
}

impl Default for ColumnarWriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 10_000,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            plain_columns: Vec::new(),
        }
    }
}

impl ColumnarWriterConfig {
    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(&self, metadata: &HashMap<String, String>) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        for column in &self.plain_columns {
            builder =
                builder.set_column_dictionary_enabled(ColumnPath::new(vec![column.clone()]), false);
        }

        // Add key-value metadata, sorted so the footer is reproducible
        let mut kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();
        kv_metadata.sort_by(|a, b| a.key.cmp(&b.key));

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}
