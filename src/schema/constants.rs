/// Fixture format version - follows semantic versioning
pub const USERDATA_FORMAT_VERSION: &str = "1.0.0";

/// Metadata key for format version in the Parquet footer
pub const KEY_FORMAT_VERSION: &str = "userdata:format_version";

/// Metadata key for the number of records in the Parquet footer
pub const KEY_RECORD_COUNT: &str = "userdata:record_count";

/// Metadata key for the JSON-serialized typed schema in the Parquet footer
pub const KEY_SCHEMA: &str = "userdata:schema";

/// Field-level metadata key holding a human-readable column description
pub const KEY_DESCRIPTION: &str = "description";
