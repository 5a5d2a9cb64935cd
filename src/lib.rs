//! # userdata-fixtures - Multi-Format Test Data Generator
//!
//! `userdata_fixtures` generates a set of fake user records once and writes
//! it in seven formats, so file readers and import pipelines can be tested
//! against the same data in every encoding.
//!
//! ## Key Features
//!
//! - **Seven Encodings**: CSV, TSV, JSON array, JSON Lines, ODS, XLSX and
//!   Parquet, all from one immutable dataset.
//!
//! - **Hostile Field Names**: Names carry leading, trailing and embedded
//!   whitespace (including a tab) and are written literally everywhere.
//!
//! - **Typed Parquet Output**: An explicit schema narrows the routing number
//!   to Int64 and stores timestamps and flags natively.
//!
//! - **Reproducible**: Generation is seeded; the same seed yields the same
//!   files.
//!
//! - **Self-Checking**: A validator reads all seven files back and checks
//!   that they agree.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use userdata_fixtures::prelude::*;
//!
//! let mut generator = FakeUserGenerator::new(GeneratorConfig::default());
//! let dataset = generator.generate(DEFAULT_RECORD_COUNT)?;
//!
//! let exporter = Exporter::new(ExportConfig::default(), create_userdata_schema());
//! let written = exporter.run(&dataset)?.into_result()?;
//! for file in &written {
//!     println!("{}", file);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This creates:
//! ```text
//! testdata/
//! ├── userdata.csv
//! ├── userdata.tsv
//! ├── userdata.json
//! ├── userdata.jsonl
//! ├── userdata.ods
//! ├── userdata.xlsx
//! └── userdata.parquet
//! ```
//!
//! ## Architecture
//!
//! - [`dataset`]: values, records and the immutable record set
//! - [`generator`]: the record source trait and the fake-user generator
//! - [`schema`]: typed schema and coercion rules for the Parquet encoder
//! - [`writer`]: one encoder per format, plus atomic file staging
//! - [`export`]: runs the encoders and isolates their failures
//! - [`validator`]: reads a fixture set back and cross-checks it

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod dataset;
pub mod export;
pub mod generator;
pub mod schema;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::dataset::{Dataset, DatasetError, Record, Value, ValueKind};
    pub use crate::export::{ExportConfig, ExportError, ExportReport, Exporter, FormatStatus};
    pub use crate::generator::{
        fields, FakeUserGenerator, GenerationError, GeneratorConfig, RecordGenerator,
        DEFAULT_RECORD_COUNT,
    };
    pub use crate::schema::{create_userdata_schema, Schema, SchemaField, SchemaMismatch, WireType};
    pub use crate::validator::{validate_export, ValidationReport};
    pub use crate::writer::{
        encode, ColumnarWriterConfig, CompressionType, EncodeContext, EncodeError, FileSummary,
        Format, Sheet,
    };
}
