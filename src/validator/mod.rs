//! # Fixture Validation Module
//!
//! Reads an exported fixture set back and checks that the seven files agree
//! with each other and with the declared schema.
//!
//! ## Validation Checklist
//!
//! 1. **Presence**: one file per format under `<dir>/<base_name>.<ext>`
//! 2. **Containers**: ODS `mimetype` first and stored; XLSX package parts
//! 3. **Parquet Contract**: declared column types, footer version and count
//! 4. **Contents**: field order, record count, and cell-by-cell agreement
//!    with the JSON array (Parquet compared after Int64 narrowing)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use userdata_fixtures::schema::create_userdata_schema;
//! use userdata_fixtures::validator::validate_export;
//! use std::path::Path;
//!
//! let report = validate_export(Path::new("testdata"), "userdata", &create_userdata_schema(), Some(1000))?;
//! println!("{}", report);
//! # Ok::<(), userdata_fixtures::validator::ValidationError>(())
//! ```

use std::path::Path;

pub use readers::{read_parquet, read_table, ParquetTable, Table};
pub use report::{CheckStatus, ValidationCheck, ValidationReport};

use crate::schema::Schema;
use crate::writer::Format;

mod data;
mod readers;
mod report;
mod schema;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Error in directory structure
    #[error("Structure error: {0}")]
    StructureError(String),

    /// File content does not follow its format
    #[error("Malformed content: {0}")]
    MalformedError(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the delimited-text reader
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error parsing JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error opening a ZIP container
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error parsing a spreadsheet XML part
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Malformed XML attribute
    #[error("XML attribute error: {0}")]
    XmlAttrError(#[from] quick_xml::events::attributes::AttrError),

    /// Error from the Arrow library
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),
}

/// Main validation entry point.
///
/// `expected_rows` is the record count the set was generated with; when
/// `None`, every file is compared against the JSON array's count. Problems
/// found in the files are reported as failed checks; `Err` means the
/// directory itself could not be inspected.
pub fn validate_export(
    dir: &Path,
    base_name: &str,
    schema: &Schema,
    expected_rows: Option<usize>,
) -> Result<ValidationReport, ValidationError> {
    if !dir.is_dir() {
        return Err(ValidationError::StructureError(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut report = ValidationReport::new(dir.join(base_name).display().to_string());

    // 1. Presence
    let files = structure::check_files_present(dir, base_name, &mut report);

    // 2. Containers
    structure::check_containers(&files, &mut report);

    // 3. Parquet contract, while reading every file back
    let mut tables = Vec::with_capacity(files.len());
    for (format, path) in &files {
        let table = match format {
            Format::Parquet => readers::read_parquet(path).map(|parquet| {
                schema::check_parquet_contract(&parquet, schema, &mut report);
                parquet.table
            }),
            _ => readers::read_table(*format, path),
        };

        let name = format!("{} readable", format);
        match table {
            Ok(table) => {
                report.add_check(ValidationCheck::ok(name));
                tables.push((*format, table));
            }
            Err(e) => report.add_check(ValidationCheck::failed(name, e.to_string())),
        }
    }

    // 4. Contents
    data::check_contents(&tables, schema, expected_rows, &mut report);

    log::debug!(
        "Validated {}: {} passed, {} failed",
        report.target,
        report.success_count(),
        report.failure_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::dataset::Dataset;
    use crate::export::{ExportConfig, Exporter};
    use crate::schema::{SchemaField, WireType};
    use chrono::{TimeZone, Utc};

    fn export(dir: &Path) -> Schema {
        let ts = Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap();
        let dataset = Dataset::from_records(vec![
            Record::new()
                .field(" Name ", "Smith, \"J\"")
                .field("Routing", "011000015")
                .field("Created At ", ts)
                .field("Activated", true),
            Record::new()
                .field(" Name ", "  two\tlines\nhere ")
                .field("Routing", "021000021")
                .field("Created At ", ts)
                .field("Activated", false),
        ])
        .unwrap();
        let schema = Schema::new(vec![
            SchemaField::new(" Name ", WireType::Utf8),
            SchemaField::new("Routing", WireType::Int64),
            SchemaField::new("Created At ", WireType::TimestampMillis),
            SchemaField::new("Activated", WireType::Boolean),
        ]);

        let config = ExportConfig {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        };
        Exporter::new(config, schema.clone())
            .run(&dataset)
            .unwrap()
            .into_result()
            .unwrap();
        schema
    }

    #[test]
    fn test_valid_export_passes() {
        let dir = tempfile::tempdir().unwrap();
        let schema = export(dir.path());

        let report = validate_export(dir.path(), "userdata", &schema, Some(2)).unwrap();
        assert!(!report.has_failures(), "{}", report);
        assert!(!report.has_warnings(), "{}", report);
    }

    #[test]
    fn test_missing_and_tampered_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        let schema = export(dir.path());

        std::fs::remove_file(dir.path().join("userdata.xlsx")).unwrap();
        std::fs::write(dir.path().join("userdata.tsv"), " Name \tRouting\n").unwrap();

        let report = validate_export(dir.path(), "userdata", &schema, Some(2)).unwrap();
        let failed: Vec<&str> = report.failures().map(|c| c.name.as_str()).collect();

        assert!(failed.contains(&"xlsx file exists"));
        assert!(failed.contains(&"tsv field order"));
        assert!(failed.contains(&"tsv record count"));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let schema = Schema::new(Vec::new());
        assert!(matches!(
            validate_export(&dir.path().join("nope"), "userdata", &schema, None),
            Err(ValidationError::StructureError(_))
        ));
    }
}
