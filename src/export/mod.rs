//! # Export Orchestration
//!
//! Runs the selected encoders over one dataset and collects their outcomes.
//!
//! Encoders are independent: by default a failing format is logged and
//! reported while the remaining formats are still written. With
//! [`ExportConfig::fail_fast`] the run stops at the first failure and the
//! formats not yet started are reported as skipped. The run as a whole
//! succeeds only if every selected format was written.
//!
//! With the `parallel` feature the encoders run on the rayon thread pool;
//! they share the dataset and sheet by reference and nothing else.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::dataset::Dataset;
use crate::schema::Schema;
use crate::writer::{
    encode, output_path, ColumnarWriterConfig, EncodeContext, EncodeError, FileSummary, Format,
    Sheet, DEFAULT_SHEET_NAME,
};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "testdata";

/// Default file stem shared by every format
pub const DEFAULT_BASE_NAME: &str = "userdata";

/// Errors that abort or fail an export run
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The output directory could not be created
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        /// Directory that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The base name is empty or contains a path separator
    #[error("Invalid base name {0:?}: must be a non-empty file stem")]
    InvalidBaseName(String),

    /// No formats were selected
    #[error("No output formats selected")]
    NoFormats,

    /// One or more encoders failed
    #[error("{} of the selected formats failed: {}", .0.len(), FailureList(.0))]
    Failed(Vec<FormatFailure>),
}

/// One encoder that did not produce its file
#[derive(Debug, thiserror::Error)]
#[error("{format} ({}): {source}", .path.display())]
pub struct FormatFailure {
    /// Format that failed
    pub format: Format,
    /// Target path of the failed file
    pub path: PathBuf,
    /// Encoder error
    #[source]
    pub source: EncodeError,
}

struct FailureList<'a>(&'a [FormatFailure]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

/// Export settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the files are written into; created if missing
    pub output_dir: PathBuf,

    /// File stem shared by every format
    pub base_name: String,

    /// Formats to write, in order
    pub formats: Vec<Format>,

    /// Stop at the first failing format instead of isolating failures
    pub fail_fast: bool,

    /// Sheet name used by both spreadsheet containers
    pub sheet_name: String,

    /// Parquet writer settings
    pub columnar: ColumnarWriterConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_name: DEFAULT_BASE_NAME.to_string(),
            formats: Format::ALL.to_vec(),
            fail_fast: false,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            columnar: ColumnarWriterConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Target path of one format under this configuration
    pub fn path_for(&self, format: Format) -> PathBuf {
        output_path(&self.output_dir, &self.base_name, format)
    }

    /// Selected formats with duplicates removed, first occurrence wins
    pub fn unique_formats(&self) -> Vec<Format> {
        let mut formats = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }

    fn validate(&self) -> Result<(), ExportError> {
        let base = self.base_name.as_str();
        if base.is_empty() || base.contains(['/', '\\']) || base == "." || base == ".." {
            return Err(ExportError::InvalidBaseName(self.base_name.clone()));
        }
        if self.formats.is_empty() {
            return Err(ExportError::NoFormats);
        }
        Ok(())
    }
}

/// What happened to one format
#[derive(Debug)]
pub enum FormatStatus {
    /// The file was written
    Written(FileSummary),
    /// The encoder failed; no file was left at the target path
    Failed(EncodeError),
    /// Not attempted because an earlier format failed under fail-fast
    Skipped,
}

/// Outcome of one format in a run
#[derive(Debug)]
pub struct FormatOutcome {
    /// Format
    pub format: Format,
    /// Target path
    pub path: PathBuf,
    /// Result
    pub status: FormatStatus,
}

/// Outcomes of every selected format, in selection order
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Per-format outcomes
    pub outcomes: Vec<FormatOutcome>,
}

impl ExportReport {
    /// Summaries of the files that were written
    pub fn written(&self) -> impl Iterator<Item = &FileSummary> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FormatStatus::Written(summary) => Some(summary),
            _ => None,
        })
    }

    /// Number of formats that failed
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FormatStatus::Failed(_)))
            .count()
    }

    /// Number of formats skipped under fail-fast
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FormatStatus::Skipped))
            .count()
    }

    /// Whether every selected format was written
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, FormatStatus::Written(_)))
    }

    /// Written summaries, or every failure if any format failed
    pub fn into_result(self) -> Result<Vec<FileSummary>, ExportError> {
        let mut written = Vec::new();
        let mut failures = Vec::new();

        for outcome in self.outcomes {
            match outcome.status {
                FormatStatus::Written(summary) => written.push(summary),
                FormatStatus::Failed(source) => failures.push(FormatFailure {
                    format: outcome.format,
                    path: outcome.path,
                    source,
                }),
                FormatStatus::Skipped => {}
            }
        }

        if failures.is_empty() {
            Ok(written)
        } else {
            Err(ExportError::Failed(failures))
        }
    }
}

/// Writes a dataset in every selected format
pub struct Exporter {
    config: ExportConfig,
    schema: Schema,
}

impl Exporter {
    /// Create an exporter; `schema` types the Parquet output
    pub fn new(config: ExportConfig, schema: Schema) -> Self {
        Self { config, schema }
    }

    /// Export configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Write every selected format.
    ///
    /// Returns `Err` only when the run cannot start (bad configuration or an
    /// uncreatable output directory). Encoder failures are reported in the
    /// returned [`ExportReport`].
    pub fn run(&self, dataset: &Dataset) -> Result<ExportReport, ExportError> {
        self.config.validate()?;
        create_output_dir(&self.config.output_dir)?;

        let sheet = Sheet::from_dataset(self.config.sheet_name.as_str(), dataset);
        let ctx = EncodeContext {
            dataset,
            schema: &self.schema,
            sheet: &sheet,
            columnar: &self.config.columnar,
        };

        let formats = self.config.unique_formats();
        let outcomes = self.run_formats(&formats, &ctx);

        let report = ExportReport { outcomes };
        if report.skipped_count() > 0 {
            warn!(
                "Skipped {} format(s) after a failure (fail-fast)",
                report.skipped_count()
            );
        }
        Ok(report)
    }

    fn encode_one(&self, format: Format, ctx: &EncodeContext<'_>) -> FormatOutcome {
        let path = self.config.path_for(format);
        let status = match encode(format, ctx, &path) {
            Ok(summary) => {
                info!("Wrote {}", summary.path.display());
                FormatStatus::Written(summary)
            }
            Err(err) => {
                error!("Failed to write {} ({}): {}", path.display(), format, err);
                FormatStatus::Failed(err)
            }
        };
        FormatOutcome {
            format,
            path,
            status,
        }
    }

    fn skipped(&self, format: Format) -> FormatOutcome {
        FormatOutcome {
            format,
            path: self.config.path_for(format),
            status: FormatStatus::Skipped,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_formats(&self, formats: &[Format], ctx: &EncodeContext<'_>) -> Vec<FormatOutcome> {
        let mut outcomes = Vec::with_capacity(formats.len());
        let mut aborted = false;

        for &format in formats {
            if aborted {
                outcomes.push(self.skipped(format));
                continue;
            }
            let outcome = self.encode_one(format, ctx);
            aborted = self.config.fail_fast && matches!(outcome.status, FormatStatus::Failed(_));
            outcomes.push(outcome);
        }

        outcomes
    }

    #[cfg(feature = "parallel")]
    fn run_formats(&self, formats: &[Format], ctx: &EncodeContext<'_>) -> Vec<FormatOutcome> {
        use rayon::prelude::*;
        use std::sync::atomic::{AtomicBool, Ordering};

        let aborted = AtomicBool::new(false);

        // Encoders already running when another fails are allowed to finish
        formats
            .par_iter()
            .map(|&format| {
                if aborted.load(Ordering::Acquire) {
                    return self.skipped(format);
                }
                let outcome = self.encode_one(format, ctx);
                if self.config.fail_fast && matches!(outcome.status, FormatStatus::Failed(_)) {
                    aborted.store(true, Ordering::Release);
                }
                outcome
            })
            .collect()
    }
}

fn create_output_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::schema::{SchemaField, WireType};
    use tempfile::tempdir;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record::new().field("Name", "Alice").field("Routing", "011000015"),
            Record::new().field("Name", "Bob").field("Routing", "021000021"),
        ])
        .unwrap()
    }

    fn schema() -> Schema {
        Schema::new(vec![
            SchemaField::new("Name", WireType::Utf8),
            SchemaField::new("Routing", WireType::Int64),
        ])
    }

    fn config(dir: &Path) -> ExportConfig {
        ExportConfig {
            output_dir: dir.join("out"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("testdata"));
        assert_eq!(config.path_for(Format::Xlsx), PathBuf::from("testdata/userdata.xlsx"));
        assert_eq!(config.formats.len(), 7);
        assert!(!config.fail_fast);
        assert_eq!(config.sheet_name, "Sheet 1");
    }

    #[test]
    fn test_run_writes_all_formats() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(config(dir.path()), schema());

        let report = exporter.run(&dataset()).unwrap();
        assert!(report.is_success());
        assert_eq!(report.written().count(), 7);

        let summaries = report.into_result().unwrap();
        for summary in &summaries {
            assert!(summary.path.exists());
            assert_eq!(summary.records_written, 2);
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let dir = tempdir().unwrap();
        let bad = Dataset::from_records(vec![Record::new()
            .field("Name", "Alice")
            .field("Routing", "not digits")])
        .unwrap();
        let exporter = Exporter::new(config(dir.path()), schema());

        let report = exporter.run(&bad).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.written().count(), 6);
        assert!(!dir.path().join("out/userdata.parquet").exists());
        assert!(dir.path().join("out/userdata.csv").exists());

        match report.into_result() {
            Err(ExportError::Failed(failures)) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].format, Format::Parquet);
                assert!(failures[0].to_string().contains("userdata.parquet"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_fail_fast_skips_remaining() {
        let dir = tempdir().unwrap();
        let bad = Dataset::from_records(vec![Record::new()
            .field("Name", "Alice")
            .field("Routing", "x")])
        .unwrap();
        let config = ExportConfig {
            formats: vec![Format::Csv, Format::Parquet, Format::Json],
            fail_fast: true,
            ..config(dir.path())
        };

        let report = Exporter::new(config, schema()).run(&bad).unwrap();
        assert_eq!(report.written().count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert!(!dir.path().join("out/userdata.json").exists());
    }

    #[test]
    fn test_duplicate_formats_written_once() {
        let config = ExportConfig {
            formats: vec![Format::Csv, Format::Tsv, Format::Csv],
            ..Default::default()
        };
        assert_eq!(config.unique_formats(), vec![Format::Csv, Format::Tsv]);
    }

    #[test]
    fn test_invalid_configuration() {
        let dir = tempdir().unwrap();
        let bad_name = ExportConfig {
            base_name: "a/b".to_string(),
            ..config(dir.path())
        };
        assert!(matches!(
            Exporter::new(bad_name, schema()).run(&dataset()),
            Err(ExportError::InvalidBaseName(_))
        ));

        let no_formats = ExportConfig {
            formats: Vec::new(),
            ..config(dir.path())
        };
        assert!(matches!(
            Exporter::new(no_formats, schema()).run(&dataset()),
            Err(ExportError::NoFormats)
        ));
    }

    #[test]
    fn test_output_dir_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let config = ExportConfig {
            output_dir: blocker.join("sub"),
            ..Default::default()
        };

        assert!(matches!(
            Exporter::new(config, schema()).run(&dataset()),
            Err(ExportError::OutputDir { .. })
        ));
    }
}
