//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every run can live in a file:
//!
//! ```toml
//! # fixtures.toml
//! [generation]
//! count = 500
//! seed = 7
//!
//! [export]
//! output_dir = "target/fixtures"
//! base_name = "users"
//! formats = ["csv", "jsonl", "parquet"]
//! fail_fast = true
//! compression_level = 9
//! row_group_size = 250
//! ```
//!
//! Command-line flags override the file; the file overrides the built-in
//! defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use userdata_fixtures::export::ExportConfig;
use userdata_fixtures::generator::{fields, GeneratorConfig, DEFAULT_RECORD_COUNT};
use userdata_fixtures::writer::{CompressionType, Format};

use super::GenerateArgs;

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Record generation settings.
    #[serde(default)]
    pub generation: GenerationSection,

    /// Output settings.
    #[serde(default)]
    pub export: ExportSection,
}

/// `[generation]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSection {
    /// Number of records.
    pub count: Option<usize>,

    /// RNG seed.
    pub seed: Option<u64>,
}

/// `[export]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    /// Output directory.
    pub output_dir: Option<PathBuf>,

    /// File stem shared by every format.
    pub base_name: Option<String>,

    /// Formats to write.
    pub formats: Option<Vec<Format>>,

    /// Stop at the first failing format.
    pub fail_fast: Option<bool>,

    /// ZSTD compression level for the Parquet fixture (1-22).
    pub compression_level: Option<i32>,

    /// Parquet row group size.
    pub row_group_size: Option<usize>,
}

/// Fully resolved settings for one `generate` run.
#[derive(Debug)]
pub struct Settings {
    pub count: usize,
    pub generator: GeneratorConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Layer command-line flags over this file over the defaults
    pub fn resolve(self, args: &GenerateArgs) -> Settings {
        let mut generator = GeneratorConfig::default();
        if let Some(seed) = args.seed.or(self.generation.seed) {
            generator.seed = seed;
        }

        let mut export = ExportConfig::default();
        if let Some(dir) = args.output_dir.clone().or(self.export.output_dir) {
            export.output_dir = dir;
        }
        if let Some(base) = args.base_name.clone().or(self.export.base_name) {
            export.base_name = base;
        }
        if !args.formats.is_empty() {
            export.formats = args.formats.clone();
        } else if let Some(formats) = self.export.formats {
            export.formats = formats;
        }
        export.fail_fast = args.fail_fast || self.export.fail_fast.unwrap_or(false);
        if let Some(level) = args.compression_level.or(self.export.compression_level) {
            export.columnar.compression = CompressionType::Zstd(level);
        }
        if let Some(size) = args.row_group_size.or(self.export.row_group_size) {
            export.columnar.row_group_size = size;
        }
        export.columnar.plain_columns = vec![fields::DESCRIPTION.to_string()];

        Settings {
            count: args
                .count
                .or(self.generation.count)
                .unwrap_or(DEFAULT_RECORD_COUNT),
            generator,
            export,
        }
    }
}
