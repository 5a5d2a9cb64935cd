use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use userdata_fixtures::export::Exporter;
use userdata_fixtures::generator::{FakeUserGenerator, RecordGenerator};
use userdata_fixtures::schema::create_userdata_schema;
use userdata_fixtures::writer::Format;

use super::config::Config;

/// Flags of the `generate` subcommand, before merging with a config file
#[derive(Debug)]
pub struct GenerateArgs {
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    pub formats: Vec<Format>,
    pub fail_fast: bool,
    pub config: Option<PathBuf>,
    pub compression_level: Option<i32>,
    pub row_group_size: Option<usize>,
}

/// Generate the dataset and write every selected format
pub fn run(args: GenerateArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => {
            info!("Loading config from: {}", path.display());
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    let settings = file_config.resolve(&args);
    debug!("Resolved settings: {:?}", settings);

    let mut generator = FakeUserGenerator::new(settings.generator);
    let dataset = generator
        .generate(settings.count)
        .context("Failed to generate test data")?;
    println!("Generated {} test data rows", dataset.len());

    let exporter = Exporter::new(settings.export, create_userdata_schema());
    let report = exporter
        .run(&dataset)
        .context("Failed to start export")?;

    let written = report.into_result()?;
    info!(
        "Export complete: {} file(s) in {}",
        written.len(),
        exporter.config().output_dir.display()
    );
    for summary in &written {
        debug!("  {} ({} bytes)", summary.path.display(), summary.file_size_bytes);
    }

    Ok(())
}
