use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use userdata_fixtures::writer::Format;

mod config;
mod generate;
mod validate;

pub use generate::GenerateArgs;

/// userdata-fixtures - one fake user dataset, seven fixture formats
#[derive(Parser)]
#[command(name = "userdata-fixtures")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Comma-delimited text
    Csv,
    /// Tab-delimited text
    Tsv,
    /// JSON array of objects
    Json,
    /// One JSON object per line
    Jsonl,
    /// OpenDocument spreadsheet
    Ods,
    /// Office Open XML spreadsheet
    Xlsx,
    /// Typed Parquet file
    Parquet,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Format::Csv,
            FormatArg::Tsv => Format::Tsv,
            FormatArg::Json => Format::Json,
            FormatArg::Jsonl => Format::JsonLines,
            FormatArg::Ods => Format::Ods,
            FormatArg::Xlsx => Format::Xlsx,
            FormatArg::Parquet => Format::Parquet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset and write it in every selected format
    Generate {
        /// Number of records to generate (default: 1000)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// RNG seed; the same seed produces the same files (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory (default: testdata)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// File stem shared by every format (default: userdata)
        #[arg(short, long)]
        base_name: Option<String>,

        /// Formats to write; repeat for several (default: all seven)
        #[arg(short, long = "format", value_enum)]
        formats: Vec<FormatArg>,

        /// Stop at the first failing format instead of writing the rest
        #[arg(long)]
        fail_fast: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        // === Advanced tuning flags (hidden from --help) ===
        /// Compression level for ZSTD (1-22, default: 3)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i32>,

        /// Row group size for the Parquet fixture
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,
    },

    /// Validate an existing fixture set
    Validate {
        /// Directory holding the fixture files
        #[arg(value_name = "DIR", default_value = "testdata")]
        dir: PathBuf,

        /// File stem shared by every format
        #[arg(short, long, default_value = "userdata")]
        base_name: String,

        /// Record count the set was generated with (default: taken from the JSON file)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            count,
            seed,
            output_dir,
            base_name,
            formats,
            fail_fast,
            config,
            compression_level,
            row_group_size,
        } => generate::run(GenerateArgs {
            count,
            seed,
            output_dir,
            base_name,
            formats: formats.into_iter().map(Format::from).collect(),
            fail_fast,
            config,
            compression_level,
            row_group_size,
        }),
        Commands::Validate {
            dir,
            base_name,
            count,
        } => validate::run(dir, base_name, count),
    }
}
