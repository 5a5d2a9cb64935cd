//! # userdata-fixtures
//!
//! Command-line front end: generates the fake user dataset, writes it in
//! every fixture format, and validates an existing fixture set.
//!
//! ## Usage
//!
//! ```bash
//! # Write testdata/userdata.{csv,tsv,json,jsonl,ods,xlsx,parquet}
//! userdata-fixtures generate
//!
//! # Smaller set, different seed, only two formats
//! userdata-fixtures generate -n 50 --seed 7 -f csv -f parquet
//!
//! # Read the files back and check that they agree
//! userdata-fixtures validate testdata
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
