//! # triax
//!
//! Command-line front end for the triax derivation pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a synthetic log
//! triax demo specimen.csv
//!
//! # Process logs (files or directories) into derived Parquet tables
//! triax process specimen.csv logs/ -o out --report
//!
//! # Inspect a derived table
//! triax info out/specimen.triax.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
