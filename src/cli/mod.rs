use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod demo;
mod info;
mod process;

pub use process::StageOverrides;

/// triax - Stage-based quantity derivation for triaxial soil-test logs
#[derive(Parser)]
#[command(name = "triax")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process vendor logs into derived Parquet tables
    Process {
        /// Input log files or directories (directories contribute their .csv/.txt files)
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: StageOverrides,
    },

    /// Generate a synthetic vendor log for trying the pipeline
    Demo {
        /// Output log path
        #[arg(value_name = "OUTPUT", default_value = "demo_specimen.csv")]
        output: PathBuf,

        /// Number of shear-stage readings
        #[arg(long, default_value_t = 120)]
        shear_rows: usize,
    },

    /// Display information about a derived Parquet file
    Info {
        /// Input .triax.parquet file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            inputs,
            output_dir,
            config,
            overrides,
        } => process::run(inputs, output_dir, config, overrides),
        Commands::Demo { output, shear_rows } => demo::run(output, shear_rows),
        Commands::Info { file } => info::run(file),
    }
}
