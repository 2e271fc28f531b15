use anyhow::{bail, Context, Result};
use clap::Args;
use log::{info, warn};
use std::path::{Path, PathBuf};

use triax::pipeline::{run_batch, ProcessingConfig};

use super::config;

/// Extensions picked up when a directory is given as input
const LOG_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Stage and report flags that override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct StageOverrides {
    /// Write CSV reports next to each Parquet file
    #[arg(long)]
    pub report: bool,

    /// Saturation-check stage number
    #[arg(long, value_name = "N")]
    pub saturation: Option<i64>,

    /// Consolidation stage number
    #[arg(long, value_name = "N")]
    pub consolidation: Option<i64>,

    /// First shear stage number (also the last one unless --shear-end is given)
    #[arg(long, value_name = "N")]
    pub shear_start: Option<i64>,

    /// Last shear stage number, inclusive
    #[arg(long, value_name = "N")]
    pub shear_end: Option<i64>,
}

impl StageOverrides {
    /// Apply the flags that were given
    pub fn apply(&self, config: &mut ProcessingConfig) {
        if self.report {
            config.report.enabled = true;
        }
        if let Some(stage) = self.saturation {
            config.stages.saturation = stage;
        }
        if let Some(stage) = self.consolidation {
            config.stages.consolidation = stage;
        }
        if let Some(stage) = self.shear_start {
            config.stages.shear_start = stage;
            config.stages.shear_end = stage;
        }
        if let Some(stage) = self.shear_end {
            config.stages.shear_end = stage;
        }
    }
}

/// Process every input and print the batch report
pub fn run(
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
    overrides: StageOverrides,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            config::from_file(&path)?
        }
        None => ProcessingConfig::default(),
    };
    overrides.apply(&mut config);
    config
        .stages
        .validate()
        .context("Invalid stage configuration")?;

    let files = collect_inputs(&inputs)?;
    if files.is_empty() {
        bail!("No input logs found");
    }

    let report = run_batch(&files, &output_dir, &config);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if report.has_failures() {
        bail!(
            "{} of {} files failed",
            report.failure_count(),
            report.files.len()
        );
    }

    Ok(())
}

/// Expand directories into their log files, sorted by path.
///
/// Plain paths are passed through untouched so a missing file is reported by
/// the batch instead of aborting it.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(input)
                .with_context(|| format!("Failed to read directory: {}", input.display()))?
            {
                let path = entry?.path();
                if path.is_file() && is_log_file(&path) {
                    entries.push(path);
                }
            }
            if entries.is_empty() {
                warn!("No .csv or .txt files in {}", input.display());
            }
            entries.sort();
            files.extend(entries);
        } else {
            files.push(input.clone());
        }
    }

    Ok(files)
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| LOG_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
