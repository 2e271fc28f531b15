use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use triax::synthetic::SyntheticLog;

/// Generate a synthetic vendor log
pub fn run(output: PathBuf, shear_rows: usize) -> Result<()> {
    info!("triax - Synthetic Triaxial Log");
    info!("==============================");

    let log = SyntheticLog::with_shear_rows(shear_rows);

    let file = File::create(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    log.write_to(BufWriter::new(file))
        .context("Failed to write synthetic log")?;

    info!("  Output file: {}", output.display());
    info!("  Readings: {}", log.row_count());
    info!(
        "  Stages: setup, saturation {}, consolidation {}, shear {}",
        log.stages.saturation, log.stages.consolidation, log.stages.shear_start
    );

    println!("Wrote {} readings to {}", log.row_count(), output.display());
    println!("Process it with:");
    println!("  triax process {} --report -o out", output.display());

    Ok(())
}
