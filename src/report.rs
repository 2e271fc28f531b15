//! # CSV Reports
//!
//! Writes the slices a reporting template needs for one specimen:
//!
//! | File | Content |
//! |------|---------|
//! | `<stem>_shear.csv` | the reduced shear series, [`SHEAR_COLUMNS`] |
//! | `<stem>_consolidation.csv` | every consolidation reading, [`CONSOLIDATION_COLUMNS`] |
//! | `<stem>_saturation.csv` | the first saturation-check readings, [`SATURATION_COLUMNS`] |
//!
//! Column order is fixed. An empty slice produces a header-only file.
//! [`stage_reports`] writes the three files to temporaries and
//! [`StagedReports::persist`] moves them into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::ingest::RawReading;
use crate::reduce::ReducedSeries;
use crate::schema::columns;
use crate::stage::{StageConfig, StageSegmenter};
use crate::writer::staging_file;

/// Default number of saturation-check rows reported
pub const DEFAULT_SATURATION_ROWS: usize = 5;

/// Shear report columns
pub const SHEAR_COLUMNS: [&str; 19] = [
    columns::STAGE,
    columns::TIME_TEST,
    columns::AXIAL_STRAIN,
    columns::EFFECTIVE_RADIAL_STRESS,
    columns::EXCESS_PORE_PRESSURE,
    "volumetric_strain_a",
    "deviator_stress_a",
    "mean_effective_stress_a",
    "stress_ratio_a",
    "friction_angle_a",
    "void_ratio_a",
    "average_effective_stress_a",
    "volumetric_strain_b",
    "deviator_stress_b",
    "mean_effective_stress_b",
    "stress_ratio_b",
    "friction_angle_b",
    "void_ratio_b",
    "average_effective_stress_b",
];

/// Consolidation report columns
pub const CONSOLIDATION_COLUMNS: [&str; 6] = [
    columns::TIME_STAGE,
    columns::AXIAL_DISPLACEMENT,
    columns::BACK_VOLUME,
    columns::BACK_PRESSURE,
    columns::RADIAL_PRESSURE,
    columns::PORE_PRESSURE,
];

/// Saturation-check report columns
pub const SATURATION_COLUMNS: [&str; 5] = [
    columns::TIME_STAGE,
    columns::RADIAL_PRESSURE,
    columns::BACK_PRESSURE,
    columns::PORE_PRESSURE,
    columns::BACK_VOLUME,
];

/// Errors that can occur while writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error creating a report file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A report column is not produced by the derivation
    #[error("Unknown report column: {0}")]
    UnknownColumn(String),

    /// A finished report could not be moved to its final path
    #[error("Failed to persist report: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

/// Report settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Whether reports are written at all
    pub enabled: bool,
    /// Leading saturation-check rows to include
    pub saturation_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            saturation_rows: DEFAULT_SATURATION_ROWS,
        }
    }
}

/// Paths of the written report files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Reduced shear series
    pub shear: PathBuf,
    /// Full consolidation stage
    pub consolidation: PathBuf,
    /// Leading saturation-check rows
    pub saturation: PathBuf,
}

impl ReportPaths {
    /// Report paths for `stem` inside `dir`
    pub fn new(dir: &Path, stem: &str) -> Self {
        Self {
            shear: dir.join(format!("{stem}_shear.csv")),
            consolidation: dir.join(format!("{stem}_consolidation.csv")),
            saturation: dir.join(format!("{stem}_saturation.csv")),
        }
    }
}

/// Reports written to temporary files beside their final paths.
///
/// Dropping this value deletes the temporaries.
#[derive(Debug)]
pub struct StagedReports {
    paths: ReportPaths,
    shear: NamedTempFile,
    consolidation: NamedTempFile,
    saturation: NamedTempFile,
}

impl StagedReports {
    /// Final paths the reports will be persisted to
    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    /// Move every report to its final path.
    ///
    /// Stops at the first failure; reports already moved stay in place.
    pub fn persist(self) -> Result<ReportPaths, ReportError> {
        let paths = self.paths.clone();
        for (tmp, target) in self.into_pending() {
            tmp.persist(&target)?;
        }
        Ok(paths)
    }

    /// Temporaries paired with their targets, in shear, consolidation,
    /// saturation order
    pub fn into_pending(self) -> [(NamedTempFile, PathBuf); 3] {
        let ReportPaths {
            shear,
            consolidation,
            saturation,
        } = self.paths;
        [
            (self.shear, shear),
            (self.consolidation, consolidation),
            (self.saturation, saturation),
        ]
    }
}

/// Write all three reports for one specimen into temporary files in `dir`.
pub fn stage_reports(
    dir: &Path,
    stem: &str,
    reduced: &ReducedSeries,
    segmenter: &StageSegmenter<'_>,
    stages: &StageConfig,
    config: &ReportConfig,
) -> Result<StagedReports, ReportError> {
    let paths = ReportPaths::new(dir, stem);

    let shear = staging_file(&paths.shear)?;
    write_shear(shear.as_file(), reduced)?;

    let consolidation_rows = segmenter.stage(stages.consolidation);
    let consolidation = staging_file(&paths.consolidation)?;
    write_raw(
        consolidation.as_file(),
        &CONSOLIDATION_COLUMNS,
        consolidation_rows.iter(),
    )?;

    let saturation = staging_file(&paths.saturation)?;
    write_raw(
        saturation.as_file(),
        &SATURATION_COLUMNS,
        segmenter
            .stage(stages.saturation)
            .iter()
            .take(config.saturation_rows),
    )?;

    debug!(
        "Wrote reports for {}: {} shear, {} consolidation rows",
        stem,
        reduced.len(),
        consolidation_rows.len()
    );
    Ok(StagedReports {
        paths,
        shear,
        consolidation,
        saturation,
    })
}

/// Write all three reports for one specimen and persist them.
pub fn write_reports(
    dir: &Path,
    stem: &str,
    reduced: &ReducedSeries,
    segmenter: &StageSegmenter<'_>,
    stages: &StageConfig,
    config: &ReportConfig,
) -> Result<ReportPaths, ReportError> {
    stage_reports(dir, stem, reduced, segmenter, stages, config)?.persist()
}

/// Write the reduced shear series in [`SHEAR_COLUMNS`] order.
pub fn write_shear<W: Write>(out: W, reduced: &ReducedSeries) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(SHEAR_COLUMNS)?;

    for row in reduced.rows() {
        let mut record = Vec::with_capacity(SHEAR_COLUMNS.len());
        record.push(row.stage().to_string());
        for name in &SHEAR_COLUMNS[1..] {
            let value = row
                .value(name)
                .ok_or_else(|| ReportError::UnknownColumn(name.to_string()))?;
            record.push(value.to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write raw readings with the given fixed column order.
pub fn write_raw<'a, W, I>(out: W, names: &[&str], readings: I) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = &'a RawReading>,
{
    let fields = names
        .iter()
        .map(|name| {
            crate::ingest::Field::ALL
                .into_iter()
                .find(|f| f.name() == *name)
                .ok_or_else(|| ReportError::UnknownColumn(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(names)?;

    for reading in readings {
        writer.write_record(fields.iter().map(|&f| reading.get(f).to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
