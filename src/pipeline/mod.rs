//! # Batch Pipeline
//!
//! Wires the components together for one specimen and for a batch:
//!
//! ```text
//! vendor log ──► ingest ──► SpecimenProperties ──► StageSegmenter ──► StageBaseline
//!                                                                          │
//!            CSV reports ◄── ReducedSeries ◄── DerivedRow series ◄─────────┘
//!                                                    │
//!                                                    └──► <stem>.triax.parquet
//! ```
//!
//! [`analyze`] is the pure, in-memory core. [`process_file`] adds ingestion and
//! the sinks. The sinks write to temporary files, and those are moved into the
//! output store only once all of them are complete. [`run_batch`] processes many files, isolating each one: a file
//! that errors or panics is logged and reported, and the batch moves on.

mod batch;
mod config;
mod error;
mod report;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::derive::{derive_rows, DerivedRow};
use crate::ingest::{IngestStats, RawReading, SpecimenMetadata, VendorLogReader};
use crate::metadata::{ProcessingHistory, ProcessingStep, SourceFileInfo, TriaxMetadata};
use crate::reduce::ReducedSeries;
use crate::report::{stage_reports, ReportPaths};
use crate::specimen::SpecimenProperties;
use crate::stage::{StageBaseline, StageSegmenter, StageSummary};
use crate::writer::{stage_derived_file, WriterStats};

pub use batch::{run_batch, FileOutcome, FileReport};
pub use config::{file_stem, ProcessingConfig};
pub use error::PipelineError;
pub use report::BatchReport;

/// Everything derived from one specimen's readings
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Specimen-level scalars
    pub properties: SpecimenProperties,
    /// Stage reference scalars
    pub baseline: StageBaseline,
    /// One derived row per reading
    pub rows: Vec<DerivedRow>,
    /// Reduced shear series
    pub reduced: ReducedSeries,
    /// Row count and time span per stage
    pub stages: Vec<StageSummary>,
}

/// Run the derivation core on in-memory readings.
///
/// Properties, segmentation, baseline, derivation and reduction run in that
/// order; none of them can fail.
pub fn analyze(
    readings: &[RawReading],
    metadata: &SpecimenMetadata,
    config: &ProcessingConfig,
) -> Analysis {
    let properties = SpecimenProperties::from_metadata(metadata);
    let segmenter = StageSegmenter::new(readings);
    let baseline = StageBaseline::extract(&segmenter, &config.stages, &properties);
    let rows = derive_rows(readings, &properties, &baseline, config.stages);
    let reduced = ReducedSeries::build(&rows, &config.stages, &config.reduction);

    Analysis {
        properties,
        baseline,
        rows,
        reduced,
        stages: segmenter.summaries(),
    }
}

/// Result of processing one file
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Derived Parquet file
    pub output: PathBuf,
    /// Report files, when enabled
    pub reports: Option<ReportPaths>,
    /// Ingestion counters
    pub ingest: IngestStats,
    /// Parquet writer statistics
    pub writer: WriterStats,
    /// Rows in the reduced shear series
    pub reduced_rows: usize,
    /// Number of inputs that used a fallback (defaulted metadata and baseline)
    pub fallbacks: usize,
}

/// Ingest, analyze and write one specimen file.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    config: &ProcessingConfig,
) -> Result<FileSummary, PipelineError> {
    config.stages.validate()?;
    std::fs::create_dir_all(output_dir)?;

    let log = VendorLogReader::new().read_path(input)?;
    info!(
        "{}: {} readings, {} metadata entries",
        input.display(),
        log.stats.rows,
        log.stats.metadata_entries
    );
    if log.stats.coerced_cells > 0 {
        warn!(
            "{}: {} cells could not be parsed and were set to 0",
            input.display(),
            log.stats.coerced_cells
        );
    }

    let analysis = analyze(&log.readings, &log.metadata, config);
    for summary in &analysis.stages {
        debug!(
            "{}: stage {} has {} rows ({}s..{}s)",
            input.display(),
            summary.stage,
            summary.rows,
            summary.first_time,
            summary.last_time
        );
    }
    let fallbacks = analysis.properties.defaulted.len() + analysis.baseline.fallbacks.len();
    if !analysis.properties.defaulted.is_empty() {
        warn!(
            "{}: specimen metadata defaulted: {}",
            input.display(),
            analysis.properties.defaulted.join(", ")
        );
    }
    if !analysis.baseline.fallbacks.is_empty() {
        warn!(
            "{}: baseline fallbacks {:?}",
            input.display(),
            analysis.baseline.fallbacks
        );
    }

    let mut history = ProcessingHistory::new();
    history.add_step(
        ProcessingStep::now("ingest")
            .with_parameter("rows", log.stats.rows)
            .with_parameter("coerced_cells", log.stats.coerced_cells),
    );
    history.add_step(
        ProcessingStep::now("derivation")
            .with_parameter("shear_start", config.stages.shear_start)
            .with_parameter("shear_end", config.stages.shear_end),
    );
    history.add_step(
        ProcessingStep::now("reduction")
            .with_parameter("dense_rows", config.reduction.dense_rows)
            .with_parameter("stride", config.reduction.stride),
    );

    let metadata = TriaxMetadata {
        specimen: log.metadata.clone(),
        properties: Some(analysis.properties.clone()),
        baseline: Some(analysis.baseline.clone()),
        stages: Some(config.stages),
        ingest_stats: Some(log.stats),
        source_file: Some(SourceFileInfo::from_path(input)?),
        processing_history: Some(history),
        ..TriaxMetadata::new()
    };

    let output = ProcessingConfig::output_path(input, output_dir);
    let (table, writer) =
        stage_derived_file(&output, &analysis.rows, &metadata, config.writer.clone())?;
    let mut pending = vec![(table, output.clone())];

    let reports = if config.report.enabled {
        let segmenter = StageSegmenter::new(&log.readings);
        let staged = stage_reports(
            output_dir,
            &file_stem(input),
            &analysis.reduced,
            &segmenter,
            &config.stages,
            &config.report,
        )?;
        let paths = staged.paths().clone();
        pending.extend(staged.into_pending());
        Some(paths)
    } else {
        None
    };

    commit(pending)?;

    info!("{}: {}", input.display(), writer);
    Ok(FileSummary {
        output,
        reports,
        ingest: log.stats,
        writer,
        reduced_rows: analysis.reduced.len(),
        fallbacks,
    })
}

/// Move every temporary output to its target, all or nothing.
///
/// On the first failed rename the targets already written are removed and the
/// remaining temporaries are dropped, which deletes them.
fn commit(pending: Vec<(NamedTempFile, PathBuf)>) -> Result<(), PipelineError> {
    let mut persisted: Vec<PathBuf> = Vec::with_capacity(pending.len());

    for (tmp, target) in pending {
        if let Err(err) = tmp.persist(&target) {
            for path in &persisted {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("Could not remove {}: {}", path.display(), e);
                }
            }
            return Err(PipelineError::Persist {
                path: target,
                source: err.error,
            });
        }
        persisted.push(target);
    }

    debug!("Persisted {} outputs", persisted.len());
    Ok(())
}
