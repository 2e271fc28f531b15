use std::path::PathBuf;

use crate::ingest::IngestError;
use crate::metadata::MetadataError;
use crate::report::ReportError;
use crate::stage::StageConfigError;
use crate::writer::WriterError;

/// Errors that abort processing of one specimen file
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The log could not be read or lacks required columns
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// The stage configuration is unusable
    #[error("Stage configuration error: {0}")]
    Stages(#[from] StageConfigError),

    /// Metadata could not be assembled
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// The Parquet output could not be written
    #[error("Writer error: {0}")]
    Writer(#[from] WriterError),

    /// A CSV report could not be written
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// A finished output could not be moved to its final path; every output
    /// of the file already moved was removed again
    #[error("Failed to persist {}: {source}", .path.display())]
    Persist {
        /// Final path of the output
        path: PathBuf,
        /// Underlying rename error
        source: std::io::Error,
    },

    /// I/O error outside the writers (e.g. creating the output directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Processing panicked; caught at the file boundary
    #[error("Processing panicked: {0}")]
    Panicked(String),
}
