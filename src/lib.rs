//! # triax - Stage-Based Quantity Derivation for Triaxial Soil Tests
//!
//! `triax` turns the raw time series recorded by a triaxial test rig into the
//! mechanical quantities a geotechnical engineer reports: strains, stresses,
//! void ratios, stress ratios and mobilised friction angles.
//!
//! ## Key Features
//!
//! - **Stage-Aware Derivation**: Readings are anchored to configured stages
//!   (saturation check, consolidation, shear). Small-strain formulas apply before
//!   shear onset and large-strain corrections afterwards.
//!
//! - **Two Area Corrections**: Every mechanical quantity is derived twice, from
//!   the measured volume change (side A) and from the final moisture content
//!   (side B), so the two can be compared row by row.
//!
//! - **Never Fails on Data**: Missing metadata and absent stages degrade to
//!   documented fallbacks, and every division is guarded. A derived table never
//!   contains NaN or infinity.
//!
//! - **Columnar Output**: One Apache Parquet file per specimen with ZSTD
//!   compression, the specimen properties and stage baseline embedded in the
//!   footer metadata.
//!
//! - **Batch Isolation**: A file that fails or panics is reported and skipped;
//!   the rest of the batch is still processed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use triax::pipeline::{process_file, ProcessingConfig};
//!
//! let config = ProcessingConfig::default();
//! let summary = process_file(Path::new("B12.csv"), Path::new("out"), &config)?;
//!
//! println!("{} -> {}", summary.writer, summary.output.display());
//! # Ok::<(), triax::pipeline::PipelineError>(())
//! ```
//!
//! ## In-Memory Analysis
//!
//! ```rust
//! use triax::ingest::VendorLogReader;
//! use triax::pipeline::{analyze, ProcessingConfig};
//! use triax::synthetic::SyntheticLog;
//!
//! let text = SyntheticLog::with_shear_rows(50).render();
//! let log = VendorLogReader::new().read(text.as_bytes())?;
//!
//! let analysis = analyze(&log.readings, &log.metadata, &ProcessingConfig::default());
//! assert_eq!(analysis.rows.len(), log.readings.len());
//!
//! let q = analysis.reduced.column("deviator_stress_a").unwrap_or_default();
//! assert_eq!(q.len(), analysis.reduced.len());
//! # Ok::<(), triax::ingest::IngestError>(())
//! ```
//!
//! ## Module Overview
//!
//! - [`ingest`]: vendor log reader and label normalisation
//! - [`specimen`]: specimen-level scalars
//! - [`stage`]: stage segmentation and baseline extraction
//! - [`derive`]: the per-row quantity derivation engine
//! - [`reduce`]: shear-series subsampling for reports
//! - [`schema`], [`metadata`], [`writer`]: the Parquet sink
//! - [`report`]: CSV reports
//! - [`pipeline`]: per-file processing and batch orchestration

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
// Allow some patterns common in scientific code
#![allow(clippy::too_many_arguments)]

pub mod derive;
pub mod guard;
pub mod ingest;
pub mod metadata;
pub mod pipeline;
pub mod reduce;
pub mod report;
pub mod schema;
pub mod specimen;
pub mod stage;
pub mod synthetic;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::derive::{derive_rows, AreaPolicy, DerivationEngine, DerivedRow, SideQuantities};
    pub use crate::guard::{guarded_divide, Quotient};
    pub use crate::ingest::{IngestError, IngestedLog, RawReading, SpecimenMetadata, VendorLogReader};
    pub use crate::metadata::{MetadataError, ProcessingHistory, SourceFileInfo, TriaxMetadata};
    pub use crate::pipeline::{
        analyze, process_file, run_batch, Analysis, BatchReport, FileSummary, PipelineError,
        ProcessingConfig,
    };
    pub use crate::reduce::{ReducedSeries, ReductionConfig};
    pub use crate::report::{stage_reports, write_reports, ReportConfig, ReportError, ReportPaths};
    pub use crate::schema::{columns, create_derived_schema, TRIAX_FORMAT_VERSION};
    pub use crate::specimen::SpecimenProperties;
    pub use crate::stage::{StageBaseline, StageConfig, StageSegmenter};
    pub use crate::writer::{CompressionType, TriaxWriter, WriterConfig, WriterError, WriterStats};
}
