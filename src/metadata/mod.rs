//! # Metadata Module for triax
//!
//! Everything about a processed specimen that is not a per-reading column:
//! the raw metadata block, the computed specimen properties and stage
//! baseline, the stage configuration, provenance of the source log and the
//! processing history. [`TriaxMetadata`] flattens all of it into the Parquet
//! footer's key-value metadata and reads it back.

mod error;
mod processing;
mod source;
mod triax;

#[cfg(test)]
mod tests;

pub use error::MetadataError;
pub use processing::{ProcessingHistory, ProcessingStep};
pub use source::SourceFileInfo;
pub use triax::TriaxMetadata;
