//! # Derived Table Writer
//!
//! Writes the derived series of one specimen to a single Parquet file.
//!
//! 1. **Batched**: rows are converted column-major into Arrow record batches of
//!    [`WriterConfig::batch_size`] readings.
//! 2. **Self-Contained Files**: specimen properties, the stage baseline, the
//!    stage configuration and provenance are embedded in the Parquet footer's
//!    key_value_metadata (see [`crate::metadata::TriaxMetadata`]).
//! 3. **All or nothing**: [`write_derived_file`] writes through a temporary
//!    file, so a failed specimen never leaves a partial output.
//!    [`stage_derived_file`] stops before the rename so the table can be
//!    committed together with other outputs.

mod config;
mod error;
mod stats;
mod writer_impl;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, WriterConfig};
pub use error::WriterError;
pub use stats::WriterStats;
pub(crate) use writer_impl::staging_file;
pub use writer_impl::{stage_derived_file, write_derived_file, TriaxWriter};
