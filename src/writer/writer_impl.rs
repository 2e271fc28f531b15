use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, Int64Builder};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;
use tempfile::NamedTempFile;

use crate::derive::DerivedRow;
use crate::metadata::TriaxMetadata;
use crate::schema::create_derived_schema_arc;

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Streaming writer for derived Parquet files
pub struct TriaxWriter<W: Write + Send> {
    writer: ArrowWriter<W>,
    schema: Arc<Schema>,
    batch_size: usize,
    rows_written: usize,
    stages: BTreeSet<i64>,
}

impl<W: Write + Send> TriaxWriter<W> {
    /// Create a new writer to any Write implementation
    pub fn new(
        writer: W,
        metadata: &TriaxMetadata,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = create_derived_schema_arc();
        let parquet_metadata = metadata.to_parquet_metadata()?;
        let props = config.to_writer_properties(&parquet_metadata);

        let arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;

        Ok(Self {
            writer: arrow_writer,
            schema,
            batch_size: config.batch_size.max(1),
            rows_written: 0,
            stages: BTreeSet::new(),
        })
    }

    /// Write derived rows, split into record batches of the configured size
    pub fn write_rows(&mut self, rows: &[DerivedRow]) -> Result<(), WriterError> {
        for chunk in rows.chunks(self.batch_size) {
            let batch = self.build_batch(chunk)?;
            self.writer.write(&batch)?;
            self.rows_written += chunk.len();
            self.stages.extend(chunk.iter().map(DerivedRow::stage));
        }
        debug!("Wrote {} rows ({} total)", rows.len(), self.rows_written);
        Ok(())
    }

    /// Column-major conversion of one chunk
    fn build_batch(&self, rows: &[DerivedRow]) -> Result<RecordBatch, WriterError> {
        let width = self.schema.fields().len() - 1;

        let mut stage = Int64Builder::with_capacity(rows.len());
        let mut values: Vec<Float64Builder> = (0..width)
            .map(|_| Float64Builder::with_capacity(rows.len()))
            .collect();

        for row in rows {
            stage.append_value(row.stage());
            for (builder, value) in values.iter_mut().zip(row.numeric_values()) {
                builder.append_value(value);
            }
        }

        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(width + 1);
        arrays.push(Arc::new(stage.finish()));
        arrays.extend(
            values
                .iter_mut()
                .map(|builder| Arc::new(builder.finish()) as ArrayRef),
        );

        Ok(RecordBatch::try_new(self.schema.clone(), arrays)?)
    }

    /// Flush any buffered data and finalize the file
    pub fn finish(self) -> Result<WriterStats, WriterError> {
        let file_metadata = self.writer.close()?;

        Ok(WriterStats {
            rows_written: self.rows_written,
            stages_written: self.stages.len(),
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }

    /// Flush any buffered data, finalize the file, and return the underlying writer
    pub fn finish_into_inner(self) -> Result<W, WriterError> {
        let inner = self.writer.into_inner()?;
        Ok(inner)
    }

    /// Get current statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            rows_written: self.rows_written,
            stages_written: self.stages.len(),
            row_groups_written: 0, // Unknown until finish
            file_size_bytes: 0,    // Unknown until finish
        }
    }
}

/// Create an empty temporary file next to `path`.
///
/// The file lives in the destination directory so persisting it is a rename
/// on the same filesystem. It is deleted on drop unless persisted.
pub(crate) fn staging_file(path: &Path) -> io::Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tempfile::Builder::new()
        .prefix(".triax-")
        .suffix(".partial")
        .tempfile_in(dir)
}

/// Write a complete derived table into a temporary file beside `path`.
///
/// Nothing appears at `path` until the returned file is persisted, so a caller
/// producing several outputs can commit them together.
pub fn stage_derived_file(
    path: &Path,
    rows: &[DerivedRow],
    metadata: &TriaxMetadata,
    config: WriterConfig,
) -> Result<(NamedTempFile, WriterStats), WriterError> {
    let tmp = staging_file(path)?;

    let mut writer = TriaxWriter::new(tmp.reopen()?, metadata, config)?;
    writer.write_rows(rows)?;
    let stats = writer.finish()?;

    Ok((tmp, stats))
}

/// Write a complete derived table to `path`, or leave nothing behind.
///
/// Rows are written to a temporary file in the destination directory which is
/// renamed over `path` only after the Parquet footer has been written.
pub fn write_derived_file(
    path: &Path,
    rows: &[DerivedRow],
    metadata: &TriaxMetadata,
    config: WriterConfig,
) -> Result<WriterStats, WriterError> {
    let (tmp, stats) = stage_derived_file(path, rows, metadata, config)?;
    tmp.persist(path)?;
    debug!("Persisted {} ({})", path.display(), stats);
    Ok(stats)
}
