use std::fmt;

/// Statistics from a completed write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of readings (rows) written
    pub rows_written: usize,
    /// Number of distinct stages seen
    pub stages_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total uncompressed size of the row groups in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} readings ({} stages) in {} row groups",
            self.rows_written, self.stages_written, self.row_groups_written
        )
    }
}
