/// Errors that can occur while reading a vendor log.
///
/// Every variant is fatal for the file being read only; the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading the log file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV tokenizing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// No row in the file looked like the tabular header
    #[error("No header row containing a 'Stage Number' column was found")]
    MissingHeader,

    /// Canonical fields required by the derivation engine are absent
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
