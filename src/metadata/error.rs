/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error inspecting the source file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// A footer value is not valid for its key
    #[error("Invalid metadata value for '{key}': {message}")]
    InvalidValue {
        /// Footer key
        key: String,
        /// What was wrong with it
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
