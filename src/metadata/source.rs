use std::path::Path;

use serde::{Deserialize, Serialize};

use super::MetadataError;

/// Source file information for provenance tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFileInfo {
    /// Original file name
    pub name: String,

    /// Original file path
    pub path: Option<String>,

    /// File format (e.g., "vendor log (csv)")
    pub format: Option<String>,

    /// File size in bytes
    pub size_bytes: Option<u64>,

    /// Last modification time of the source (RFC 3339)
    pub modified: Option<String>,
}

impl SourceFileInfo {
    /// Create new source file info with the given filename
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Describe a file on disk.
    pub fn from_path(path: &Path) -> Result<Self, MetadataError> {
        let fs_meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = path
            .extension()
            .map(|ext| format!("vendor log ({})", ext.to_string_lossy().to_lowercase()));
        let modified = fs_meta
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());

        Ok(Self {
            name,
            path: Some(path.display().to_string()),
            format,
            size_bytes: Some(fs_meta.len()),
            modified,
        })
    }

    /// Serialize to JSON for Parquet footer storage
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}
