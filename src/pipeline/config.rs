use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::reduce::ReductionConfig;
use crate::report::ReportConfig;
use crate::stage::StageConfig;
use crate::writer::WriterConfig;

/// Everything that parameterizes the processing of one specimen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Stage numbers of the three test phases
    pub stages: StageConfig,
    /// Shear-series subsampling
    pub reduction: ReductionConfig,
    /// CSV report output
    pub report: ReportConfig,
    /// Parquet writer settings
    pub writer: WriterConfig,
}

impl ProcessingConfig {
    /// Parse a TOML document; absent tables and keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Output path of the derived table for `input` inside `output_dir`
    pub fn output_path(input: &Path, output_dir: &Path) -> std::path::PathBuf {
        output_dir.join(format!(
            "{}{}",
            file_stem(input),
            crate::schema::TRIAX_EXTENSION
        ))
    }
}

/// File stem used to name every output of `input`
pub fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "specimen".to_string())
}
