//! TOML configuration file support.
//!
//! Every table and key is optional; command-line flags override file values.
//!
//! ```toml
//! # triax.toml
//! [stages]
//! saturation = 3
//! consolidation = 7
//! shear_start = 8
//! shear_end = 8
//!
//! [reduction]
//! dense_rows = 30
//! stride = 10
//!
//! [report]
//! enabled = true
//! saturation_rows = 5
//!
//! [writer]
//! compression = { zstd = 9 }
//! row_group_size = 100000
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use triax::pipeline::ProcessingConfig;

/// Load processing configuration from a TOML file.
pub fn from_file(path: &Path) -> Result<ProcessingConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    from_str(&content)
}

/// Parse processing configuration from a TOML string.
pub fn from_str(content: &str) -> Result<ProcessingConfig> {
    ProcessingConfig::from_toml_str(content).context("Failed to parse TOML configuration")
}
