use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MetadataError;

/// Ordered record of what was done to a specimen's readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingHistory {
    /// List of processing steps applied
    pub steps: Vec<ProcessingStep>,
}

/// A single step in the processing history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStep {
    /// Step order (1-indexed)
    pub order: i32,

    /// Software name
    pub software: String,

    /// Software version
    pub version: Option<String>,

    /// Processing type (e.g., "ingest", "derivation", "reduction")
    pub processing_type: String,

    /// Timestamp when processing was performed
    pub timestamp: Option<String>,

    /// Processing parameters
    pub parameters: BTreeMap<String, String>,
}

impl ProcessingStep {
    /// A step performed now by this crate.
    pub fn now(processing_type: &str) -> Self {
        Self {
            order: 0,
            software: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            processing_type: processing_type.to_string(),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            parameters: BTreeMap::new(),
        }
    }

    /// Attach a parameter
    pub fn with_parameter(mut self, key: &str, value: impl ToString) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }
}

impl ProcessingHistory {
    /// Create a new empty processing history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a processing step to the history, numbering it after the last one
    pub fn add_step(&mut self, mut step: ProcessingStep) {
        step.order = self.steps.len() as i32 + 1;
        self.steps.push(step);
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
