use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ingest::{IngestStats, SpecimenMetadata};
use crate::specimen::SpecimenProperties;
use crate::stage::{StageBaseline, StageConfig};

use super::processing::ProcessingHistory;
use super::source::SourceFileInfo;
use super::MetadataError;

/// Complete metadata container for one processed specimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriaxMetadata {
    /// Identity of this analysis run
    pub run_id: Uuid,

    /// Raw metadata block from the log, normalised keys
    pub specimen: SpecimenMetadata,

    /// Computed specimen properties
    pub properties: Option<SpecimenProperties>,

    /// Extracted stage baseline
    pub baseline: Option<StageBaseline>,

    /// Stage numbers used for the analysis
    pub stages: Option<StageConfig>,

    /// Ingestion counters
    pub ingest_stats: Option<IngestStats>,

    /// Source file information
    pub source_file: Option<SourceFileInfo>,

    /// Processing history
    pub processing_history: Option<ProcessingHistory>,
}

impl Default for TriaxMetadata {
    fn default() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            specimen: SpecimenMetadata::default(),
            properties: None,
            baseline: None,
            stages: None,
            ingest_stats: None,
            source_file: None,
            processing_history: None,
        }
    }
}

impl TriaxMetadata {
    /// Create a new empty metadata container with a fresh run id
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert all metadata to a HashMap suitable for Parquet key_value_metadata
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, MetadataError> {
        use crate::schema::*;

        let mut metadata = HashMap::new();

        metadata.insert(KEY_FORMAT_VERSION.to_string(), TRIAX_FORMAT_VERSION.to_string());

        metadata.insert(
            KEY_PROCESSING_TIMESTAMP.to_string(),
            chrono::Utc::now().to_rfc3339(),
        );

        metadata.insert(
            KEY_CONVERTER_INFO.to_string(),
            format!("triax v{}", env!("CARGO_PKG_VERSION")),
        );

        metadata.insert(KEY_RUN_ID.to_string(), self.run_id.to_string());

        metadata.insert(
            KEY_SPECIMEN_METADATA.to_string(),
            serde_json::to_string(&self.specimen)?,
        );

        if let Some(ref props) = self.properties {
            metadata.insert(
                KEY_SPECIMEN_PROPERTIES.to_string(),
                serde_json::to_string(props)?,
            );
        }

        if let Some(ref baseline) = self.baseline {
            metadata.insert(
                KEY_STAGE_BASELINE.to_string(),
                serde_json::to_string(baseline)?,
            );
        }

        if let Some(ref stages) = self.stages {
            metadata.insert(KEY_STAGE_CONFIG.to_string(), serde_json::to_string(stages)?);
        }

        if let Some(ref stats) = self.ingest_stats {
            metadata.insert(KEY_INGEST_STATS.to_string(), serde_json::to_string(stats)?);
        }

        if let Some(ref source) = self.source_file {
            metadata.insert(KEY_SOURCE_FILE.to_string(), source.to_json()?);
        }

        if let Some(ref history) = self.processing_history {
            metadata.insert(KEY_PROCESSING_HISTORY.to_string(), history.to_json()?);
        }

        Ok(metadata)
    }

    /// Reconstruct metadata from Parquet key_value_metadata
    pub fn from_parquet_metadata(
        metadata: &HashMap<String, String>,
    ) -> Result<Self, MetadataError> {
        use crate::schema::*;

        let mut result = Self::new();

        if let Some(id) = metadata.get(KEY_RUN_ID) {
            result.run_id = Uuid::parse_str(id).map_err(|e| MetadataError::InvalidValue {
                key: KEY_RUN_ID.to_string(),
                message: e.to_string(),
            })?;
        }

        if let Some(json) = metadata.get(KEY_SPECIMEN_METADATA) {
            result.specimen = serde_json::from_str(json)?;
        }

        if let Some(json) = metadata.get(KEY_SPECIMEN_PROPERTIES) {
            result.properties = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_STAGE_BASELINE) {
            result.baseline = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_STAGE_CONFIG) {
            result.stages = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_INGEST_STATS) {
            result.ingest_stats = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_SOURCE_FILE) {
            result.source_file = Some(SourceFileInfo::from_json(json)?);
        }

        if let Some(json) = metadata.get(KEY_PROCESSING_HISTORY) {
            result.processing_history = Some(ProcessingHistory::from_json(json)?);
        }

        Ok(result)
    }
}
