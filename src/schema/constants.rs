/// triax output format version - follows semantic versioning
pub const TRIAX_FORMAT_VERSION: &str = "1.0.0";

/// File extension for derived Parquet outputs
pub const TRIAX_EXTENSION: &str = ".triax.parquet";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "triax:format_version";

/// Metadata key for the schema description
pub const KEY_SCHEMA_DESCRIPTION: &str = "triax:schema_description";

/// Metadata key for the unique analysis run id
pub const KEY_RUN_ID: &str = "triax:run_id";

/// Metadata key for source file information
pub const KEY_SOURCE_FILE: &str = "triax:source_file";

/// Metadata key for processing timestamp
pub const KEY_PROCESSING_TIMESTAMP: &str = "triax:processing_timestamp";

/// Metadata key for converter software info
pub const KEY_CONVERTER_INFO: &str = "triax:converter_info";

/// Metadata key for the raw specimen metadata block
pub const KEY_SPECIMEN_METADATA: &str = "triax:specimen_metadata";

/// Metadata key for computed specimen properties
pub const KEY_SPECIMEN_PROPERTIES: &str = "triax:specimen_properties";

/// Metadata key for the stage baseline
pub const KEY_STAGE_BASELINE: &str = "triax:stage_baseline";

/// Metadata key for the stage configuration
pub const KEY_STAGE_CONFIG: &str = "triax:stage_config";

/// Metadata key for ingestion statistics
pub const KEY_INGEST_STATS: &str = "triax:ingest_stats";

/// Metadata key for data processing history
pub const KEY_PROCESSING_HISTORY: &str = "triax:processing_history";
