use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;
use serde::{Deserialize, Serialize};

use crate::schema::columns;

/// Compression options for derived Parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionType {
    /// ZSTD compression at the given level
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration for the derived-table writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of readings per group)
    pub row_group_size: usize,

    /// Readings per Arrow record batch handed to the Parquet writer
    pub batch_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Enable BYTE_STREAM_SPLIT encoding for the Float64 columns
    pub use_byte_stream_split: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            // a long test log is a few hundred thousand readings
            row_group_size: 100_000,
            batch_size: 8_192,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }
}

impl WriterConfig {
    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::Snappy,
            row_group_size: 50_000,
            data_page_size: 512 * 1024,
            ..Self::default()
        }
    }

    /// Create writer properties from this configuration
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        // Stage repeats for every reading of a stage; dictionary + RLE collapses it.
        builder = builder
            .set_column_dictionary_enabled(ColumnPath::new(vec![columns::STAGE.to_string()]), true);

        for col in columns::numeric_columns() {
            let path = ColumnPath::new(vec![col]);
            builder = builder.set_column_dictionary_enabled(path.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(path, Encoding::BYTE_STREAM_SPLIT);
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}
