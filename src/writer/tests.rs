use super::*;
use crate::derive::derive_rows;
use crate::ingest::RawReading;
use crate::metadata::TriaxMetadata;
use crate::schema::{columns, KEY_RUN_ID};
use crate::specimen::SpecimenProperties;
use crate::stage::{StageBaseline, StageConfig, StageSegmenter};
use bytes_reader::read_back;

fn derived(n: usize) -> Vec<crate::derive::DerivedRow> {
    let readings: Vec<RawReading> = (0..n)
        .map(|i| RawReading {
            stage: if i < n / 2 { 7 } else { 8 },
            time_test: i as f64,
            axial_load: 0.01 * i as f64,
            radial_pressure: 300.0,
            pore_pressure: 200.0,
            ..Default::default()
        })
        .collect();
    let props = SpecimenProperties::compute(80.0, 0.18, 20.0, 38.0, 2.7);
    let stages = StageConfig::default();
    let baseline = StageBaseline::extract(&StageSegmenter::new(&readings), &stages, &props);
    derive_rows(&readings, &props, &baseline, stages)
}

mod bytes_reader {
    use std::io::Write;

    use parquet::file::reader::{FileReader, SerializedFileReader};

    /// (row count, key-value metadata) of an in-memory Parquet file
    pub fn read_back(data: Vec<u8>) -> (i64, Vec<(String, Option<String>)>) {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&data).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        let meta = reader.metadata().file_metadata();
        let kv = meta
            .key_value_metadata()
            .map(|kv| kv.iter().map(|e| (e.key.clone(), e.value.clone())).collect())
            .unwrap_or_default();
        (meta.num_rows(), kv)
    }
}

#[test]
fn test_write_rows() -> Result<(), WriterError> {
    let rows = derived(20);
    let metadata = TriaxMetadata::new();
    let config = WriterConfig {
        batch_size: 7,
        ..WriterConfig::default()
    };

    let mut writer = TriaxWriter::new(Vec::new(), &metadata, config)?;
    writer.write_rows(&rows)?;
    assert_eq!(writer.stats().rows_written, 20);
    assert_eq!(writer.stats().stages_written, 2);

    let data = writer.finish_into_inner()?;
    let (num_rows, kv) = read_back(data);
    assert_eq!(num_rows, 20);

    let run_id = kv.iter().find(|(k, _)| k == KEY_RUN_ID).and_then(|(_, v)| v.clone());
    assert_eq!(run_id, Some(metadata.run_id.to_string()));
    Ok(())
}

#[test]
fn test_finish_stats() -> Result<(), WriterError> {
    let rows = derived(10);
    let mut writer = TriaxWriter::new(Vec::new(), &TriaxMetadata::new(), WriterConfig::fast_write())?;
    writer.write_rows(&rows)?;
    let stats = writer.finish()?;

    assert_eq!(stats.rows_written, 10);
    assert_eq!(stats.row_groups_written, 1);
    assert!(stats.to_string().contains("10 readings"));
    Ok(())
}

#[test]
fn test_empty_table() -> Result<(), WriterError> {
    let writer = TriaxWriter::new(Vec::new(), &TriaxMetadata::new(), WriterConfig::default())?;
    let (num_rows, _) = read_back(writer.finish_into_inner()?);
    assert_eq!(num_rows, 0);
    Ok(())
}

#[test]
fn test_write_derived_file_leaves_no_temporaries() -> Result<(), WriterError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("specimen.triax.parquet");

    let stats = write_derived_file(&path, &derived(12), &TriaxMetadata::new(), WriterConfig::default())?;
    assert_eq!(stats.rows_written, 12);
    assert!(path.exists());

    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["specimen.triax.parquet".to_string()]);
    Ok(())
}

#[test]
fn test_compression_from_toml() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        writer: WriterConfig,
    }

    let parsed: Wrapper = toml::from_str(
        r#"
        [writer]
        compression = "snappy"
        row_group_size = 1000
        "#,
    )
    .unwrap();
    assert_eq!(parsed.writer.compression, CompressionType::Snappy);
    assert_eq!(parsed.writer.row_group_size, 1000);
    assert_eq!(parsed.writer.batch_size, WriterConfig::default().batch_size);

    let parsed: Wrapper = toml::from_str("[writer]\ncompression = { zstd = 9 }\n").unwrap();
    assert_eq!(parsed.writer.compression, CompressionType::Zstd(9));
}

#[test]
fn test_column_count_matches_schema() {
    assert_eq!(
        crate::schema::create_derived_schema().fields().len(),
        1 + columns::numeric_columns().len()
    );
}
