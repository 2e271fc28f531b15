use super::*;
use crate::ingest::keys;
use crate::ingest::SpecimenMetadata;
use crate::schema::*;
use crate::specimen::SpecimenProperties;
use crate::stage::StageConfig;

fn sample() -> TriaxMetadata {
    let specimen = SpecimenMetadata::new()
        .with(keys::INITIAL_MASS, 80.0)
        .with(keys::INITIAL_HEIGHT, 20.0);
    let mut metadata = TriaxMetadata::new();
    metadata.properties = Some(SpecimenProperties::from_metadata(&specimen));
    metadata.specimen = specimen;
    metadata.stages = Some(StageConfig::default());
    metadata.source_file = Some(SourceFileInfo::new("specimen_01.csv"));
    metadata
}

#[test]
fn test_parquet_metadata_keys() {
    let kv = sample().to_parquet_metadata().unwrap();

    assert_eq!(
        kv.get(KEY_FORMAT_VERSION).map(String::as_str),
        Some(TRIAX_FORMAT_VERSION)
    );
    assert!(kv.contains_key(KEY_PROCESSING_TIMESTAMP));
    assert!(kv.get(KEY_CONVERTER_INFO).unwrap().starts_with("triax v"));
    assert!(kv.contains_key(KEY_SPECIMEN_PROPERTIES));
    assert!(kv.contains_key(KEY_STAGE_CONFIG));
    assert!(!kv.contains_key(KEY_STAGE_BASELINE));
    assert!(!kv.contains_key(KEY_PROCESSING_HISTORY));
}

#[test]
fn test_parquet_metadata_roundtrip() {
    let original = sample();
    let kv = original.to_parquet_metadata().unwrap();
    let restored = TriaxMetadata::from_parquet_metadata(&kv).unwrap();

    assert_eq!(restored.run_id, original.run_id);
    assert_eq!(restored.specimen, original.specimen);
    assert_eq!(restored.stages, original.stages);
    assert_eq!(restored.source_file, original.source_file);

    let (props, restored_props) = (original.properties.unwrap(), restored.properties.unwrap());
    assert_eq!(restored_props.initial_mass, 80.0);
    assert_eq!(restored_props.defaulted, props.defaulted);
    assert!((restored_props.initial_volume - props.initial_volume).abs() < 1e-9);
}

#[test]
fn test_run_ids_are_unique() {
    assert_ne!(TriaxMetadata::new().run_id, TriaxMetadata::new().run_id);
}

#[test]
fn test_invalid_run_id() {
    let mut kv = sample().to_parquet_metadata().unwrap();
    kv.insert(KEY_RUN_ID.to_string(), "not-a-uuid".to_string());
    assert!(matches!(
        TriaxMetadata::from_parquet_metadata(&kv),
        Err(MetadataError::InvalidValue { .. })
    ));
}

#[test]
fn test_processing_history_numbering() {
    let mut history = ProcessingHistory::new();
    history.add_step(ProcessingStep::now("ingest").with_parameter("rows", 12));
    history.add_step(ProcessingStep::now("derivation"));

    assert_eq!(history.steps[0].order, 1);
    assert_eq!(history.steps[1].order, 2);
    assert_eq!(history.steps[0].parameters.get("rows").map(String::as_str), Some("12"));
    assert_eq!(history.steps[1].software, "triax");

    let restored = ProcessingHistory::from_json(&history.to_json().unwrap()).unwrap();
    assert_eq!(restored, history);
}

#[test]
fn test_source_file_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("specimen_02.CSV");
    std::fs::write(&path, "Stage Number,Back Volume\n").unwrap();

    let info = SourceFileInfo::from_path(&path).unwrap();
    assert_eq!(info.name, "specimen_02.CSV");
    assert_eq!(info.format.as_deref(), Some("vendor log (csv)"));
    assert_eq!(info.size_bytes, Some(25));
    assert!(info.modified.is_some());

    assert!(SourceFileInfo::from_path(&dir.path().join("missing.csv")).is_err());
}
