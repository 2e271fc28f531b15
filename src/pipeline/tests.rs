use super::*;
use crate::derive::AreaPolicy;
use crate::ingest::VendorLogReader;
use crate::synthetic::SyntheticLog;

fn write_log(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn report_config() -> ProcessingConfig {
    let mut config = ProcessingConfig::default();
    config.report.enabled = true;
    config
}

#[test]
fn test_analyze_synthetic_log() {
    let synthetic = SyntheticLog::default();
    let log = VendorLogReader::new()
        .read(synthetic.render().as_bytes())
        .unwrap();

    let analysis = analyze(&log.readings, &log.metadata, &ProcessingConfig::default());

    assert_eq!(analysis.rows.len(), synthetic.row_count());
    assert_eq!(analysis.reduced.source_rows(), 120);
    // 30 dense rows, then shear rows 30, 40, ..., 110
    assert_eq!(analysis.reduced.len(), 39);
    assert_eq!(analysis.stages.len(), 4);

    assert!(analysis.properties.defaulted.is_empty());
    assert!(analysis.baseline.fallbacks.is_empty());
    assert!((analysis.baseline.b_value - 0.96).abs() < 1e-9);
}

#[test]
fn test_shear_response_is_physical() {
    let log = VendorLogReader::new()
        .read(SyntheticLog::with_shear_rows(40).render().as_bytes())
        .unwrap();
    let analysis = analyze(&log.readings, &log.metadata, &ProcessingConfig::default());

    let shear: Vec<_> = analysis.rows.iter().filter(|r| r.stage() == 8).collect();
    assert_eq!(shear.len(), 40);

    for policy in AreaPolicy::BOTH {
        for pair in shear.windows(2) {
            assert!(pair[1].side(policy).deviator_stress > pair[0].side(policy).deviator_stress);
        }
        for row in &shear {
            let phi = row.side(policy).friction_angle;
            assert!(phi > 0.0 && phi < 90.0, "{policy:?} friction angle {phi}");
        }
    }
}

#[test]
fn test_process_file_writes_table_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "spec-01.csv", &SyntheticLog::default().render());
    let out = dir.path().join("out");

    let summary = process_file(&input, &out, &report_config()).unwrap();

    assert_eq!(summary.output, out.join("spec-01.triax.parquet"));
    assert!(summary.output.is_file());
    assert_eq!(summary.writer.rows_written, 140);
    assert_eq!(summary.writer.stages_written, 4);
    assert_eq!(summary.reduced_rows, 39);
    assert_eq!(summary.fallbacks, 0);

    let reports = summary.reports.unwrap();
    assert!(reports.shear.is_file());
    assert!(reports.consolidation.is_file());
    assert!(reports.saturation.is_file());

    // nothing but the four outputs, no leftover temporary file
    let entries = std::fs::read_dir(&out).unwrap().count();
    assert_eq!(entries, 4);
}

#[test]
fn test_failed_report_leaves_no_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "spec.csv", &SyntheticLog::with_shear_rows(10).render());
    let out = dir.path().join("out");
    // a directory squatting on a report path makes its rename fail
    std::fs::create_dir_all(out.join("spec_consolidation.csv")).unwrap();

    let err = process_file(&input, &out, &report_config()).unwrap_err();
    assert!(
        matches!(&err, PipelineError::Persist { path, .. } if path.ends_with("spec_consolidation.csv")),
        "{err}"
    );

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["spec_consolidation.csv".to_string()]);
    assert!(!ProcessingConfig::output_path(&input, &out).exists());
    assert!(!out.join("spec_shear.csv").exists());

    let report = run_batch(&[input.clone()], &out, &report_config());
    assert_eq!(report.failure_count(), 1);
    assert!(!ProcessingConfig::output_path(&input, &out).exists());
}

#[test]
fn test_reports_disabled_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "spec-02.txt", &SyntheticLog::with_shear_rows(5).render());

    let summary = process_file(&input, dir.path(), &ProcessingConfig::default()).unwrap();
    assert!(summary.reports.is_none());
    assert!(!dir.path().join("spec-02_shear.csv").exists());
}

#[test]
fn test_missing_metadata_counts_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let synthetic = SyntheticLog {
        with_metadata: false,
        ..SyntheticLog::with_shear_rows(5)
    };
    let input = write_log(dir.path(), "bare.csv", &synthetic.render());

    let summary = process_file(&input, dir.path(), &ProcessingConfig::default()).unwrap();
    // all seven specimen inputs defaulted
    assert_eq!(summary.fallbacks, 7);
}

#[test]
fn test_missing_columns_leave_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(
        dir.path(),
        "broken.csv",
        "\"Stage Number\",\"Radial Pressure (kPa)\"\n8,300\n",
    );

    let err = process_file(&input, dir.path(), &ProcessingConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(_)));
    assert!(!ProcessingConfig::output_path(&input, dir.path()).exists());
}

#[test]
fn test_inverted_shear_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_log(dir.path(), "spec.csv", &SyntheticLog::with_shear_rows(5).render());

    let mut config = ProcessingConfig::default();
    config.stages = config.stages.with_shear_range(9, 8);

    let err = process_file(&input, dir.path(), &config).unwrap_err();
    assert!(matches!(err, PipelineError::Stages(_)));
}

#[test]
fn test_config_from_toml() {
    let config = ProcessingConfig::from_toml_str(
        r#"
        [stages]
        consolidation = 6
        shear_end = 9

        [reduction]
        stride = 5

        [report]
        enabled = true
        "#,
    )
    .unwrap();

    assert_eq!(config.stages.saturation, 3);
    assert_eq!(config.stages.consolidation, 6);
    assert_eq!(config.stages.shear_start, 8);
    assert_eq!(config.stages.shear_end, 9);
    assert_eq!(config.reduction.dense_rows, 30);
    assert_eq!(config.reduction.stride, 5);
    assert!(config.report.enabled);
    assert_eq!(config.report.saturation_rows, 5);

    assert_eq!(
        ProcessingConfig::from_toml_str("").unwrap(),
        ProcessingConfig::default()
    );
}

#[test]
fn test_output_naming() {
    let out = Path::new("/data/out");
    assert_eq!(
        ProcessingConfig::output_path(Path::new("/logs/B12_3.5m.csv"), out),
        out.join("B12_3.5m.triax.parquet")
    );
    assert_eq!(file_stem(Path::new("run.txt")), "run");
}

#[test]
fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_log(dir.path(), "good.csv", &SyntheticLog::with_shear_rows(10).render());
    let broken = write_log(dir.path(), "broken.csv", "no header here\n1,2,3\n");
    let missing = dir.path().join("missing.csv");
    let out = dir.path().join("out");

    let report = run_batch(&[broken, good.clone(), missing], &out, &ProcessingConfig::default());

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.processed_count(), 1);
    assert_eq!(report.failure_count(), 2);
    assert!(report.has_failures());
    assert!(report.files[1].is_ok());
    assert_eq!(report.files[1].input, good);
    assert!(ProcessingConfig::output_path(&good, &out).is_file());

    let text = report.to_string();
    assert!(text.contains("1 processed, 0 with fallbacks, 2 failed"));
    assert!(text.contains("FAILED"));
}
