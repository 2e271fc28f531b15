use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use triax::metadata::TriaxMetadata;

/// Longest metadata value printed in full
const PREVIEW_CHARS: usize = 100;

/// Display information about a derived Parquet file
pub fn run(file: PathBuf) -> Result<()> {
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use std::fs::File;

    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let file_handle = File::open(&file).context("Failed to open file")?;
    let reader = SerializedFileReader::new(file_handle).context("Failed to read Parquet file")?;

    let metadata = reader.metadata();
    let file_metadata = metadata.file_metadata();

    println!("triax File Information");
    println!("======================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Row groups: {}", metadata.num_row_groups());
    println!("  Total rows: {}", file_metadata.num_rows());
    println!(
        "  Schema columns: {}",
        file_metadata.schema_descr().num_columns()
    );
    println!();

    if let Some(kv_metadata) = file_metadata.key_value_metadata() {
        println!("Metadata Keys:");
        for kv in kv_metadata {
            let value_preview = kv
                .value
                .as_ref()
                .map(|v| preview(v))
                .unwrap_or_else(|| "<null>".to_string());
            println!("  {}: {}", kv.key, value_preview);
        }
        println!();

        let map: HashMap<String, String> = kv_metadata
            .iter()
            .filter_map(|kv| kv.value.clone().map(|v| (kv.key.clone(), v)))
            .collect();
        let triax = TriaxMetadata::from_parquet_metadata(&map)
            .context("Failed to decode triax metadata")?;
        print_specimen(&triax);
    }

    println!("Schema:");
    for i in 0..file_metadata.schema_descr().num_columns() {
        let col = file_metadata.schema_descr().column(i);
        println!("  {:3}. {} ({})", i + 1, col.name(), col.physical_type());
    }

    Ok(())
}

fn print_specimen(metadata: &TriaxMetadata) {
    println!("Specimen:");
    println!("  Run id: {}", metadata.run_id);
    if let Some(stages) = &metadata.stages {
        println!(
            "  Stages: saturation {}, consolidation {}, shear {}..={}",
            stages.saturation, stages.consolidation, stages.shear_start, stages.shear_end
        );
    }
    if let Some(props) = &metadata.properties {
        println!("  Initial void ratio: {:.4}", props.initial_void_ratio);
        println!("  Dry density: {:.4} Mg/m³", props.dry_density);
        if !props.defaulted.is_empty() {
            println!("  Defaulted inputs: {}", props.defaulted.join(", "));
        }
    }
    if let Some(baseline) = &metadata.baseline {
        println!("  B-value: {:.4}", baseline.b_value);
        println!(
            "  Consolidation void ratio: A {:.4}, B {:.4}",
            baseline.consolidation_void_ratio_a, baseline.consolidation_void_ratio_b
        );
        if !baseline.fallbacks.is_empty() {
            println!("  Baseline fallbacks: {:?}", baseline.fallbacks);
        }
    }
    println!();
}

fn preview(value: &str) -> String {
    let len = value.chars().count();
    if len > PREVIEW_CHARS {
        let head: String = value.chars().take(PREVIEW_CHARS).collect();
        format!("{}... ({} bytes)", head, value.len())
    } else {
        value.to_string()
    }
}
