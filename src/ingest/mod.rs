//! # Ingestion contract for triaxial instrument logs
//!
//! This module is the boundary between vendor log files and the derivation
//! core. It locates the tabular header row, collects the metadata block that
//! precedes it, normalises raw column labels to canonical [`Field`]s and coerces
//! every cell to a floating-point value.
//!
//! ## Vendor log layout
//!
//! ```text
//! "Initial Height (mm):","20"          <- metadata block (label, value)
//! "Initial Diameter (mm):","38"
//! "Stage Number","Time since start of test (s)",...   <- header row
//! 1,0,...                              <- readings
//! ```
//!
//! ## Invariants
//!
//! - Readings keep file order; stage indices are expected to be non-decreasing.
//!   Violations are counted in [`IngestStats`] but never reject the file.
//! - Unparsable numeric cells become `0.0` (see [`CELL_FALLBACK`]).
//! - A missing required column is fatal for the file
//!   ([`IngestError::MissingColumns`]).

mod error;
mod labels;
mod reader;


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use error::IngestError;
pub use labels::{keys, metadata_key, normalize_label, Field};
pub use reader::VendorLogReader;

/// Value used for numeric cells that cannot be parsed.
pub const CELL_FALLBACK: f64 = 0.0;

/// One instrument sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Test phase this sample belongs to
    pub stage: i64,
    /// Elapsed time since test start (s)
    pub time_test: f64,
    /// Elapsed time since stage start (s)
    pub time_stage: f64,
    /// Radial (cell) pressure (kPa)
    pub radial_pressure: f64,
    /// Radial (cell) volume (mm³)
    pub radial_volume: f64,
    /// Back pressure (kPa)
    pub back_pressure: f64,
    /// Back volume (mm³)
    pub back_volume: f64,
    /// Axial load (kN)
    pub axial_load: f64,
    /// Pore pressure (kPa)
    pub pore_pressure: f64,
    /// Axial displacement (mm)
    pub axial_displacement: f64,
    /// Axial force (kN)
    pub axial_force: f64,
}

impl RawReading {
    /// An all-zero reading belonging to `stage`.
    pub fn at_stage(stage: i64) -> Self {
        Self {
            stage,
            ..Default::default()
        }
    }

    /// Numeric value of a canonical field (the stage is widened to `f64`).
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Stage => self.stage as f64,
            Field::TimeTest => self.time_test,
            Field::TimeStage => self.time_stage,
            Field::RadialPressure => self.radial_pressure,
            Field::RadialVolume => self.radial_volume,
            Field::BackPressure => self.back_pressure,
            Field::BackVolume => self.back_volume,
            Field::AxialLoad => self.axial_load,
            Field::PorePressure => self.pore_pressure,
            Field::AxialDisplacement => self.axial_displacement,
            Field::AxialForce => self.axial_force,
        }
    }

    fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::Stage => self.stage = value as i64,
            Field::TimeTest => self.time_test = value,
            Field::TimeStage => self.time_stage = value,
            Field::RadialPressure => self.radial_pressure = value,
            Field::RadialVolume => self.radial_volume = value,
            Field::BackPressure => self.back_pressure = value,
            Field::BackVolume => self.back_volume = value,
            Field::AxialLoad => self.axial_load = value,
            Field::PorePressure => self.pore_pressure = value,
            Field::AxialDisplacement => self.axial_displacement = value,
            Field::AxialForce => self.axial_force = value,
        }
    }
}

/// Scalar metadata collected from the block above the tabular section.
///
/// Keys are canonical (see [`keys`]) when recognised, otherwise the normalised
/// label with spaces replaced by underscores. Values are kept as text so the
/// whole block can be forwarded to the sink unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecimenMetadata {
    values: BTreeMap<String, String>,
}

impl SpecimenMetadata {
    /// Create an empty metadata map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw `label, value` pair from a vendor file.
    ///
    /// Water contents labelled in percent are stored as fractions.
    pub fn insert_raw(&mut self, label: &str, value: &str) {
        let (key, unit) = metadata_key(label);
        if key.is_empty() {
            return;
        }
        let value = value.trim().trim_matches('"').to_string();

        let is_water_content =
            key == keys::INITIAL_WATER_CONTENT || key == keys::FINAL_WATER_CONTENT;
        if is_water_content && unit.as_deref() == Some("%") {
            if let Some(percent) = parse_number(&value) {
                self.values.insert(key, (percent / 100.0).to_string());
                return;
            }
        }

        self.values.insert(key, value);
    }

    /// Set a numeric value under a canonical key.
    pub fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Numeric value for `key`, if present and parsable.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(|v| parse_number(v))
    }

    /// Raw text for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no metadata was collected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Counters describing how clean a log was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of readings parsed
    pub rows: usize,
    /// Numeric cells replaced by [`CELL_FALLBACK`]
    pub coerced_cells: usize,
    /// Rows whose stage index was lower than the previous row's
    pub stage_order_violations: usize,
    /// Entries in the metadata block
    pub metadata_entries: usize,
}

/// Everything the ingestion collaborator hands to the core for one file.
#[derive(Debug, Clone, Default)]
pub struct IngestedLog {
    /// Metadata block
    pub metadata: SpecimenMetadata,
    /// Readings in file order
    pub readings: Vec<RawReading>,
    /// Parse counters
    pub stats: IngestStats,
}

/// Lenient numeric parse: trims whitespace and quotes, rejects non-finite values.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim().trim_matches('"').trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
