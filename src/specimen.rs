//! # Specimen Property Calculator
//!
//! Turns the scalar metadata block of a log into the specimen-level quantities
//! referenced by nearly every later formula. Pure function of its inputs; no
//! dependency on the reading series.
//!
//! Missing or unparsable inputs use the documented defaults below rather than
//! failing, and the key of every defaulted input is recorded in
//! [`SpecimenProperties::defaulted`].
//!
//! | Quantity | Formula | Unit |
//! |----------|---------|------|
//! | dry mass | `m / (1 + w)` | g |
//! | volume | `H × π × D² / 4` | mm³ |
//! | solid volume | `m_d × 1000 / Gs` | mm³ |
//! | initial void ratio | `(V − Vs) / Vs` | - |
//! | dry density | `m_d × 1000 / V` | Mg/m³ |
//! | dry unit weight | `ρ_d × g` | kN/m³ |
//! | final void ratio | `w_f × Gs / Sr` | - |

use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::guard::guarded_divide;
use crate::ingest::{keys, SpecimenMetadata};

/// Default initial mass (g)
pub const DEFAULT_MASS: f64 = 0.0;
/// Default water content, initial and final (fraction)
pub const DEFAULT_WATER_CONTENT: f64 = 0.0;
/// Default initial height (mm)
pub const DEFAULT_HEIGHT: f64 = 1.0;
/// Default initial diameter (mm)
pub const DEFAULT_DIAMETER: f64 = 1.0;
/// Default specific gravity of solids
pub const DEFAULT_SPECIFIC_GRAVITY: f64 = 1.0;
/// Default saturation coefficient (fully saturated)
pub const DEFAULT_SATURATION_COEFFICIENT: f64 = 1.0;

/// Standard gravity used for unit weights (m/s²)
pub const GRAVITY: f64 = 9.81;

/// mm³ per cm³
const MM3_PER_CM3: f64 = 1000.0;

/// Scalar specimen quantities, computed once per log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecimenProperties {
    /// Initial specimen mass (g)
    pub initial_mass: f64,
    /// Initial water content (fraction)
    pub initial_water_content: f64,
    /// Final water content (fraction)
    pub final_water_content: f64,
    /// Initial height (mm)
    pub initial_height: f64,
    /// Initial diameter (mm)
    pub initial_diameter: f64,
    /// Specific gravity of solids
    pub specific_gravity: f64,
    /// Saturation coefficient assumed for the final state
    pub saturation_coefficient: f64,

    /// Dry mass (g)
    pub dry_mass: f64,
    /// Initial total volume (mm³)
    pub initial_volume: f64,
    /// Volume of solids (mm³)
    pub solid_volume: f64,
    /// Initial void ratio
    pub initial_void_ratio: f64,
    /// Dry density (Mg/m³)
    pub dry_density: f64,
    /// Dry unit weight (kN/m³)
    pub dry_unit_weight: f64,
    /// Target void ratio at the end of the test
    pub final_void_ratio: f64,

    /// Metadata keys that were missing and replaced by their default
    pub defaulted: Vec<String>,
}

impl SpecimenProperties {
    /// Compute properties from a metadata map, applying defaults for missing keys.
    pub fn from_metadata(metadata: &SpecimenMetadata) -> Self {
        let mut defaulted = Vec::new();
        let mut input = |key: &str, default: f64| match metadata.get_f64(key) {
            Some(value) => value,
            None => {
                defaulted.push(key.to_string());
                default
            }
        };

        let initial_mass = input(keys::INITIAL_MASS, DEFAULT_MASS);
        let initial_water_content = input(keys::INITIAL_WATER_CONTENT, DEFAULT_WATER_CONTENT);
        let final_water_content = input(keys::FINAL_WATER_CONTENT, DEFAULT_WATER_CONTENT);
        let initial_height = input(keys::INITIAL_HEIGHT, DEFAULT_HEIGHT);
        let initial_diameter = input(keys::INITIAL_DIAMETER, DEFAULT_DIAMETER);
        let specific_gravity = input(keys::SPECIFIC_GRAVITY, DEFAULT_SPECIFIC_GRAVITY);
        let saturation_coefficient =
            input(keys::SATURATION_COEFFICIENT, DEFAULT_SATURATION_COEFFICIENT);

        if !defaulted.is_empty() {
            debug!("Specimen metadata defaulted: {}", defaulted.join(", "));
        }

        let mut props = Self::compute(
            initial_mass,
            initial_water_content,
            initial_height,
            initial_diameter,
            specific_gravity,
        )
        .with_final_state(final_water_content, saturation_coefficient);
        props.defaulted = defaulted;
        props
    }

    /// Compute the initial-state properties from explicit inputs.
    ///
    /// Final water content is taken as zero and the specimen as saturated; use
    /// [`with_final_state`](Self::with_final_state) to set them.
    pub fn compute(
        initial_mass: f64,
        initial_water_content: f64,
        initial_height: f64,
        initial_diameter: f64,
        specific_gravity: f64,
    ) -> Self {
        let dry_mass = guarded_divide(initial_mass, 1.0 + initial_water_content);
        let initial_volume = initial_height * PI * initial_diameter.powi(2) / 4.0;
        let solid_volume = guarded_divide(dry_mass * MM3_PER_CM3, specific_gravity);
        let initial_void_ratio = guarded_divide(initial_volume - solid_volume, solid_volume);
        let dry_density = guarded_divide(dry_mass * MM3_PER_CM3, initial_volume);

        Self {
            initial_mass,
            initial_water_content,
            final_water_content: DEFAULT_WATER_CONTENT,
            initial_height,
            initial_diameter,
            specific_gravity,
            saturation_coefficient: DEFAULT_SATURATION_COEFFICIENT,
            dry_mass,
            initial_volume,
            solid_volume,
            initial_void_ratio,
            dry_density,
            dry_unit_weight: dry_density * GRAVITY,
            final_void_ratio: 0.0,
            defaulted: Vec::new(),
        }
    }

    /// Set the final water content and saturation coefficient, deriving the
    /// target final void ratio `w_f × Gs / Sr`.
    pub fn with_final_state(mut self, final_water_content: f64, saturation_coefficient: f64) -> Self {
        self.final_water_content = final_water_content;
        self.saturation_coefficient = saturation_coefficient;
        self.final_void_ratio = guarded_divide(
            final_water_content * self.specific_gravity,
            saturation_coefficient,
        );
        self
    }

    /// Initial cross-sectional area (mm²)
    pub fn initial_area(&self) -> f64 {
        PI * self.initial_diameter.powi(2) / 4.0
    }
}
