//! # Quantity Derivation Engine
//!
//! Produces one [`DerivedRow`] per raw reading: the cumulative displacement and
//! volume columns, the quantities shared by both sides, and two parallel
//! families of mechanical quantities ("side A" and "side B") that differ only
//! in the area-correction assumption.
//!
//! ## Per-row pipeline
//!
//! 1. Cumulative deltas of radial volume, back volume and axial displacement,
//!    anchored at the first reading.
//! 2. Axial strain, with a large-strain correction from shear onset onward.
//! 3. Volumetric strain per side.
//! 4. Current area per side, then deviator stress, effective stresses,
//!    Cambridge `p'`, stress ratio and the mobilised friction angle.
//! 5. Void ratio and the secondary quantities (diameter, radial and shear
//!    strain, MIT `s` / `s'`, undrained strength).
//!
//! Both sides go through one formula implementation; the [`AreaPolicy`] only
//! selects the void volume and consolidated area. Every division is guarded
//! (see [`crate::guard`]), so no row ever carries NaN or infinity.
//!
//! ## Example
//!
//! ```rust
//! use triax::derive::derive_rows;
//! use triax::ingest::RawReading;
//! use triax::specimen::SpecimenProperties;
//! use triax::stage::{StageBaseline, StageConfig, StageSegmenter};
//!
//! let readings = vec![RawReading::at_stage(8), RawReading::at_stage(8)];
//! let props = SpecimenProperties::compute(80.0, 0.18, 20.0, 38.0, 2.7);
//! let stages = StageConfig::default();
//! let baseline = StageBaseline::extract(&StageSegmenter::new(&readings), &stages, &props);
//!
//! let rows = derive_rows(&readings, &props, &baseline, stages);
//! assert_eq!(rows.len(), readings.len());
//! ```

mod engine;
mod policy;
mod row;

#[cfg(test)]
mod tests;

pub use engine::{friction_angle, Cumulative, CumulativeState, DerivationEngine};
pub use policy::{AreaPolicy, SideInputs};
pub use row::{DerivedRow, SideQuantities};

use crate::ingest::RawReading;
use crate::specimen::SpecimenProperties;
use crate::stage::{StageBaseline, StageConfig};

/// Derive every row of one log in a single ordered pass.
pub fn derive_rows(
    readings: &[RawReading],
    props: &SpecimenProperties,
    baseline: &StageBaseline,
    stages: StageConfig,
) -> Vec<DerivedRow> {
    DerivationEngine::new(props, baseline, stages).derive(readings)
}
