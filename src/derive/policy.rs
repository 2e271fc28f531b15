use serde::{Deserialize, Serialize};

use crate::stage::StageBaseline;

/// Area-correction assumption used to bound the specimen cross-section.
///
/// Both sides run through the same formulas; they differ only in the two
/// scalars returned by [`AreaPolicy::inputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaPolicy {
    /// Void volume from the measured consolidation volume change
    SideA,
    /// Void volume from the final moisture content
    SideB,
}

/// The per-side scalars feeding the shared formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideInputs {
    /// Post-consolidation void volume (mm³)
    pub void_volume: f64,
    /// Consolidated cross-sectional area (m²)
    pub consolidated_area: f64,
}

impl AreaPolicy {
    /// Both sides, in output order.
    pub const BOTH: [AreaPolicy; 2] = [AreaPolicy::SideA, AreaPolicy::SideB];

    /// Column-name suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            AreaPolicy::SideA => "a",
            AreaPolicy::SideB => "b",
        }
    }

    /// Select this side's scalars from the baseline.
    pub fn inputs(&self, baseline: &StageBaseline) -> SideInputs {
        match self {
            AreaPolicy::SideA => SideInputs {
                void_volume: baseline.void_volume_a,
                consolidated_area: baseline.consolidated_area_a,
            },
            AreaPolicy::SideB => SideInputs {
                void_volume: baseline.void_volume_b,
                consolidated_area: baseline.consolidated_area_b,
            },
        }
    }
}
