//! # Stage segmentation and baseline extraction
//!
//! A triaxial log is one continuous stream of readings tagged with an integer
//! stage index. Which stage numbers correspond to the saturation check,
//! consolidation and shear phases is configuration ([`StageConfig`]), never
//! inferred from the data.
//!
//! - [`StageSegmenter`] partitions the stream by stage index and answers
//!   "first row of stage N", "last row of stage N" and "rows in stages
//!   N1..=N2".
//! - [`StageBaseline`] extracts the reference scalars anchoring the derivation
//!   formulas. Absent stages degrade to documented fallbacks recorded as
//!   [`BaselineFallback`]s.

mod baseline;
mod segmenter;

use serde::{Deserialize, Serialize};

pub use baseline::{BaselineFallback, StageBaseline, MM2_TO_M2};
pub use segmenter::{StageSegmenter, StageSlice, StageSummary};

/// Stage numbers of the three test phases. Shear may span a closed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Saturation-check (B-value) stage
    pub saturation: i64,
    /// Consolidation stage
    pub consolidation: i64,
    /// First shear stage (shear onset)
    pub shear_start: i64,
    /// Last shear stage, inclusive
    pub shear_end: i64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            saturation: 3,
            consolidation: 7,
            shear_start: 8,
            shear_end: 8,
        }
    }
}

impl StageConfig {
    /// Configuration with a single shear stage.
    pub fn new(saturation: i64, consolidation: i64, shear: i64) -> Self {
        Self {
            saturation,
            consolidation,
            shear_start: shear,
            shear_end: shear,
        }
    }

    /// Extend the shear phase to a closed range.
    pub fn with_shear_range(mut self, start: i64, end: i64) -> Self {
        self.shear_start = start;
        self.shear_end = end;
        self
    }

    /// Whether `stage` belongs to the shear range.
    #[inline]
    pub fn is_shear(&self, stage: i64) -> bool {
        (self.shear_start..=self.shear_end).contains(&stage)
    }

    /// Whether `stage` precedes shear onset (small-strain formulas apply).
    #[inline]
    pub fn is_before_shear(&self, stage: i64) -> bool {
        stage < self.shear_start
    }

    /// Check that the shear range is not inverted.
    pub fn validate(&self) -> Result<(), StageConfigError> {
        if self.shear_end < self.shear_start {
            return Err(StageConfigError::InvertedShearRange {
                start: self.shear_start,
                end: self.shear_end,
            });
        }
        Ok(())
    }
}

/// Errors in a stage configuration
#[derive(Debug, thiserror::Error)]
pub enum StageConfigError {
    /// Shear end precedes shear start
    #[error("Shear stage range is inverted: {start}..={end}")]
    InvertedShearRange {
        /// Configured shear start
        start: i64,
        /// Configured shear end
        end: i64,
    },
}
