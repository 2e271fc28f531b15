//! # Output Reducer
//!
//! Subsamples the shear portion of a derived series for reporting: every row
//! is kept for the first [`ReductionConfig::dense_rows`] shear readings, then one
//! row per [`ReductionConfig::stride`]. The reduced series is terminal output
//! and never feeds back into the derivation.

use serde::{Deserialize, Serialize};

use crate::derive::DerivedRow;
use crate::stage::StageConfig;

/// Default number of leading shear rows kept verbatim
pub const DEFAULT_DENSE_ROWS: usize = 30;
/// Default sampling stride after the dense prefix
pub const DEFAULT_STRIDE: usize = 10;

/// Subsampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Rows kept verbatim from shear onset
    pub dense_rows: usize,
    /// Keep one row in `stride` afterwards
    pub stride: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            dense_rows: DEFAULT_DENSE_ROWS,
            stride: DEFAULT_STRIDE,
        }
    }
}

impl ReductionConfig {
    /// Whether the `i`-th shear row (0-based) is kept.
    #[inline]
    pub fn keeps(&self, i: usize) -> bool {
        // a zero stride degrades to keeping the dense prefix only
        i < self.dense_rows || (self.stride > 0 && (i - self.dense_rows) % self.stride == 0)
    }
}

/// Ordered subsequence of shear-stage rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReducedSeries {
    rows: Vec<DerivedRow>,
    /// Shear rows before reduction
    source_rows: usize,
}

impl ReducedSeries {
    /// Reduce rows that are already restricted to the shear stage.
    pub fn from_shear_rows<'a, I>(rows: I, config: &ReductionConfig) -> Self
    where
        I: IntoIterator<Item = &'a DerivedRow>,
    {
        let mut source_rows = 0;
        let rows = rows
            .into_iter()
            .enumerate()
            .inspect(|_| source_rows += 1)
            .filter(|(i, _)| config.keeps(*i))
            .map(|(_, row)| *row)
            .collect();
        Self { rows, source_rows }
    }

    /// Select the shear rows of a full derived series (by stage-range
    /// membership), then reduce them.
    pub fn build(rows: &[DerivedRow], stages: &StageConfig, config: &ReductionConfig) -> Self {
        Self::from_shear_rows(
            rows.iter().filter(|row| stages.is_shear(row.stage())),
            config,
        )
    }

    /// Kept rows in original order
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// Number of kept rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were kept
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of shear rows before reduction
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Named column slice, or `None` for an unknown column.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        self.rows.iter().map(|row| row.value(name)).collect()
    }

    /// Several named column slices at once.
    pub fn columns<'n>(&self, names: &[&'n str]) -> Option<Vec<(&'n str, Vec<f64>)>> {
        names
            .iter()
            .map(|&name| self.column(name).map(|values| (name, values)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawReading;

    fn rows(stages: &[i64]) -> Vec<DerivedRow> {
        stages
            .iter()
            .enumerate()
            .map(|(i, &stage)| DerivedRow {
                reading: RawReading {
                    stage,
                    time_test: i as f64,
                    ..Default::default()
                },
                cumulative_radial_volume: 0.0,
                cumulative_back_volume: 0.0,
                cumulative_axial_displacement: 0.0,
                current_height: 0.0,
                axial_strain: i as f64,
                effective_radial_stress: 0.0,
                excess_pore_pressure: 0.0,
                side_a: Default::default(),
                side_b: Default::default(),
            })
            .collect()
    }

    fn shear_only(n: usize) -> Vec<DerivedRow> {
        rows(&vec![8; n])
    }

    #[test]
    fn test_short_series_is_unchanged() {
        let input = shear_only(5);
        let reduced = ReducedSeries::build(&input, &StageConfig::default(), &Default::default());
        assert_eq!(reduced.rows(), input.as_slice());
    }

    #[test]
    fn test_dense_prefix_then_stride() {
        let input = shear_only(45);
        let reduced = ReducedSeries::build(&input, &StageConfig::default(), &Default::default());

        assert_eq!(reduced.len(), 32);
        assert_eq!(reduced.source_rows(), 45);
        let kept = reduced.column("axial_strain").unwrap();
        let mut expected: Vec<f64> = (0..30).map(|i| i as f64).collect();
        expected.extend([30.0, 40.0]);
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_empty_input() {
        let reduced = ReducedSeries::build(&[], &StageConfig::default(), &Default::default());
        assert!(reduced.is_empty());
        assert_eq!(reduced.column("axial_strain"), Some(Vec::new()));
    }

    #[test]
    fn test_only_shear_range_is_reduced() {
        let input = rows(&[3, 7, 7, 8, 8, 9, 9, 10]);
        let stages = StageConfig::new(3, 7, 8).with_shear_range(8, 9);
        let reduced = ReducedSeries::build(&input, &stages, &Default::default());

        let times = reduced.column("time_test").unwrap();
        assert_eq!(times, vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_unknown_column() {
        let reduced = ReducedSeries::build(&shear_only(3), &StageConfig::default(), &Default::default());
        assert!(reduced.column("no_such_column").is_none());
        assert!(reduced.columns(&["axial_strain", "no_such_column"]).is_none());
        let slices = reduced.columns(&["axial_strain", "stage"]).unwrap();
        assert_eq!(slices[1].1, vec![8.0; 3]);
    }

    #[test]
    fn test_zero_stride_keeps_prefix() {
        let config = ReductionConfig {
            dense_rows: 2,
            stride: 0,
        };
        let reduced = ReducedSeries::build(&shear_only(6), &StageConfig::default(), &config);
        assert_eq!(reduced.len(), 2);
    }
}
