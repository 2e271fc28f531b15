use log::debug;
use serde::{Deserialize, Serialize};

use crate::guard::{guarded_divide, Quotient};
use crate::specimen::SpecimenProperties;

use super::{StageConfig, StageSegmenter};

/// m² per mm²; areas are reported in m² so that kN / area is kPa.
pub const MM2_TO_M2: f64 = 1.0e-6;

/// A baseline input that was unavailable and replaced by its fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineFallback {
    /// The log has no readings; first-of-record values are 0
    EmptyRecord,
    /// Saturation-check stage absent; B-value is 0
    MissingSaturationStage,
    /// Consolidation stage absent; consolidation anchors are 0
    MissingConsolidationStage,
    /// Shear-onset stage absent; shear anchors are 0
    MissingShearOnsetStage,
    /// Shear onset displacement below the first reading; onset volume change forced to 0
    NegativeShearOnsetGap,
    /// Post-consolidation height is 0; consolidated areas are 0
    ZeroConsolidatedHeight,
}

/// Reference scalars extracted from specific rows and stages.
///
/// Built once per log by [`StageBaseline::extract`] after the
/// [`SpecimenProperties`], and read-only thereafter. Volumes in mm³, lengths in
/// mm, pressures in kPa, areas in m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBaseline {
    /// Back volume at the first reading
    pub back_volume_first: f64,
    /// Back pressure at the first reading
    pub back_pressure_first: f64,
    /// Radial pressure at the first reading
    pub radial_pressure_first: f64,
    /// Pore pressure at the first reading
    pub pore_pressure_first: f64,
    /// Axial displacement at the first reading
    pub axial_displacement_first: f64,

    /// Skempton B-value over the saturation-check stage
    pub b_value: f64,

    /// Axial displacement at the first consolidation reading
    pub axial_displacement_consolidation: f64,
    /// Back volume at the last consolidation reading
    pub back_volume_consolidation_end: f64,
    /// Back volume change from the first reading to the end of consolidation
    pub consolidation_volume_change: f64,

    /// Axial displacement at the first shear reading
    pub axial_displacement_shear_onset: f64,
    /// Pore pressure at the first shear reading
    pub pore_pressure_shear_onset: f64,
    /// Displaced height between the first reading and shear onset (`hs`)
    pub shear_onset_height_change: f64,
    /// Volume change attributed to the shear-onset gap
    pub shear_onset_volume_change: f64,
    /// Specimen height after consolidation
    pub consolidated_height: f64,

    /// Post-consolidation void volume, side A (measured volume change)
    pub void_volume_a: f64,
    /// Post-consolidation void volume, side B (final moisture content)
    pub void_volume_b: f64,
    /// Consolidated cross-sectional area, side A
    pub consolidated_area_a: f64,
    /// Consolidated cross-sectional area, side B
    pub consolidated_area_b: f64,
    /// Void ratio after consolidation, side A
    pub consolidation_void_ratio_a: f64,
    /// Void ratio after consolidation, side B
    pub consolidation_void_ratio_b: f64,

    /// Inputs that used their fallback
    pub fallbacks: Vec<BaselineFallback>,
}

impl StageBaseline {
    /// Extract the baseline from a segmented log.
    ///
    /// Never fails: every absent source degrades to 0.0 and is recorded in
    /// [`fallbacks`](Self::fallbacks).
    pub fn extract(
        segmenter: &StageSegmenter<'_>,
        stages: &StageConfig,
        props: &SpecimenProperties,
    ) -> Self {
        let mut fallbacks = Vec::new();

        let first = segmenter.first().copied().unwrap_or_else(|| {
            fallbacks.push(BaselineFallback::EmptyRecord);
            Default::default()
        });

        // Saturation check
        let saturation = segmenter.stage(stages.saturation);
        let b_value = match (saturation.first(), saturation.last()) {
            (Some(start), Some(end)) => guarded_divide(
                end.pore_pressure - start.pore_pressure,
                end.radial_pressure - start.radial_pressure,
            ),
            _ => {
                fallbacks.push(BaselineFallback::MissingSaturationStage);
                0.0
            }
        };

        // Consolidation
        let consolidation = segmenter.stage(stages.consolidation);
        let (axial_displacement_consolidation, back_volume_consolidation_end, consolidation_volume_change) =
            match (consolidation.first(), consolidation.last()) {
                (Some(start), Some(end)) => (
                    start.axial_displacement,
                    end.back_volume,
                    end.back_volume - first.back_volume,
                ),
                _ => {
                    fallbacks.push(BaselineFallback::MissingConsolidationStage);
                    (0.0, 0.0, 0.0)
                }
            };

        // Shear onset
        let (axial_displacement_shear_onset, pore_pressure_shear_onset) =
            match segmenter.first_of(stages.shear_start) {
                Some(onset) => (onset.axial_displacement, onset.pore_pressure),
                None => {
                    fallbacks.push(BaselineFallback::MissingShearOnsetStage);
                    (0.0, 0.0)
                }
            };

        let shear_onset_height_change = axial_displacement_shear_onset - first.axial_displacement;
        let shear_onset_volume_change = if shear_onset_height_change >= 0.0 {
            3.0 * props.initial_volume
                * guarded_divide(shear_onset_height_change, props.initial_height)
        } else {
            fallbacks.push(BaselineFallback::NegativeShearOnsetGap);
            0.0
        };

        let consolidated_height = props.initial_height - axial_displacement_shear_onset;

        let void_volume_a = (props.initial_volume
            - consolidation_volume_change
            - shear_onset_volume_change)
            - props.solid_volume;
        let void_volume_b = props.solid_volume * props.final_void_ratio;

        let area = |void_volume: f64| {
            Quotient::of(void_volume + props.solid_volume, consolidated_height)
        };
        let (area_a, area_b) = (area(void_volume_a), area(void_volume_b));
        if area_a.is_fallback() || area_b.is_fallback() {
            fallbacks.push(BaselineFallback::ZeroConsolidatedHeight);
        }

        if !fallbacks.is_empty() {
            debug!("Stage baseline used fallbacks: {:?}", fallbacks);
        }

        Self {
            back_volume_first: first.back_volume,
            back_pressure_first: first.back_pressure,
            radial_pressure_first: first.radial_pressure,
            pore_pressure_first: first.pore_pressure,
            axial_displacement_first: first.axial_displacement,
            b_value,
            axial_displacement_consolidation,
            back_volume_consolidation_end,
            consolidation_volume_change,
            axial_displacement_shear_onset,
            pore_pressure_shear_onset,
            shear_onset_height_change,
            shear_onset_volume_change,
            consolidated_height,
            void_volume_a,
            void_volume_b,
            consolidated_area_a: area_a.value() * MM2_TO_M2,
            consolidated_area_b: area_b.value() * MM2_TO_M2,
            consolidation_void_ratio_a: guarded_divide(void_volume_a, props.solid_volume),
            consolidation_void_ratio_b: guarded_divide(void_volume_b, props.solid_volume),
            fallbacks,
        }
    }

    /// Whether `fallback` was taken while extracting this baseline.
    pub fn used(&self, fallback: BaselineFallback) -> bool {
        self.fallbacks.contains(&fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawReading;

    fn props() -> SpecimenProperties {
        SpecimenProperties::compute(80.0, 0.18, 20.0, 38.0, 2.7).with_final_state(0.2, 1.0)
    }

    fn reading(stage: i64, back_volume: f64, axial_displacement: f64) -> RawReading {
        RawReading {
            stage,
            back_volume,
            axial_displacement,
            radial_pressure: 100.0,
            pore_pressure: 50.0,
            ..Default::default()
        }
    }

    fn full_log() -> Vec<RawReading> {
        let mut rows = vec![
            reading(3, 1000.0, 0.0),
            RawReading {
                radial_pressure: 150.0,
                pore_pressure: 97.5,
                ..reading(3, 1000.0, 0.0)
            },
            reading(7, 1000.0, 0.1),
            reading(7, 1200.0, 0.3),
        ];
        rows.extend((0..3).map(|i| reading(8, 1200.0, 0.3 + i as f64 * 0.1)));
        rows
    }

    #[test]
    fn test_extract_full_log() {
        let rows = full_log();
        let segmenter = StageSegmenter::new(&rows);
        let props = props();
        let baseline = StageBaseline::extract(&segmenter, &StageConfig::new(3, 7, 8), &props);

        assert!(baseline.fallbacks.is_empty());
        assert!((baseline.b_value - 0.95).abs() < 1e-12);
        assert_eq!(baseline.axial_displacement_consolidation, 0.1);
        assert_eq!(baseline.back_volume_consolidation_end, 1200.0);
        assert_eq!(baseline.consolidation_volume_change, 200.0);
        assert_eq!(baseline.axial_displacement_shear_onset, 0.3);

        let hs = 0.3;
        let dv = 3.0 * props.initial_volume * hs / 20.0;
        assert!((baseline.shear_onset_volume_change - dv).abs() < 1e-9);
        assert!((baseline.consolidated_height - 19.7).abs() < 1e-12);

        let void_a = props.initial_volume - 200.0 - dv - props.solid_volume;
        assert!((baseline.void_volume_a - void_a).abs() < 1e-9);
        assert!((baseline.void_volume_b - props.solid_volume * 0.54).abs() < 1e-9);

        let area_a = (void_a + props.solid_volume) / 19.7 * MM2_TO_M2;
        assert!((baseline.consolidated_area_a - area_a).abs() < 1e-15);
        assert!(baseline.consolidated_area_b > 0.0);
    }

    #[test]
    fn test_absent_stages_fall_back() {
        let rows = vec![reading(1, 10.0, 0.0), reading(1, 11.0, 0.0)];
        let segmenter = StageSegmenter::new(&rows);
        let baseline = StageBaseline::extract(&segmenter, &StageConfig::default(), &props());

        assert!(baseline.used(BaselineFallback::MissingSaturationStage));
        assert!(baseline.used(BaselineFallback::MissingConsolidationStage));
        assert!(baseline.used(BaselineFallback::MissingShearOnsetStage));
        assert_eq!(baseline.b_value, 0.0);
        assert_eq!(baseline.back_volume_consolidation_end, 0.0);
        assert_eq!(baseline.consolidation_volume_change, 0.0);
        assert_eq!(baseline.back_volume_first, 10.0);
    }

    #[test]
    fn test_negative_onset_gap_forces_zero_volume_change() {
        let rows = vec![reading(7, 0.0, 2.0), reading(8, 0.0, 1.5)];
        let segmenter = StageSegmenter::new(&rows);
        let baseline = StageBaseline::extract(&segmenter, &StageConfig::default(), &props());

        assert!((baseline.shear_onset_height_change + 0.5).abs() < 1e-12);
        assert_eq!(baseline.shear_onset_volume_change, 0.0);
        assert!(baseline.used(BaselineFallback::NegativeShearOnsetGap));
    }

    #[test]
    fn test_zero_consolidated_height() {
        let rows = vec![reading(8, 0.0, 20.0)];
        let segmenter = StageSegmenter::new(&rows);
        let baseline = StageBaseline::extract(&segmenter, &StageConfig::default(), &props());

        assert_eq!(baseline.consolidated_height, 0.0);
        assert_eq!(baseline.consolidated_area_a, 0.0);
        assert_eq!(baseline.consolidated_area_b, 0.0);
        assert!(baseline.used(BaselineFallback::ZeroConsolidatedHeight));
    }

    #[test]
    fn test_empty_record() {
        let segmenter = StageSegmenter::new(&[]);
        let baseline = StageBaseline::extract(&segmenter, &StageConfig::default(), &props());
        assert!(baseline.used(BaselineFallback::EmptyRecord));
        assert_eq!(baseline.axial_displacement_first, 0.0);
    }
}
