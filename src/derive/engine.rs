use std::f64::consts::PI;

use crate::guard::{clipped_asin_degrees, finite_or_fallback, guarded_divide};
use crate::ingest::RawReading;
use crate::specimen::SpecimenProperties;
use crate::stage::{StageBaseline, StageConfig, MM2_TO_M2};

use super::{AreaPolicy, DerivedRow, SideQuantities};

/// Mobilised friction angle in degrees for a stress ratio `q / p'`.
///
/// The sine argument `3η / (6 + η)` leaves `[-1, 1]` near failure and is clipped,
/// so the result is always within `[-90, 90]`.
pub fn friction_angle(stress_ratio: f64) -> f64 {
    clipped_asin_degrees(guarded_divide(3.0 * stress_ratio, 6.0 + stress_ratio))
}

/// The one piece of carried state: previous raw values and running sums.
///
/// Reset per log by constructing a fresh value.
#[derive(Debug, Clone, Copy, Default)]
pub struct CumulativeState {
    previous: Option<RawReading>,
    radial_volume: f64,
    back_volume: f64,
    axial_displacement: f64,
}

/// Cumulative columns for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cumulative {
    /// Running radial volume change (mm³)
    pub radial_volume: f64,
    /// Running back volume change (mm³)
    pub back_volume: f64,
    /// Running axial displacement (mm)
    pub axial_displacement: f64,
}

impl CumulativeState {
    /// Fold `reading` into the running sums. The first delta is 0.
    pub fn advance(&mut self, reading: &RawReading) -> Cumulative {
        if let Some(previous) = self.previous {
            self.radial_volume += reading.radial_volume - previous.radial_volume;
            self.back_volume += reading.back_volume - previous.back_volume;
            self.axial_displacement += reading.axial_displacement - previous.axial_displacement;
        }
        self.previous = Some(*reading);

        Cumulative {
            radial_volume: self.radial_volume,
            back_volume: self.back_volume,
            axial_displacement: self.axial_displacement,
        }
    }
}

/// Row-wise derivation of mechanical quantities.
///
/// Holds read-only references to the per-log scalars; the ordered pass in
/// [`derive`](Self::derive) threads a [`CumulativeState`] through the readings,
/// so rows cannot be computed out of order.
#[derive(Debug, Clone, Copy)]
pub struct DerivationEngine<'a> {
    props: &'a SpecimenProperties,
    baseline: &'a StageBaseline,
    stages: StageConfig,
}

impl<'a> DerivationEngine<'a> {
    /// Create an engine for one log
    pub fn new(
        props: &'a SpecimenProperties,
        baseline: &'a StageBaseline,
        stages: StageConfig,
    ) -> Self {
        Self {
            props,
            baseline,
            stages,
        }
    }

    /// Derive one row per reading, in order.
    pub fn derive(&self, readings: &[RawReading]) -> Vec<DerivedRow> {
        readings
            .iter()
            .scan(CumulativeState::default(), |state, reading| {
                let cumulative = state.advance(reading);
                Some(self.derive_row(reading, cumulative))
            })
            .collect()
    }

    /// Derive a single row given its cumulative columns.
    pub fn derive_row(&self, reading: &RawReading, cumulative: Cumulative) -> DerivedRow {
        let props = self.props;
        let before_shear = self.stages.is_before_shear(reading.stage);

        // Raw displacement, not the cumulative column.
        let current_height = props.initial_height - reading.axial_displacement;

        let axial_strain = if before_shear {
            guarded_divide(cumulative.axial_displacement, props.initial_height)
        } else {
            guarded_divide(
                cumulative.axial_displacement - self.baseline.axial_displacement_shear_onset,
                props.initial_height - cumulative.axial_displacement,
            )
        };

        let effective_radial_stress = reading.radial_pressure - reading.pore_pressure;

        let side = |policy| {
            self.side(
                policy,
                reading,
                &cumulative,
                before_shear,
                axial_strain,
                effective_radial_stress,
            )
        };

        DerivedRow {
            reading: *reading,
            cumulative_radial_volume: cumulative.radial_volume,
            cumulative_back_volume: cumulative.back_volume,
            cumulative_axial_displacement: cumulative.axial_displacement,
            current_height,
            axial_strain,
            effective_radial_stress,
            excess_pore_pressure: reading.pore_pressure - reading.back_pressure,
            side_a: side(AreaPolicy::SideA),
            side_b: side(AreaPolicy::SideB),
        }
    }

    /// The formula family shared by both sides.
    fn side(
        &self,
        policy: AreaPolicy,
        reading: &RawReading,
        cumulative: &Cumulative,
        before_shear: bool,
        axial_strain: f64,
        effective_radial_stress: f64,
    ) -> SideQuantities {
        let props = self.props;
        let inputs = policy.inputs(self.baseline);
        let back_volume_end = self.baseline.back_volume_consolidation_end;

        let volumetric_strain = if before_shear {
            guarded_divide(cumulative.back_volume, props.initial_volume)
        } else {
            guarded_divide(
                back_volume_end - cumulative.back_volume,
                inputs.void_volume + props.solid_volume,
            )
        };

        let area = guarded_divide(
            inputs.consolidated_area * (1.0 - volumetric_strain),
            1.0 - axial_strain,
        );
        let deviator_stress = guarded_divide(reading.axial_load, area);
        let effective_axial_stress = deviator_stress + effective_radial_stress;
        let mean_effective_stress =
            guarded_divide(2.0 * effective_radial_stress + effective_axial_stress, 3.0);
        let stress_ratio = guarded_divide(deviator_stress, mean_effective_stress);
        let friction_angle = friction_angle(stress_ratio);

        // Raw back volume reading, not the cumulative column.
        let void_ratio = guarded_divide(
            inputs.void_volume - (back_volume_end - reading.back_volume),
            props.solid_volume,
        );

        let diameter = if area > 0.0 {
            finite_or_fallback((4.0 * area / MM2_TO_M2 / PI).sqrt())
        } else {
            0.0
        };
        let radial_strain = if diameter > 0.0 {
            guarded_divide(props.initial_diameter - diameter, props.initial_diameter)
        } else {
            0.0
        };

        let total_axial_stress = deviator_stress + reading.radial_pressure;

        SideQuantities {
            area,
            diameter,
            volumetric_strain,
            radial_strain,
            shear_strain: 2.0 * (axial_strain - volumetric_strain) / 3.0,
            void_ratio,
            deviator_stress,
            effective_axial_stress,
            mean_effective_stress,
            stress_ratio,
            friction_angle,
            undrained_strength: deviator_stress / 2.0,
            average_mean_stress: (total_axial_stress + reading.radial_pressure) / 2.0,
            average_effective_stress: (effective_axial_stress + effective_radial_stress) / 2.0,
        }
    }
}
