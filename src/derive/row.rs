use serde::{Deserialize, Serialize};

use crate::ingest::{Field, RawReading};
use crate::schema::columns;

use super::AreaPolicy;

/// Quantities computed once per assumption side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideQuantities {
    /// Current cross-sectional area (m²)
    pub area: f64,
    /// Current diameter (mm)
    pub diameter: f64,
    /// Volumetric strain
    pub volumetric_strain: f64,
    /// Radial strain, compression positive
    pub radial_strain: f64,
    /// Shear strain `2 (εa − εv) / 3`
    pub shear_strain: f64,
    /// Void ratio
    pub void_ratio: f64,
    /// Deviator stress q (kPa)
    pub deviator_stress: f64,
    /// Effective axial stress σ'a (kPa)
    pub effective_axial_stress: f64,
    /// Cambridge mean effective stress p' (kPa)
    pub mean_effective_stress: f64,
    /// Stress ratio q / p'
    pub stress_ratio: f64,
    /// Mobilised friction angle (degrees)
    pub friction_angle: f64,
    /// Undrained strength proxy q / 2 (kPa)
    pub undrained_strength: f64,
    /// MIT mean total stress s (kPa)
    pub average_mean_stress: f64,
    /// MIT mean effective stress s' (kPa)
    pub average_effective_stress: f64,
}

impl SideQuantities {
    /// Values in [`columns::SIDE_COLUMNS`] order.
    pub fn values(&self) -> [f64; columns::SIDE_COLUMNS.len()] {
        [
            self.area,
            self.diameter,
            self.volumetric_strain,
            self.radial_strain,
            self.shear_strain,
            self.void_ratio,
            self.deviator_stress,
            self.effective_axial_stress,
            self.mean_effective_stress,
            self.stress_ratio,
            self.friction_angle,
            self.undrained_strength,
            self.average_mean_stress,
            self.average_effective_stress,
        ]
    }

    /// Value by base column name (see [`columns::SIDE_COLUMNS`]).
    pub fn value(&self, base: &str) -> Option<f64> {
        let value = match base {
            columns::AREA => self.area,
            columns::DIAMETER => self.diameter,
            columns::VOLUMETRIC_STRAIN => self.volumetric_strain,
            columns::RADIAL_STRAIN => self.radial_strain,
            columns::SHEAR_STRAIN => self.shear_strain,
            columns::VOID_RATIO => self.void_ratio,
            columns::DEVIATOR_STRESS => self.deviator_stress,
            columns::EFFECTIVE_AXIAL_STRESS => self.effective_axial_stress,
            columns::MEAN_EFFECTIVE_STRESS => self.mean_effective_stress,
            columns::STRESS_RATIO => self.stress_ratio,
            columns::FRICTION_ANGLE => self.friction_angle,
            columns::UNDRAINED_STRENGTH => self.undrained_strength,
            columns::AVERAGE_MEAN_STRESS => self.average_mean_stress,
            columns::AVERAGE_EFFECTIVE_STRESS => self.average_effective_stress,
            _ => return None,
        };
        Some(value)
    }
}

/// One output record per raw reading. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// The reading this row was derived from
    pub reading: RawReading,
    /// Running sum of radial volume deltas (mm³)
    pub cumulative_radial_volume: f64,
    /// Running sum of back volume deltas (mm³)
    pub cumulative_back_volume: f64,
    /// Running sum of axial displacement deltas (mm)
    pub cumulative_axial_displacement: f64,
    /// Initial height minus the raw displacement reading (mm)
    pub current_height: f64,
    /// Axial strain, compression positive
    pub axial_strain: f64,
    /// Radial pressure minus pore pressure (kPa)
    pub effective_radial_stress: f64,
    /// Pore pressure minus back pressure (kPa)
    pub excess_pore_pressure: f64,
    /// Side A quantities
    pub side_a: SideQuantities,
    /// Side B quantities
    pub side_b: SideQuantities,
}

impl DerivedRow {
    /// Stage index of the underlying reading
    pub fn stage(&self) -> i64 {
        self.reading.stage
    }

    /// Quantities for one side.
    pub fn side(&self, policy: AreaPolicy) -> &SideQuantities {
        match policy {
            AreaPolicy::SideA => &self.side_a,
            AreaPolicy::SideB => &self.side_b,
        }
    }

    /// Every Float64 value in [`columns::numeric_columns`] order.
    pub fn numeric_values(&self) -> Vec<f64> {
        let r = &self.reading;
        let raw = [
            r.time_test,
            r.time_stage,
            r.radial_pressure,
            r.radial_volume,
            r.back_pressure,
            r.back_volume,
            r.axial_load,
            r.pore_pressure,
            r.axial_displacement,
            r.axial_force,
        ];
        let shared = [
            self.cumulative_radial_volume,
            self.cumulative_back_volume,
            self.cumulative_axial_displacement,
            self.current_height,
            self.axial_strain,
            self.effective_radial_stress,
            self.excess_pore_pressure,
        ];

        let mut values = Vec::with_capacity(raw.len() + shared.len() + 2 * columns::SIDE_COLUMNS.len());
        values.extend(raw);
        values.extend(shared);
        values.extend(self.side_a.values());
        values.extend(self.side_b.values());
        values
    }

    /// Numeric value of any output column by name.
    ///
    /// Side columns carry an `_a` / `_b` suffix. Returns `None` for unknown
    /// names.
    pub fn value(&self, column: &str) -> Option<f64> {
        if let Some(field) = Field::ALL.into_iter().find(|f| f.name() == column) {
            return Some(self.reading.get(field));
        }

        let shared = match column {
            columns::CUMULATIVE_RADIAL_VOLUME => Some(self.cumulative_radial_volume),
            columns::CUMULATIVE_BACK_VOLUME => Some(self.cumulative_back_volume),
            columns::CUMULATIVE_AXIAL_DISPLACEMENT => Some(self.cumulative_axial_displacement),
            columns::CURRENT_HEIGHT => Some(self.current_height),
            columns::AXIAL_STRAIN => Some(self.axial_strain),
            columns::EFFECTIVE_RADIAL_STRESS => Some(self.effective_radial_stress),
            columns::EXCESS_PORE_PRESSURE => Some(self.excess_pore_pressure),
            _ => None,
        };
        if shared.is_some() {
            return shared;
        }

        AreaPolicy::BOTH.into_iter().find_map(|policy| {
            column
                .strip_suffix(policy.suffix())
                .and_then(|base| base.strip_suffix('_'))
                .and_then(|base| self.side(policy).value(base))
        })
    }
}
