//! Column names as constants for type safety

// Raw reading columns

/// Stage index (Int64)
pub const STAGE: &str = "stage";
/// Time since start of test (s)
pub const TIME_TEST: &str = "time_test";
/// Time since start of stage (s)
pub const TIME_STAGE: &str = "time_stage";
/// Radial (cell) pressure (kPa)
pub const RADIAL_PRESSURE: &str = "radial_pressure";
/// Radial (cell) volume (mm³)
pub const RADIAL_VOLUME: &str = "radial_volume";
/// Back pressure (kPa)
pub const BACK_PRESSURE: &str = "back_pressure";
/// Back volume (mm³)
pub const BACK_VOLUME: &str = "back_volume";
/// Axial load from the load cell (kN)
pub const AXIAL_LOAD: &str = "axial_load";
/// Pore pressure (kPa)
pub const PORE_PRESSURE: &str = "pore_pressure";
/// Axial displacement (mm)
pub const AXIAL_DISPLACEMENT: &str = "axial_displacement";
/// Axial force (kN)
pub const AXIAL_FORCE: &str = "axial_force";

// Shared derived columns

/// Running radial volume change (mm³)
pub const CUMULATIVE_RADIAL_VOLUME: &str = "cumulative_radial_volume";
/// Running back volume change (mm³)
pub const CUMULATIVE_BACK_VOLUME: &str = "cumulative_back_volume";
/// Running axial displacement (mm)
pub const CUMULATIVE_AXIAL_DISPLACEMENT: &str = "cumulative_axial_displacement";
/// Current specimen height (mm)
pub const CURRENT_HEIGHT: &str = "current_height";
/// Axial strain
pub const AXIAL_STRAIN: &str = "axial_strain";
/// Effective radial stress σ'r (kPa)
pub const EFFECTIVE_RADIAL_STRESS: &str = "effective_radial_stress";
/// Excess pore pressure (kPa)
pub const EXCESS_PORE_PRESSURE: &str = "excess_pore_pressure";

// Per-side base names; the stored column carries an `_a` / `_b` suffix

/// Current area (m²)
pub const AREA: &str = "area";
/// Current diameter (mm)
pub const DIAMETER: &str = "diameter";
/// Volumetric strain
pub const VOLUMETRIC_STRAIN: &str = "volumetric_strain";
/// Radial strain
pub const RADIAL_STRAIN: &str = "radial_strain";
/// Shear strain
pub const SHEAR_STRAIN: &str = "shear_strain";
/// Void ratio
pub const VOID_RATIO: &str = "void_ratio";
/// Deviator stress q (kPa)
pub const DEVIATOR_STRESS: &str = "deviator_stress";
/// Effective axial stress σ'a (kPa)
pub const EFFECTIVE_AXIAL_STRESS: &str = "effective_axial_stress";
/// Cambridge p' (kPa)
pub const MEAN_EFFECTIVE_STRESS: &str = "mean_effective_stress";
/// q / p'
pub const STRESS_RATIO: &str = "stress_ratio";
/// Mobilised friction angle (degrees)
pub const FRICTION_ANGLE: &str = "friction_angle";
/// Undrained strength q / 2 (kPa)
pub const UNDRAINED_STRENGTH: &str = "undrained_strength";
/// MIT s (kPa)
pub const AVERAGE_MEAN_STRESS: &str = "average_mean_stress";
/// MIT s' (kPa)
pub const AVERAGE_EFFECTIVE_STRESS: &str = "average_effective_stress";

/// Raw numeric columns, in output order (after [`STAGE`])
pub const RAW_COLUMNS: [&str; 10] = [
    TIME_TEST,
    TIME_STAGE,
    RADIAL_PRESSURE,
    RADIAL_VOLUME,
    BACK_PRESSURE,
    BACK_VOLUME,
    AXIAL_LOAD,
    PORE_PRESSURE,
    AXIAL_DISPLACEMENT,
    AXIAL_FORCE,
];

/// Derived columns shared by both sides, in output order
pub const SHARED_COLUMNS: [&str; 7] = [
    CUMULATIVE_RADIAL_VOLUME,
    CUMULATIVE_BACK_VOLUME,
    CUMULATIVE_AXIAL_DISPLACEMENT,
    CURRENT_HEIGHT,
    AXIAL_STRAIN,
    EFFECTIVE_RADIAL_STRESS,
    EXCESS_PORE_PRESSURE,
];

/// Per-side base names, in output order
pub const SIDE_COLUMNS: [&str; 14] = [
    AREA,
    DIAMETER,
    VOLUMETRIC_STRAIN,
    RADIAL_STRAIN,
    SHEAR_STRAIN,
    VOID_RATIO,
    DEVIATOR_STRESS,
    EFFECTIVE_AXIAL_STRESS,
    MEAN_EFFECTIVE_STRESS,
    STRESS_RATIO,
    FRICTION_ANGLE,
    UNDRAINED_STRENGTH,
    AVERAGE_MEAN_STRESS,
    AVERAGE_EFFECTIVE_STRESS,
];

/// Stored name of a per-side column, e.g. `deviator_stress_a`.
pub fn side_column(base: &str, suffix: &str) -> String {
    format!("{base}_{suffix}")
}

/// Every Float64 column in output order: raw, shared, then side A and side B.
pub fn numeric_columns() -> Vec<String> {
    let sides = ["a", "b"]
        .into_iter()
        .flat_map(|suffix| SIDE_COLUMNS.iter().map(move |base| side_column(base, suffix)));

    RAW_COLUMNS
        .iter()
        .chain(SHARED_COLUMNS.iter())
        .map(|name| name.to_string())
        .chain(sides)
        .collect()
}

/// Physical unit of a column, if it has one.
pub fn unit_of(column: &str) -> Option<&'static str> {
    let base = column
        .strip_suffix("_a")
        .or_else(|| column.strip_suffix("_b"))
        .unwrap_or(column);
    let unit = match base {
        TIME_TEST | TIME_STAGE => "s",
        RADIAL_PRESSURE | BACK_PRESSURE | PORE_PRESSURE | EFFECTIVE_RADIAL_STRESS
        | EXCESS_PORE_PRESSURE | DEVIATOR_STRESS | EFFECTIVE_AXIAL_STRESS
        | MEAN_EFFECTIVE_STRESS | UNDRAINED_STRENGTH | AVERAGE_MEAN_STRESS
        | AVERAGE_EFFECTIVE_STRESS => "kPa",
        RADIAL_VOLUME | BACK_VOLUME | CUMULATIVE_RADIAL_VOLUME | CUMULATIVE_BACK_VOLUME => "mm3",
        AXIAL_LOAD | AXIAL_FORCE => "kN",
        AXIAL_DISPLACEMENT | CUMULATIVE_AXIAL_DISPLACEMENT | CURRENT_HEIGHT | DIAMETER => "mm",
        AREA => "m2",
        FRICTION_ANGLE => "deg",
        _ => return None,
    };
    Some(unit)
}
