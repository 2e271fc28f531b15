//! Normalisation of raw instrument labels to canonical names.

use serde::{Deserialize, Serialize};

/// Canonical metadata keys recognised by the specimen property calculator.
pub mod keys {
    /// Initial specimen mass (g)
    pub const INITIAL_MASS: &str = "initial_mass";
    /// Initial water content (fraction)
    pub const INITIAL_WATER_CONTENT: &str = "initial_water_content";
    /// Final water content (fraction)
    pub const FINAL_WATER_CONTENT: &str = "final_water_content";
    /// Initial specimen height (mm)
    pub const INITIAL_HEIGHT: &str = "initial_height";
    /// Initial specimen diameter (mm)
    pub const INITIAL_DIAMETER: &str = "initial_diameter";
    /// Specific gravity of solids
    pub const SPECIFIC_GRAVITY: &str = "specific_gravity";
    /// Degree of saturation assumed for the final state (fraction)
    pub const SATURATION_COEFFICIENT: &str = "saturation_coefficient";
}

const METADATA_ALIASES: &[(&str, &[&str])] = &[
    (
        keys::INITIAL_MASS,
        &["initial mass", "mass", "specimen mass", "initial weight"],
    ),
    (
        keys::INITIAL_WATER_CONTENT,
        &[
            "initial water content",
            "initial moisture content",
            "water content",
            "moisture content",
        ],
    ),
    (
        keys::FINAL_WATER_CONTENT,
        &["final water content", "final moisture content"],
    ),
    (
        keys::INITIAL_HEIGHT,
        &["initial height", "height", "specimen height"],
    ),
    (
        keys::INITIAL_DIAMETER,
        &["initial diameter", "diameter", "specimen diameter"],
    ),
    (
        keys::SPECIFIC_GRAVITY,
        &["specific gravity", "specific gravity of solids", "gs"],
    ),
    (
        keys::SATURATION_COEFFICIENT,
        &["saturation coefficient", "degree of saturation", "sr"],
    ),
];

/// Canonical reading fields, in tabular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Integer stage index
    Stage,
    /// Elapsed time since test start (s)
    TimeTest,
    /// Elapsed time since stage start (s)
    TimeStage,
    /// Radial (cell) pressure (kPa)
    RadialPressure,
    /// Radial (cell) volume (mm³)
    RadialVolume,
    /// Back pressure (kPa)
    BackPressure,
    /// Back volume (mm³)
    BackVolume,
    /// Axial load from the load cell (kN)
    AxialLoad,
    /// Pore pressure (kPa)
    PorePressure,
    /// Axial displacement (mm)
    AxialDisplacement,
    /// Axial force (kN)
    AxialForce,
}

impl Field {
    /// Every canonical field.
    pub const ALL: [Field; 11] = [
        Field::Stage,
        Field::TimeTest,
        Field::TimeStage,
        Field::RadialPressure,
        Field::RadialVolume,
        Field::BackPressure,
        Field::BackVolume,
        Field::AxialLoad,
        Field::PorePressure,
        Field::AxialDisplacement,
        Field::AxialForce,
    ];

    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Stage => "stage",
            Field::TimeTest => "time_test",
            Field::TimeStage => "time_stage",
            Field::RadialPressure => "radial_pressure",
            Field::RadialVolume => "radial_volume",
            Field::BackPressure => "back_pressure",
            Field::BackVolume => "back_volume",
            Field::AxialLoad => "axial_load",
            Field::PorePressure => "pore_pressure",
            Field::AxialDisplacement => "axial_displacement",
            Field::AxialForce => "axial_force",
        }
    }

    /// Whether a log without this column cannot be processed.
    pub fn is_required(&self) -> bool {
        !matches!(self, Field::TimeTest | Field::TimeStage | Field::AxialForce)
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Stage => &["stage number", "stage no", "stage no.", "stage"],
            Field::TimeTest => &["time since start of test", "test time", "elapsed time"],
            Field::TimeStage => &["time since start of stage", "stage time"],
            Field::RadialPressure => &["radial pressure", "cell pressure"],
            Field::RadialVolume => &["radial volume", "cell volume"],
            Field::BackPressure => &["back pressure"],
            Field::BackVolume => &["back volume"],
            Field::AxialLoad => &["load cell", "axial load"],
            Field::PorePressure => &["pore pressure"],
            Field::AxialDisplacement => &["axial displacement", "displacement"],
            Field::AxialForce => &["axial force"],
        }
    }

    /// Resolve a raw column label to a canonical field.
    pub fn from_label(label: &str) -> Option<Field> {
        let (name, _) = normalize_label(label);
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name || field.aliases().contains(&name.as_str()))
    }
}

/// Split a raw label into its normalised name and optional unit.
///
/// `"Initial Height (mm):"` becomes `("initial height", Some("mm"))`.
pub fn normalize_label(label: &str) -> (String, Option<String>) {
    let cleaned = label.trim_start_matches('\u{feff}').trim().trim_matches('"');
    let (name, unit) = match cleaned.find(&['(', '['][..]) {
        Some(pos) => {
            let unit = cleaned[pos + 1..]
                .trim_end_matches(':')
                .trim()
                .trim_end_matches(&[')', ']'][..])
                .trim();
            let unit = (!unit.is_empty()).then(|| unit.to_string());
            (&cleaned[..pos], unit)
        }
        None => (cleaned, None),
    };

    let name = name
        .trim()
        .trim_end_matches(':')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    (name, unit)
}

/// Resolve a metadata label to its canonical key, or the normalised label itself.
pub fn metadata_key(label: &str) -> (String, Option<String>) {
    let (name, unit) = normalize_label(label);
    let key = METADATA_ALIASES
        .iter()
        .find(|(key, aliases)| *key == name || aliases.contains(&name.as_str()))
        .map(|(key, _)| key.to_string())
        .unwrap_or_else(|| name.replace(' ', "_"));
    (key, unit)
}
