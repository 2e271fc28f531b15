use super::*;
use crate::schema::columns;
use crate::stage::StageSegmenter;
use proptest::prelude::*;

fn props() -> SpecimenProperties {
    SpecimenProperties::compute(80.0, 0.18, 20.0, 38.0, 2.7).with_final_state(0.2, 1.0)
}

fn shear_reading(i: usize) -> RawReading {
    let i = i as f64;
    RawReading {
        stage: 8,
        time_test: i * 60.0,
        radial_pressure: 300.0,
        back_pressure: 200.0,
        back_volume: 1500.0,
        axial_load: 0.1 + 0.05 * i,
        pore_pressure: 200.0 - 5.0 * i,
        axial_displacement: 0.05 * i,
        ..Default::default()
    }
}

/// Saturation (3), consolidation (7) and shear (8) rows.
fn full_log() -> Vec<RawReading> {
    let mut rows = vec![
        RawReading {
            radial_pressure: 100.0,
            pore_pressure: 50.0,
            back_volume: 1000.0,
            ..RawReading::at_stage(3)
        },
        RawReading {
            radial_pressure: 150.0,
            pore_pressure: 98.0,
            back_volume: 1000.0,
            ..RawReading::at_stage(3)
        },
    ];
    rows.extend((0..4).map(|i| RawReading {
        radial_pressure: 300.0,
        pore_pressure: 200.0,
        back_pressure: 200.0,
        back_volume: 1000.0 + 100.0 * i as f64,
        axial_displacement: 0.02 * i as f64,
        ..RawReading::at_stage(7)
    }));
    rows.extend((0..10).map(|i| RawReading {
        back_volume: 1300.0,
        axial_displacement: 0.06 + 0.05 * i as f64,
        ..shear_reading(i)
    }));
    rows
}

fn derive_log(readings: &[RawReading]) -> (StageBaseline, Vec<DerivedRow>) {
    let props = props();
    let stages = StageConfig::default();
    let baseline = StageBaseline::extract(&StageSegmenter::new(readings), &stages, &props);
    let rows = derive_rows(readings, &props, &baseline, stages);
    (baseline, rows)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_one_row_per_reading() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);
    assert_eq!(rows.len(), readings.len());
    for (row, reading) in rows.iter().zip(&readings) {
        assert_eq!(&row.reading, reading);
    }
}

#[test]
fn test_empty_input() {
    let (_, rows) = derive_log(&[]);
    assert!(rows.is_empty());
}

#[test]
fn test_first_delta_is_zero() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);
    assert_eq!(rows[0].cumulative_back_volume, 0.0);
    assert_eq!(rows[0].cumulative_radial_volume, 0.0);
    assert_eq!(rows[0].cumulative_axial_displacement, 0.0);
}

#[test]
fn test_current_height_uses_raw_displacement() {
    let readings = vec![
        RawReading {
            axial_displacement: 1.0,
            ..RawReading::at_stage(7)
        },
        RawReading {
            axial_displacement: 1.5,
            ..RawReading::at_stage(7)
        },
    ];
    let (_, rows) = derive_log(&readings);
    assert_eq!(rows[1].cumulative_axial_displacement, 0.5);
    assert_eq!(rows[1].current_height, 18.5);
}

#[test]
fn test_small_strain_before_shear() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);
    let props = props();

    // last consolidation row
    let row = &rows[5];
    assert_close(row.axial_strain, row.cumulative_axial_displacement / 20.0);
    for policy in AreaPolicy::BOTH {
        assert_close(
            row.side(policy).volumetric_strain,
            row.cumulative_back_volume / props.initial_volume,
        );
    }
}

#[test]
fn test_large_strain_from_shear_onset() {
    let readings = full_log();
    let (baseline, rows) = derive_log(&readings);
    let props = props();

    for row in rows.iter().filter(|r| r.stage() == 8) {
        let cum = row.cumulative_axial_displacement;
        assert_close(
            row.axial_strain,
            (cum - baseline.axial_displacement_shear_onset) / (20.0 - cum),
        );
        for policy in AreaPolicy::BOTH {
            let inputs = policy.inputs(&baseline);
            let side = row.side(policy);
            assert_close(
                side.volumetric_strain,
                (baseline.back_volume_consolidation_end - row.cumulative_back_volume)
                    / (inputs.void_volume + props.solid_volume),
            );
            assert_close(
                side.void_ratio,
                (inputs.void_volume
                    - (baseline.back_volume_consolidation_end - row.reading.back_volume))
                    / props.solid_volume,
            );
        }
    }
}

#[test]
fn test_stress_chain() {
    let readings = full_log();
    let (baseline, rows) = derive_log(&readings);

    let row = &rows[10];
    let sigma_r = row.reading.radial_pressure - row.reading.pore_pressure;
    assert_eq!(row.effective_radial_stress, sigma_r);
    assert_eq!(
        row.excess_pore_pressure,
        row.reading.pore_pressure - row.reading.back_pressure
    );

    for policy in AreaPolicy::BOTH {
        let side = row.side(policy);
        let area = policy.inputs(&baseline).consolidated_area * (1.0 - side.volumetric_strain)
            / (1.0 - row.axial_strain);
        assert_close(side.area, area);

        let q = row.reading.axial_load / area;
        assert_close(side.deviator_stress, q);
        assert_close(side.effective_axial_stress, q + sigma_r);

        let p = (2.0 * sigma_r + q + sigma_r) / 3.0;
        assert_close(side.mean_effective_stress, p);
        assert_close(side.stress_ratio, q / p);
        assert_close(
            side.friction_angle,
            (3.0 * (q / p) / (6.0 + q / p)).asin().to_degrees(),
        );
        assert_close(side.undrained_strength, q / 2.0);
        assert_close(
            side.shear_strain,
            2.0 * (row.axial_strain - side.volumetric_strain) / 3.0,
        );
        assert_close(
            side.average_mean_stress,
            (q + 2.0 * row.reading.radial_pressure) / 2.0,
        );
        assert_close(side.average_effective_stress, (q + 2.0 * sigma_r) / 2.0);
    }
}

#[test]
fn test_diameter_from_area() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);

    for policy in AreaPolicy::BOTH {
        let side = rows[12].side(policy);
        let area_mm2 = side.area * 1.0e6;
        assert_close(side.diameter, (4.0 * area_mm2 / std::f64::consts::PI).sqrt());
        assert_close(side.radial_strain, (38.0 - side.diameter) / 38.0);
    }
}

#[test]
fn test_sides_differ_only_by_policy_inputs() {
    let readings = full_log();
    let (baseline, rows) = derive_log(&readings);
    assert_ne!(baseline.void_volume_a, baseline.void_volume_b);

    let row = &rows[8];
    assert_ne!(row.side_a.deviator_stress, row.side_b.deviator_stress);
    assert_ne!(row.side_a.void_ratio, row.side_b.void_ratio);
}

#[test]
fn test_zero_area_degrades_to_fallback() {
    // no consolidation, and the onset displacement equals the initial height
    let readings = vec![
        RawReading {
            axial_load: 1.0,
            radial_pressure: 100.0,
            axial_displacement: 20.0,
            ..RawReading::at_stage(8)
        };
        3
    ];
    let (baseline, rows) = derive_log(&readings);
    assert_eq!(baseline.consolidated_area_a, 0.0);

    for row in &rows {
        for policy in AreaPolicy::BOTH {
            let side = row.side(policy);
            assert_eq!(side.area, 0.0);
            assert_eq!(side.deviator_stress, 0.0);
            assert_eq!(side.diameter, 0.0);
            assert_eq!(side.radial_strain, 0.0);
        }
    }
}

#[test]
fn test_no_nan_on_degenerate_specimen() {
    let readings = full_log();
    let props = SpecimenProperties::compute(0.0, 0.0, 0.0, 0.0, 0.0);
    let stages = StageConfig::default();
    let baseline = StageBaseline::extract(&StageSegmenter::new(&readings), &stages, &props);

    for row in derive_rows(&readings, &props, &baseline, stages) {
        for column in columns::numeric_columns() {
            let value = row.value(&column).unwrap_or(f64::NAN);
            assert!(value.is_finite(), "{column} is {value}");
        }
    }
}

#[test]
fn test_friction_angle_clips_at_bound() {
    assert_eq!(friction_angle(100.0), 90.0);
    assert_eq!(friction_angle(0.0), 0.0);
    assert_eq!(friction_angle(-6.0), 0.0);
    assert!(!friction_angle(-7.0).is_nan());
    assert!(friction_angle(1.0) > 0.0 && friction_angle(1.0) < 90.0);
}

#[test]
fn test_rerun_is_bit_identical() {
    let readings = full_log();
    let (_, first) = derive_log(&readings);
    let (_, second) = derive_log(&readings);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        for column in columns::numeric_columns() {
            let (a, b) = (a.value(&column), b.value(&column));
            assert_eq!(a.map(f64::to_bits), b.map(f64::to_bits), "{column}");
        }
    }
}

#[test]
fn test_row_value_lookup() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);
    let row = &rows[9];

    assert_eq!(row.value(columns::BACK_VOLUME), Some(row.reading.back_volume));
    assert_eq!(row.value(columns::AXIAL_STRAIN), Some(row.axial_strain));
    assert_eq!(
        row.value("deviator_stress_a"),
        Some(row.side_a.deviator_stress)
    );
    assert_eq!(row.value("void_ratio_b"), Some(row.side_b.void_ratio));
    assert_eq!(row.value("void_ratio_c"), None);
    assert_eq!(row.value("nonsense"), None);
}

#[test]
fn test_numeric_values_follow_column_order() {
    let readings = full_log();
    let (_, rows) = derive_log(&readings);
    let names = columns::numeric_columns();

    for row in &rows {
        let values = row.numeric_values();
        assert_eq!(values.len(), names.len());
        for (name, value) in names.iter().zip(values) {
            assert_eq!(row.value(name), Some(value), "{name}");
        }
    }
}

#[test]
fn test_cumulative_state_resets_per_log() {
    let readings = full_log();
    let (_, first) = derive_log(&readings[6..]);
    assert_eq!(first[0].cumulative_axial_displacement, 0.0);
    assert_eq!(first[0].cumulative_back_volume, 0.0);
}

proptest! {
    #[test]
    fn prop_cumulative_column_law(
        values in prop::collection::vec((-1.0e4f64..1.0e4, -1.0e4f64..1.0e4, -50.0f64..50.0), 1..64)
    ) {
        let readings: Vec<RawReading> = values
            .iter()
            .map(|&(radial, back, axial)| RawReading {
                stage: 7,
                radial_volume: radial,
                back_volume: back,
                axial_displacement: axial,
                ..Default::default()
            })
            .collect();

        let mut state = CumulativeState::default();
        for (i, reading) in readings.iter().enumerate() {
            let cumulative = state.advance(reading);
            let sum = |get: fn(&RawReading) -> f64| {
                (1..=i).map(|k| get(&readings[k]) - get(&readings[k - 1])).sum::<f64>()
            };
            let tolerance = 1e-6;
            prop_assert!((cumulative.radial_volume - sum(|r| r.radial_volume)).abs() < tolerance);
            prop_assert!((cumulative.back_volume - sum(|r| r.back_volume)).abs() < tolerance);
            prop_assert!(
                (cumulative.axial_displacement - sum(|r| r.axial_displacement)).abs() < tolerance
            );
        }
    }

    #[test]
    fn prop_friction_angle_is_finite(ratio in -1.0e6f64..1.0e6) {
        let angle = friction_angle(ratio);
        prop_assert!(angle.is_finite());
        prop_assert!((-90.0..=90.0).contains(&angle));
    }
}
