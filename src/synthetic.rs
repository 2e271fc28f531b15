//! Synthetic vendor logs for demos, tests and benchmarks.
//!
//! [`SyntheticLog`] renders a complete log in the vendor text format: a
//! metadata block followed by a setup stage, a saturation check, a
//! consolidation stage and an undrained shear ramp. The stage
//! numbers follow [`StageConfig::default`].

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::stage::StageConfig;

/// Setup stage written ahead of the saturation check
pub const SETUP_STAGE: i64 = 1;

const HEADER: &str = "\"Stage Number\",\"Time since start of test (s)\",\"Time since start of stage (s)\",\
\"Radial Pressure (kPa)\",\"Radial Volume (mm³)\",\"Back Pressure (kPa)\",\"Back Volume (mm³)\",\
\"Load Cell (kN)\",\"Pore Pressure (kPa)\",\"Axial Displacement (mm)\",\"Axial Force (kN)\"";

/// Shape of a generated log
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticLog {
    /// Stage numbers to emit
    pub stages: StageConfig,
    /// Rows in the setup stage
    pub setup_rows: usize,
    /// Rows in the saturation-check stage
    pub saturation_rows: usize,
    /// Rows in the consolidation stage
    pub consolidation_rows: usize,
    /// Rows in the shear stage
    pub shear_rows: usize,
    /// Seconds between readings
    pub interval: f64,
    /// Whether to write the specimen metadata block
    pub with_metadata: bool,
}

impl Default for SyntheticLog {
    fn default() -> Self {
        Self {
            stages: StageConfig::default(),
            setup_rows: 2,
            saturation_rows: 6,
            consolidation_rows: 12,
            shear_rows: 120,
            interval: 60.0,
            with_metadata: true,
        }
    }
}

/// One synthetic row, in header order
struct Row {
    stage: i64,
    time_stage: f64,
    radial_pressure: f64,
    radial_volume: f64,
    back_pressure: f64,
    back_volume: f64,
    load: f64,
    pore_pressure: f64,
    displacement: f64,
}

impl SyntheticLog {
    /// Log with the given number of shear rows and default everything else
    pub fn with_shear_rows(shear_rows: usize) -> Self {
        Self {
            shear_rows,
            ..Self::default()
        }
    }

    /// Total number of readings
    pub fn row_count(&self) -> usize {
        self.setup_rows + self.saturation_rows + self.consolidation_rows + self.shear_rows
    }

    /// Render the whole log as text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.with_metadata {
            out.push_str("\"Sample Name:\",\"Synthetic clay\"\n");
            out.push_str("\"Initial Height (mm):\",\"20\"\n");
            out.push_str("\"Initial Diameter (mm):\",\"38\"\n");
            out.push_str("\"Initial Mass (g):\",\"45\"\n");
            out.push_str("\"Initial Water Content (%):\",\"18\"\n");
            out.push_str("\"Final Water Content (%):\",\"17\"\n");
            out.push_str("\"Specific Gravity:\",\"2.7\"\n");
            out.push_str("\"Saturation Coefficient:\",\"1\"\n");
            out.push('\n');
        }

        out.push_str(HEADER);
        out.push('\n');

        let mut time_test = 0.0;
        for row in self.rows() {
            // writing into a String cannot fail
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{},{}",
                row.stage,
                time_test,
                row.time_stage,
                row.radial_pressure,
                row.radial_volume,
                row.back_pressure,
                row.back_volume,
                row.load,
                row.pore_pressure,
                row.displacement,
                row.load,
            );
            time_test += self.interval;
        }

        out
    }

    /// Render the log into a writer.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::with_capacity(self.row_count());
        let step = |i: usize| i as f64 * self.interval;

        for i in 0..self.setup_rows {
            rows.push(Row {
                stage: SETUP_STAGE,
                time_stage: step(i),
                radial_pressure: 20.0,
                radial_volume: 0.0,
                back_pressure: 10.0,
                back_volume: 0.0,
                load: 0.0,
                pore_pressure: 12.0,
                displacement: 0.0,
            });
        }

        // cell pressure ramp; pore pressure follows with B close to 0.96
        for i in 0..self.saturation_rows {
            let rise = 50.0 * i as f64;
            rows.push(Row {
                stage: self.stages.saturation,
                time_stage: step(i),
                radial_pressure: 300.0 + rise,
                radial_volume: 2.0 * i as f64,
                back_pressure: 290.0,
                back_volume: 0.0,
                load: 0.0,
                pore_pressure: 280.0 + 0.96 * rise,
                displacement: 0.0,
            });
        }

        // drainage: back volume and displacement level off
        for i in 0..self.consolidation_rows {
            let progress = 1.0 - (-(i as f64) / 4.0).exp();
            rows.push(Row {
                stage: self.stages.consolidation,
                time_stage: step(i),
                radial_pressure: 600.0,
                radial_volume: 10.0 + 400.0 * progress,
                back_pressure: 400.0,
                back_volume: 600.0 * progress,
                load: 0.0,
                pore_pressure: 400.0 + 150.0 * (1.0 - progress),
                displacement: 0.2 * progress,
            });
        }

        // undrained: back volume holds its end-of-consolidation value
        let drained = 1.0 - (-(self.consolidation_rows.saturating_sub(1) as f64) / 4.0).exp();
        let onset = 0.2 * drained + 0.01;
        for i in 0..self.shear_rows {
            let x = i as f64;
            rows.push(Row {
                stage: self.stages.shear_start,
                time_stage: step(i),
                radial_pressure: 600.0,
                radial_volume: 10.0 + 400.0 * drained,
                back_pressure: 400.0,
                back_volume: 600.0 * drained,
                load: 0.01 + 0.004 * x,
                pore_pressure: 400.0 + 40.0 * (1.0 - (-x / 20.0).exp()),
                displacement: onset + 0.02 * x,
            });
        }

        rows
    }
}
