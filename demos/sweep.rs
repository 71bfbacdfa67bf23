//! Writes the two parameter sweeps to `perimeter_sweep.csv` and
//! `shape_sweep.csv` in the directory given as the first argument
//! (the current directory by default).
//!
//! Run with `cargo run --example sweep --features serde -- <dir>`.

use orbital_ellipse::{
    axis_ratio_sweep, shape_sweep, QuadratureConfig, ShapeSample, SolverConfig, SweepRange,
};
use serde::Serialize;
use std::{error::Error, path::PathBuf};

/// One row of the shape sweep, flattened for CSV, angles in degrees.
#[derive(Serialize)]
struct ShapeRow {
    ue: f64,
    axis_ratio: f64,
    alpha_deg: f64,
    beta_deg: f64,
    beta_calc_deg: f64,
    beta_calc1_deg: f64,
    beta_error_deg: f64,
    iterations: u32,
}

impl From<&ShapeSample> for ShapeRow {
    fn from(s: &ShapeSample) -> Self {
        Self {
            ue: s.ue,
            axis_ratio: s.axis_ratio(),
            alpha_deg: s.solution.alpha.to_degrees(),
            beta_deg: s.solution.beta.to_degrees(),
            beta_calc_deg: s.projection.beta_calc.to_degrees(),
            beta_calc1_deg: s.projection.beta_calc1.to_degrees(),
            beta_error_deg: s.beta_error.to_degrees(),
            iterations: s.solution.iterations,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let path = dir.join("perimeter_sweep.csv");
    eprintln!("Comparing Ramanujan's perimeter against the integral into {path:?}...");
    let mut writer = csv::Writer::from_path(&path)?;
    for comparison in
        axis_ratio_sweep(SweepRange::AXIS_RATIOS, 1.0, QuadratureConfig::default())?
    {
        match comparison {
            Ok(c) => writer.serialize(c)?,
            Err(e) => eprintln!("skipped: {e}"),
        }
    }
    writer.flush()?;

    let path = dir.join("shape_sweep.csv");
    eprintln!("Solving for the mean-velocity angle into {path:?}...");
    let mut writer = csv::Writer::from_path(&path)?;
    for sample in shape_sweep(SweepRange::SHAPE_PARAMETERS, 1.0, SolverConfig::default())? {
        match sample {
            Ok(s) => writer.serialize(ShapeRow::from(&s))?,
            Err(e) => eprintln!("skipped: {e}"),
        }
    }
    writer.flush()?;

    Ok(())
}
