//! Synthetic regression datasets.
//!
//! Each dataset has one informative column (`signal`) and a number of
//! pure-noise columns (`noise_1`, `noise_2`, ...):
//!
//! ```text
//! target = intercept + slope·signal + ε,   ε ~ N(0, noise_sd²)
//! ```
//!
//! All columns are drawn from a standard normal with a seeded `StdRng`, so a
//! given spec always produces the same rows.

use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::domain::FeatureMatrix;
use crate::error::{AppError, ModelError};

/// Name of the target column written by `write_csv`.
pub const TARGET: &str = "target";

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSpec {
    pub rows: usize,
    pub noise_features: usize,
    pub slope: f64,
    pub intercept: f64,
    pub noise_sd: f64,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            rows: 100,
            noise_features: 3,
            slope: 2.0,
            intercept: 1.0,
            noise_sd: 1.0,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleData {
    pub features: FeatureMatrix,
    pub target: Vec<f64>,
}

pub fn generate_dataset(spec: &SampleSpec) -> Result<SampleData, ModelError> {
    if spec.rows == 0 {
        return Err(ModelError::invalid_input("row count must be > 0"));
    }
    if !(spec.slope.is_finite() && spec.intercept.is_finite()) {
        return Err(ModelError::invalid_input("slope and intercept must be finite"));
    }
    let noise = Normal::new(0.0, spec.noise_sd)
        .map_err(|e| ModelError::invalid_input(format!("noise distribution error: {e}")))?;
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| ModelError::invalid_input(format!("feature distribution error: {e}")))?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut draw = |n: usize| -> Vec<f64> { (0..n).map(|_| standard.sample(&mut rng)).collect() };

    let mut names = vec!["signal".to_string()];
    let mut columns = vec![draw(spec.rows)];
    for k in 1..=spec.noise_features {
        names.push(format!("noise_{k}"));
        columns.push(draw(spec.rows));
    }

    let target = columns[0]
        .iter()
        .map(|&x| spec.intercept + spec.slope * x + noise.sample(&mut rng))
        .collect();

    Ok(SampleData {
        features: FeatureMatrix::new(names, columns)?,
        target,
    })
}

/// Write the dataset as CSV: feature columns first, then `target`.
pub fn write_csv<W: Write>(data: &SampleData, out: W) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = data.features.names().iter().map(String::as_str).collect();
    header.push(TARGET);
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    for (i, y) in data.target.iter().enumerate() {
        let mut row: Vec<String> = data
            .features
            .columns()
            .iter()
            .map(|col| format!("{:.6}", col[i]))
            .collect();
        row.push(format!("{y:.6}"));
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV: {e}")))?;
    Ok(())
}
