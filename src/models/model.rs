//! Univariate ordinary least squares.
//!
//! `fit` centres both sequences on their means and solves
//!
//! ```text
//! slope     = Σ(dx·dy) / Σ(dx²)
//! intercept = mean(y) - slope·mean(x)
//! ```
//!
//! A constant predictor makes `Σ(dx²) = 0`; that is reported as
//! `DegenerateInput` instead of dividing.

use serde::Serialize;

use crate::domain::ensure_finite;
use crate::error::ModelError;
use crate::stats::mean;

/// Fitted line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearModel {
    pub fn predict(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        predict(x, self.slope, self.intercept)
    }
}

/// Fit a line through paired `(x, y)` observations.
pub fn fit(x: &[f64], y: &[f64]) -> Result<LinearModel, ModelError> {
    if x.len() != y.len() {
        return Err(ModelError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    // Compare against the first value rather than testing Σ(dx²) == 0: the
    // rounded mean of a constant sequence can differ from its elements.
    if x.iter().all(|&v| v == x[0]) {
        return Err(ModelError::DegenerateInput);
    }

    let (sxy, sxx) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxy + dx * (yi - y_mean), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    if !(slope.is_finite() && intercept.is_finite()) {
        return Err(ModelError::DegenerateInput);
    }

    Ok(LinearModel { slope, intercept })
}

/// Apply `y_i = slope·x_i + intercept` to every input.
pub fn predict(x: &[f64], slope: f64, intercept: f64) -> Result<Vec<f64>, ModelError> {
    if !slope.is_finite() {
        return Err(ModelError::invalid_input(format!("slope {slope} is not finite")));
    }
    if !intercept.is_finite() {
        return Err(ModelError::invalid_input(format!(
            "intercept {intercept} is not finite"
        )));
    }
    ensure_finite(x)?;
    Ok(x.iter().map(|&xi| slope * xi + intercept).collect())
}
