//! Regression-quality metrics over `(actual, predicted)` pairs.
//!
//! `coefficient_of_determination` is deliberately the variance ratio
//! `variance(predicted) / variance(actual)`, not `1 - SS_res / SS_tot`.
//! It is not bounded to `[0, 1]` and a value of 1 does not imply an exact fit
//! (any prediction with the same spread as the data scores 1).

use serde::Serialize;

use crate::domain::ensure_finite;
use crate::error::ModelError;
use crate::stats::descriptive::variance;

fn check_pair(actual: &[f64], predicted: &[f64]) -> Result<(), ModelError> {
    if actual.len() != predicted.len() {
        return Err(ModelError::LengthMismatch {
            left: actual.len(),
            right: predicted.len(),
        });
    }
    Ok(())
}

/// `Σ(actual_i - predicted_i)² / N`.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64, ModelError> {
    check_pair(actual, predicted)?;
    if actual.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    ensure_finite(actual)?;
    ensure_finite(predicted)?;

    let sse: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();
    Ok(sse / actual.len() as f64)
}

pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64, ModelError> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Variance-ratio proxy for R²; see the module docs.
pub fn coefficient_of_determination(actual: &[f64], predicted: &[f64]) -> Result<f64, ModelError> {
    check_pair(actual, predicted)?;
    let total = variance(actual)?;
    let explained = variance(predicted)?;
    if total == 0.0 {
        return Err(ModelError::ZeroVariance);
    }
    Ok(explained / total)
}

/// Residuals `actual_i - predicted_i`.
pub fn residuals(actual: &[f64], predicted: &[f64]) -> Result<Vec<f64>, ModelError> {
    check_pair(actual, predicted)?;
    ensure_finite(actual)?;
    ensure_finite(predicted)?;
    Ok(actual.iter().zip(predicted).map(|(a, p)| a - p).collect())
}

/// Metrics bundle used by reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitQuality {
    pub n: usize,
    pub mse: f64,
    pub rmse: f64,
    pub r_squared: f64,
}

pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<FitQuality, ModelError> {
    let mse = mean_squared_error(actual, predicted)?;
    Ok(FitQuality {
        n: actual.len(),
        mse,
        rmse: root_mean_squared_error(actual, predicted)?,
        r_squared: coefficient_of_determination(actual, predicted)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_matches_reference_value() {
        let mse = mean_squared_error(&[3.0, -0.5, 2.0, 7.0], &[2.5, 0.0, 2.0, 8.0]).unwrap();
        assert!((mse - 0.1875).abs() < 1e-12);
    }

    #[test]
    fn mse_of_identical_sequences_is_zero() {
        let y = [1.5, -2.0, 8.25, 0.0];
        assert_eq!(mean_squared_error(&y, &y).unwrap(), 0.0);
    }

    #[test]
    fn mse_rejects_bad_shapes() {
        assert_eq!(
            mean_squared_error(&[1.0, 2.0], &[1.0]),
            Err(ModelError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(mean_squared_error(&[], &[]), Err(ModelError::EmptyInput));
    }

    #[test]
    fn r_squared_is_variance_ratio() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [1.5, 2.0, 2.5, 3.0];
        let r2 = coefficient_of_determination(&actual, &predicted).unwrap();
        // var(predicted) = 0.3125, var(actual) = 1.25
        assert!((r2 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn r_squared_can_exceed_one() {
        let r2 = coefficient_of_determination(&[1.0, 2.0, 3.0], &[0.0, 2.0, 4.0]).unwrap();
        assert!((r2 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn r_squared_rejects_constant_actuals_and_mismatch() {
        assert_eq!(
            coefficient_of_determination(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(ModelError::ZeroVariance)
        );
        assert_eq!(
            coefficient_of_determination(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(ModelError::LengthMismatch { left: 2, right: 3 })
        );
        assert_eq!(coefficient_of_determination(&[], &[]), Err(ModelError::EmptyInput));
    }

    #[test]
    fn r_squared_rejects_inexact_constant_actuals() {
        let predicted: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(
            coefficient_of_determination(&[0.1; 10], &predicted),
            Err(ModelError::ZeroVariance)
        );
    }

    #[test]
    fn rmse_is_root_of_mse() {
        let actual = [3.0, -0.5, 2.0, 7.0];
        let predicted = [2.5, 0.0, 2.0, 8.0];
        assert_eq!(
            root_mean_squared_error(&actual, &predicted).unwrap(),
            mean_squared_error(&actual, &predicted).unwrap().sqrt()
        );
        assert_eq!(root_mean_squared_error(&[], &[]), Err(ModelError::EmptyInput));
    }

    #[test]
    fn residuals_are_actual_minus_predicted() {
        assert_eq!(residuals(&[3.0, 5.0], &[2.0, 6.0]).unwrap(), vec![1.0, -1.0]);
    }

    #[test]
    fn evaluate_bundles_metrics() {
        let q = evaluate(&[3.0, -0.5, 2.0, 7.0], &[2.5, 0.0, 2.0, 8.0]).unwrap();
        assert_eq!(q.n, 4);
        assert!((q.rmse - 0.1875_f64.sqrt()).abs() < 1e-12);
    }
}
