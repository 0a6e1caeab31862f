//! Descriptive statistics over a numeric sample.
//!
//! Every function validates the whole sample before computing anything:
//! an empty slice is `EmptyInput`, a non-finite element is `InvalidElement`.
//! Variance is the population variance (divide by N).

use serde::Serialize;

use crate::domain::ensure_finite;
use crate::error::ModelError;

fn check_sample(x: &[f64]) -> Result<(), ModelError> {
    if x.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    ensure_finite(x)
}

/// Arithmetic mean.
///
/// Falls back to summing pre-scaled terms when the plain sum overflows.
pub fn mean(x: &[f64]) -> Result<f64, ModelError> {
    check_sample(x)?;
    let n = x.len() as f64;
    let m = x.iter().sum::<f64>() / n;
    if m.is_finite() {
        return Ok(m);
    }
    Ok(x.iter().map(|v| v / n).sum())
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(x: &[f64]) -> Result<f64, ModelError> {
    check_sample(x)?;
    let sorted = sorted_copy(x);
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Population variance.
pub fn variance(x: &[f64]) -> Result<f64, ModelError> {
    let m = mean(x)?;
    // A constant sample is exactly zero even when its mean rounds.
    if x.iter().all(|v| *v == x[0]) {
        return Ok(0.0);
    }
    let ss: f64 = x.iter().map(|v| (v - m) * (v - m)).sum();
    let var = ss / x.len() as f64;
    if !var.is_finite() {
        return Err(ModelError::invalid_input("variance overflows f64"));
    }
    Ok(var)
}

/// Population standard deviation, `sqrt(variance(x))`.
pub fn standard_deviation(x: &[f64]) -> Result<f64, ModelError> {
    Ok(variance(x)?.sqrt())
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` must lie in `[0, 1]`.
pub fn quantile(x: &[f64], q: f64) -> Result<f64, ModelError> {
    check_sample(x)?;
    if !(0.0..=1.0).contains(&q) {
        return Err(ModelError::invalid_input(format!("quantile {q} outside [0, 1]")));
    }
    let sorted = sorted_copy(x);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// One-shot summary of a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn describe(x: &[f64]) -> Result<Summary, ModelError> {
    let variance = variance(x)?;
    Ok(Summary {
        count: x.len(),
        mean: mean(x)?,
        median: median(x)?,
        variance,
        std_dev: variance.sqrt(),
        min: x.iter().copied().fold(f64::INFINITY, f64::min),
        max: x.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

fn sorted_copy(x: &[f64]) -> Vec<f64> {
    let mut sorted = x.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Datum, to_numeric};

    const ONE_TO_TEN: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    const SYMMETRIC: [f64; 7] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];

    #[test]
    fn mean_of_typical_and_negative_values() {
        assert_eq!(mean(&ONE_TO_TEN).unwrap(), 5.5);
        assert_eq!(mean(&SYMMETRIC).unwrap(), 0.0);
    }

    #[test]
    fn median_handles_even_and_odd_lengths() {
        assert_eq!(median(&ONE_TO_TEN).unwrap(), 5.5);
        assert_eq!(median(&SYMMETRIC).unwrap(), 0.0);
        assert_eq!(median(&[9.0, 1.0, 5.0]).unwrap(), 5.0);
    }

    #[test]
    fn variance_is_population_variance() {
        let expected: f64 = ONE_TO_TEN.iter().map(|v| (v - 5.5).powi(2)).sum::<f64>() / 10.0;
        assert!((variance(&ONE_TO_TEN).unwrap() - expected).abs() < 1e-12);
        assert!((variance(&SYMMETRIC).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn std_dev_is_sqrt_of_variance() {
        for x in [&ONE_TO_TEN[..], &SYMMETRIC[..], &[2.5][..], &[1e6, -3.0, 0.25][..]] {
            let v = variance(x).unwrap();
            assert_eq!(standard_deviation(x).unwrap(), v.sqrt());
        }
    }

    #[test]
    fn constant_sample_has_zero_spread() {
        let x = [4.0; 6];
        assert_eq!(variance(&x).unwrap(), 0.0);
        assert_eq!(standard_deviation(&x).unwrap(), 0.0);
    }

    #[test]
    fn inexact_constants_have_zero_spread() {
        for c in [0.1, 0.3, 0.7, 1.1, -2.2] {
            let x = [c; 10];
            assert_eq!(variance(&x).unwrap(), 0.0, "constant {c}");
            assert_eq!(standard_deviation(&x).unwrap(), 0.0, "constant {c}");
        }
    }

    #[test]
    fn huge_values_do_not_overflow_mean() {
        assert_eq!(mean(&[1e308, 1e308]).unwrap(), 1e308);
        assert!(mean(&[f64::MAX, f64::MAX, f64::MAX]).unwrap().is_finite());
        assert!(matches!(
            variance(&[f64::MAX, -f64::MAX]),
            Err(ModelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn empty_sample_is_rejected_everywhere() {
        assert_eq!(mean(&[]), Err(ModelError::EmptyInput));
        assert_eq!(median(&[]), Err(ModelError::EmptyInput));
        assert_eq!(variance(&[]), Err(ModelError::EmptyInput));
        assert_eq!(standard_deviation(&[]), Err(ModelError::EmptyInput));
    }

    #[test]
    fn non_numeric_elements_are_rejected() {
        let cells: Vec<Datum> = ["a", "b", "c", "d"].into_iter().map(Datum::from).collect();
        assert_eq!(to_numeric(&cells), Err(ModelError::InvalidElement { index: 0 }));

        let x = [1.0, f64::NAN, 3.0];
        assert_eq!(mean(&x), Err(ModelError::InvalidElement { index: 1 }));
        assert_eq!(median(&x), Err(ModelError::InvalidElement { index: 1 }));
        assert_eq!(
            standard_deviation(&[f64::INFINITY]),
            Err(ModelError::InvalidElement { index: 0 })
        );
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&x, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&x, 1.0).unwrap(), 4.0);
        assert!((quantile(&x, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!((quantile(&x, 0.75).unwrap() - 3.25).abs() < 1e-12);
        assert!(matches!(quantile(&x, 1.5), Err(ModelError::InvalidInput { .. })));
    }

    #[test]
    fn describe_collects_everything() {
        let s = describe(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.median, 2.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert!((s.variance - 2.0 / 3.0).abs() < 1e-12);
    }
}
