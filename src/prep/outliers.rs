//! Interquartile-range outlier trimming.
//!
//! For each selected numeric column, in order, rows outside
//! `[Q1 - k·IQR, Q3 + k·IQR]` are dropped. Quartiles are recomputed on the
//! rows that survived the previous columns, so the column order matters.
//! A missing cell never falls inside the bounds and its row is dropped too.

use crate::domain::{Datum, Frame};
use crate::error::ModelError;
use crate::stats::quantile;

/// Default IQR multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

pub fn remove_outliers_iqr(
    frame: &Frame,
    columns: Option<&[String]>,
    multiplier: f64,
) -> Result<Frame, ModelError> {
    if !(multiplier.is_finite() && multiplier >= 0.0) {
        return Err(ModelError::invalid_input(format!(
            "IQR multiplier {multiplier} must be finite and non-negative"
        )));
    }

    let selected: Vec<usize> = match columns {
        Some(names) => names
            .iter()
            .map(|n| frame.position(n))
            .collect::<Result<_, _>>()?,
        None => frame.numeric_columns(),
    };

    let mut out = frame.clone();
    for idx in selected {
        // Non-numeric columns are skipped, not rejected.
        if !out.is_numeric(idx) {
            continue;
        }
        let col = out.column_at(idx);
        let present: Vec<f64> = col.iter().filter_map(Datum::as_f64).collect();
        if present.is_empty() {
            continue;
        }

        let q1 = quantile(&present, 0.25)?;
        let q3 = quantile(&present, 0.75)?;
        let iqr = q3 - q1;
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;

        let keep: Vec<bool> = col
            .iter()
            .map(|d| d.as_f64().is_some_and(|v| v >= lower && v <= upper))
            .collect();
        out.retain_rows(&keep);
    }
    Ok(out)
}
