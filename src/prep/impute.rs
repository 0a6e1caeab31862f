//! Missing-value imputation.
//!
//! Numeric columns (every present cell is a number) and categorical columns
//! are filled with separate strategies. "Most frequent" breaks ties towards
//! the smallest value.

use std::collections::BTreeMap;

use crate::domain::{Datum, Frame};
use crate::error::ModelError;
use crate::stats::{mean, median};

/// How to fill missing cells in numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericStrategy {
    Mean,
    Median,
    MostFrequent,
    Constant(f64),
}

/// How to fill missing cells in categorical columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CategoricalStrategy {
    #[default]
    MostFrequent,
    Constant(String),
}

/// Fill every missing cell, returning a new frame.
///
/// Columns with no present values are left untouched unless a constant
/// strategy applies.
pub fn fill_missing(
    frame: &Frame,
    numeric: &NumericStrategy,
    categorical: &CategoricalStrategy,
) -> Result<Frame, ModelError> {
    let mut out = frame.clone();
    for idx in 0..out.n_columns() {
        let fill = if out.is_numeric(idx) {
            numeric_fill(out.column_at(idx), numeric)?
        } else {
            categorical_fill(out.column_at(idx), categorical)
        };
        if let Some(value) = fill {
            for cell in out.column_at_mut(idx).iter_mut().filter(|c| c.is_missing()) {
                *cell = value.clone();
            }
        }
    }
    Ok(out)
}

fn numeric_fill(col: &[Datum], strategy: &NumericStrategy) -> Result<Option<Datum>, ModelError> {
    let present: Vec<f64> = col.iter().filter_map(Datum::as_f64).collect();
    let value = match strategy {
        NumericStrategy::Constant(v) if !v.is_finite() => {
            return Err(ModelError::invalid_input(format!("fill value {v} is not finite")));
        }
        NumericStrategy::Constant(v) => *v,
        _ if present.is_empty() => return Ok(None),
        NumericStrategy::Mean => mean(&present)?,
        NumericStrategy::Median => median(&present)?,
        NumericStrategy::MostFrequent => most_frequent_f64(present),
    };
    Ok(Some(Datum::Float(value)))
}

fn most_frequent_f64(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mut best = (values[0], 0usize);
    let mut run = (values[0], 0usize);
    for &v in &values {
        if v == run.0 {
            run.1 += 1;
        } else {
            run = (v, 1);
        }
        // Strict comparison keeps the smallest value on ties.
        if run.1 > best.1 {
            best = run;
        }
    }
    best.0
}

fn categorical_fill(col: &[Datum], strategy: &CategoricalStrategy) -> Option<Datum> {
    match strategy {
        CategoricalStrategy::Constant(s) => Some(Datum::Text(s.clone())),
        CategoricalStrategy::MostFrequent => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for cell in col.iter().filter(|c| !c.is_missing()) {
                *counts.entry(cell.to_string()).or_default() += 1;
            }
            let mut best: Option<(String, usize)> = None;
            for (value, count) in counts {
                if best.as_ref().is_none_or(|(_, c)| count > *c) {
                    best = Some((value, count));
                }
            }
            best.map(|(value, _)| Datum::Text(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(
            vec!["age".into(), "city".into()],
            vec![
                vec![Datum::Int(10), Datum::Missing, Datum::Int(20), Datum::Int(20), Datum::Int(60)],
                vec![
                    "paris".into(),
                    "oslo".into(),
                    Datum::Missing,
                    "oslo".into(),
                    "paris".into(),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn mean_and_most_frequent_defaults() {
        let out = fill_missing(&frame(), &NumericStrategy::Mean, &CategoricalStrategy::MostFrequent).unwrap();
        assert_eq!(out.column("age").unwrap()[1], Datum::Float(27.5));
        // oslo and paris tie at 2; the smaller string wins
        assert_eq!(out.column("city").unwrap()[2], Datum::Text("oslo".into()));
    }

    #[test]
    fn median_and_most_frequent_numeric() {
        let f = frame();
        let out = fill_missing(&f, &NumericStrategy::Median, &CategoricalStrategy::default()).unwrap();
        assert_eq!(out.column("age").unwrap()[1], Datum::Float(20.0));

        let out = fill_missing(&f, &NumericStrategy::MostFrequent, &CategoricalStrategy::default()).unwrap();
        assert_eq!(out.column("age").unwrap()[1], Datum::Float(20.0));
    }

    #[test]
    fn constants_fill_as_given() {
        let out = fill_missing(
            &frame(),
            &NumericStrategy::Constant(-1.0),
            &CategoricalStrategy::Constant("missing".into()),
        )
        .unwrap();
        assert_eq!(out.column("age").unwrap()[1], Datum::Float(-1.0));
        assert_eq!(out.column("city").unwrap()[2], Datum::Text("missing".into()));
    }

    #[test]
    fn most_frequent_numeric_prefers_smallest_on_tie() {
        assert_eq!(most_frequent_f64(vec![3.0, 1.0, 3.0, 1.0, 2.0]), 1.0);
    }

    #[test]
    fn all_missing_numeric_column_is_left_alone() {
        let f = Frame::new(vec!["x".into()], vec![vec![Datum::Missing, Datum::Missing]]).unwrap();
        let out = fill_missing(&f, &NumericStrategy::Mean, &CategoricalStrategy::default()).unwrap();
        assert_eq!(out, f);
    }
}
