//! Shared domain types.
//!
//! Raw input arrives as tagged `Datum` cells; everything past the boundary works
//! on plain `f64` slices or on a validated `FeatureMatrix`.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ModelError;

/// Name given to the implicit intercept column.
pub const INTERCEPT: &str = "const";

/// Default significance threshold for backward elimination.
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// A single raw cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Datum {
    /// Parse a raw CSV field.
    ///
    /// Empty fields and the usual NA spellings become `Missing`; anything that
    /// is not an integer or float literal stays `Text`.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || matches!(s, "NA" | "N/A" | "NaN" | "nan" | "null" | "None") {
            return Datum::Missing;
        }
        if let Ok(v) = s.parse::<i64>() {
            return Datum::Int(v);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Datum::Float(v),
            _ => Datum::Text(s.to_string()),
        }
    }

    /// Numeric value, if this cell holds a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Int(v) => Some(*v as f64),
            Datum::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Missing)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Int(v) => write!(f, "{v}"),
            Datum::Float(v) => write!(f, "{v}"),
            Datum::Text(s) => write!(f, "{s}"),
            Datum::Missing => Ok(()),
        }
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Float(v)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int(v)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.to_string())
    }
}

/// Convert raw cells to a numeric sample, rejecting the first non-numeric cell.
pub fn to_numeric(cells: &[Datum]) -> Result<Vec<f64>, ModelError> {
    cells
        .iter()
        .enumerate()
        .map(|(index, d)| d.as_f64().ok_or(ModelError::InvalidElement { index }))
        .collect()
}

/// Check that every element is finite.
pub fn ensure_finite(x: &[f64]) -> Result<(), ModelError> {
    match x.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ModelError::InvalidElement { index }),
        None => Ok(()),
    }
}

/// Named numeric columns of equal length.
///
/// The intercept is never stored here; backward elimination adds it itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>, columns: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        if names.len() != columns.len() {
            return Err(ModelError::LengthMismatch {
                left: names.len(),
                right: columns.len(),
            });
        }
        let n_rows = columns.first().map_or(0, Vec::len);
        for col in &columns {
            if col.len() != n_rows {
                return Err(ModelError::LengthMismatch {
                    left: n_rows,
                    right: col.len(),
                });
            }
            ensure_finite(col)?;
        }
        for (i, name) in names.iter().enumerate() {
            if name == INTERCEPT || names[..i].contains(name) {
                return Err(ModelError::invalid_input(format!(
                    "duplicate or reserved column name '{name}'"
                )));
            }
        }
        Ok(Self {
            names,
            columns,
            n_rows,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }
}

/// Which command-line output style to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run configuration for `olskit select`.
///
/// This is derived from CLI flags layered over environment defaults.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    pub csv_path: PathBuf,
    pub target: String,
    pub threshold: f64,
    pub prep: bool,
    pub verbose: bool,
    pub debug_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_parse_classifies_cells() {
        assert_eq!(Datum::parse("3"), Datum::Int(3));
        assert_eq!(Datum::parse(" -2.5 "), Datum::Float(-2.5));
        assert_eq!(Datum::parse(""), Datum::Missing);
        assert_eq!(Datum::parse("NA"), Datum::Missing);
        assert_eq!(Datum::parse("red"), Datum::Text("red".to_string()));
        assert_eq!(Datum::parse("inf"), Datum::Text("inf".to_string()));
    }

    #[test]
    fn to_numeric_rejects_text_with_index() {
        let cells = vec![Datum::Int(1), Datum::Float(2.0), Datum::from("c")];
        assert_eq!(to_numeric(&cells), Err(ModelError::InvalidElement { index: 2 }));
        assert_eq!(to_numeric(&cells[..2]).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn feature_matrix_checks_shape_and_names() {
        let ok = FeatureMatrix::new(
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .unwrap();
        assert_eq!(ok.n_rows(), 2);
        assert_eq!(ok.column("b"), Some(&[3.0, 4.0][..]));

        assert!(matches!(
            FeatureMatrix::new(vec!["a".into(), "b".into()], vec![vec![1.0], vec![3.0, 4.0]]),
            Err(ModelError::LengthMismatch { .. })
        ));
        assert!(matches!(
            FeatureMatrix::new(vec![INTERCEPT.into()], vec![vec![1.0]]),
            Err(ModelError::InvalidInput { .. })
        ));
        assert!(matches!(
            FeatureMatrix::new(vec!["a".into()], vec![vec![f64::NAN]]),
            Err(ModelError::InvalidElement { index: 0 })
        ));
    }
}
