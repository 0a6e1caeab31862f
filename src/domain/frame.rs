//! Column-oriented table of raw cells.
//!
//! `Frame` is what CSV ingest produces and what the data-preparation steps
//! transform. Modeling code never sees it: `into_design` is the boundary where
//! every remaining cell must be numeric.

use crate::domain::{Datum, FeatureMatrix, to_numeric};
use crate::error::ModelError;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Vec<Datum>>,
    n_rows: usize,
}

impl Frame {
    pub fn new(names: Vec<String>, columns: Vec<Vec<Datum>>) -> Result<Self, ModelError> {
        if names.len() != columns.len() {
            return Err(ModelError::LengthMismatch {
                left: names.len(),
                right: columns.len(),
            });
        }
        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some(col) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(ModelError::LengthMismatch {
                left: n_rows,
                right: col.len(),
            });
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

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    pub fn position(&self, name: &str) -> Result<usize, ModelError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ModelError::UnknownColumn {
                name: name.to_string(),
            })
    }

    pub fn column(&self, name: &str) -> Result<&[Datum], ModelError> {
        Ok(&self.columns[self.position(name)?])
    }

    pub(crate) fn column_at(&self, idx: usize) -> &[Datum] {
        &self.columns[idx]
    }

    pub(crate) fn column_at_mut(&mut self, idx: usize) -> &mut Vec<Datum> {
        &mut self.columns[idx]
    }

    /// A column is numeric when every non-missing cell holds a number.
    pub fn is_numeric(&self, idx: usize) -> bool {
        self.columns[idx]
            .iter()
            .all(|d| d.is_missing() || d.as_f64().is_some())
    }

    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.n_columns()).filter(|&i| self.is_numeric(i)).collect()
    }

    pub fn categorical_columns(&self) -> Vec<usize> {
        (0..self.n_columns()).filter(|&i| !self.is_numeric(i)).collect()
    }

    /// Keep only the rows whose flag is `true`.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for col in &mut self.columns {
            let mut flags = keep.iter();
            col.retain(|_| flags.next().copied().unwrap_or(false));
        }
        self.n_rows = keep.iter().take(self.n_rows).filter(|k| **k).count();
    }

    pub(crate) fn remove_column(&mut self, idx: usize) -> (String, Vec<Datum>) {
        (self.names.remove(idx), self.columns.remove(idx))
    }

    pub(crate) fn insert_column(&mut self, idx: usize, name: String, values: Vec<Datum>) {
        debug_assert_eq!(values.len(), self.n_rows);
        self.names.insert(idx, name);
        self.columns.insert(idx, values);
    }

    pub(crate) fn push_column(&mut self, name: String, values: Vec<Datum>) {
        let idx = self.names.len();
        self.insert_column(idx, name, values);
    }

    /// Numeric view of one column.
    ///
    /// A bad cell is reported as `InvalidCell` naming this column.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, ModelError> {
        to_numeric(self.column(name)?).map_err(|e| with_column(e, name))
    }

    /// Split into a feature matrix (every column except `target`) and the target vector.
    pub fn into_design(self, target: &str) -> Result<(FeatureMatrix, Vec<f64>), ModelError> {
        let target_idx = self.position(target)?;
        let mut names = Vec::with_capacity(self.n_columns().saturating_sub(1));
        let mut columns = Vec::with_capacity(names.capacity());
        let mut y = Vec::new();
        for (idx, (name, col)) in self.names.into_iter().zip(self.columns).enumerate() {
            let values = to_numeric(&col).map_err(|e| with_column(e, &name))?;
            if idx == target_idx {
                y = values;
            } else {
                names.push(name);
                columns.push(values);
            }
        }
        Ok((FeatureMatrix::new(names, columns)?, y))
    }
}

fn with_column(err: ModelError, column: &str) -> ModelError {
    match err {
        ModelError::InvalidElement { index } => ModelError::InvalidCell {
            column: column.to_string(),
            row: index,
        },
        other => other,
    }
}
