//! Reporting utilities: report structs for each command plus text formatting.
//!
//! The structs are `Serialize` so `--json` can print them as-is.

pub mod format;

pub use format::*;

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::Frame;
use crate::error::ModelError;
use crate::fit::Elimination;
use crate::models::{LinearModel, fit};
use crate::stats::{FitQuality, Summary, describe, evaluate, residuals};

/// Summary of one column for `describe`.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub summary: Summary,
}

/// Summaries of numeric columns plus the names of the skipped ones.
#[derive(Debug, Clone, Serialize)]
pub struct DescribeReport {
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub skipped: Vec<String>,
}

/// Summarise the requested columns (or every column) in parallel.
///
/// Columns with non-numeric or missing cells are listed in `skipped`
/// rather than failing the whole report.
pub fn describe_frame(frame: &Frame, only: &[String]) -> Result<DescribeReport, ModelError> {
    let names: Vec<String> = if only.is_empty() {
        frame.names().to_vec()
    } else {
        for n in only {
            frame.position(n)?;
        }
        only.to_vec()
    };

    let results: Vec<(String, Result<Summary, ModelError>)> = names
        .into_par_iter()
        .map(|name| {
            let summary = frame.numeric(&name).and_then(|x| describe(&x));
            (name, summary)
        })
        .collect();

    let mut columns = Vec::new();
    let mut skipped = Vec::new();
    for (name, summary) in results {
        match summary {
            Ok(summary) => columns.push(ColumnSummary { name, summary }),
            Err(_) => skipped.push(name),
        }
    }

    Ok(DescribeReport {
        rows: frame.n_rows(),
        columns,
        skipped,
    })
}

/// Univariate fit with in-sample metrics.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub x: String,
    pub y: String,
    pub model: LinearModel,
    pub quality: FitQuality,
    pub residual_summary: Summary,
}

pub fn fit_report(frame: &Frame, x_name: &str, y_name: &str) -> Result<FitReport, ModelError> {
    let x = frame.numeric(x_name)?;
    let y = frame.numeric(y_name)?;

    let model = fit(&x, &y)?;
    let predicted = model.predict(&x)?;
    let quality = evaluate(&y, &predicted)?;
    let residual_summary = describe(&residuals(&y, &predicted)?)?;

    Ok(FitReport {
        x: x_name.to_string(),
        y: y_name.to_string(),
        model,
        quality,
        residual_summary,
    })
}

/// Backward-elimination output for `select`.
#[derive(Debug, Clone, Serialize)]
pub struct SelectReport {
    pub target: String,
    pub rows: usize,
    pub initial_features: Vec<String>,
    pub elimination: Elimination,
}
