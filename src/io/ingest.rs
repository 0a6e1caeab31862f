//! CSV ingest.
//!
//! Turns a CSV with a header row into a `Frame` of tagged cells. Parsing is
//! type-agnostic: every field becomes `Int`, `Float`, `Text` or `Missing`, and
//! deciding what is numeric is left to the data-preparation step or to
//! `Frame::into_design`.
//!
//! Design goals:
//! - **Row-level validation**: rows with the wrong field count are skipped and
//!   reported, not fatal
//! - **Deterministic behavior**: no type inference beyond per-cell parsing

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Datum, Frame};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the frame plus what was skipped.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub frame: Frame,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load a CSV file into a `Frame`.
pub fn load_frame(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_frame(file)
}

/// Read CSV from any reader into a `Frame`.
pub fn read_frame<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let names = header_names(&headers)?;

    let mut columns: Vec<Vec<Datum>> = vec![Vec::new(); names.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.len() != names.len() {
            row_errors.push(RowError {
                line,
                message: format!("expected {} fields, found {}", names.len(), record.len()),
            });
            continue;
        }

        for (col, field) in columns.iter_mut().zip(record.iter()) {
            col.push(Datum::parse(field));
        }
    }

    let frame = Frame::new(names, columns).map_err(AppError::from)?;
    if frame.n_rows() == 0 {
        return Err(AppError::new(3, "No valid rows in CSV."));
    }

    Ok(IngestedData {
        frame,
        row_errors,
        rows_read,
    })
}

fn header_names(headers: &StringRecord) -> Result<Vec<String>, AppError> {
    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if names.is_empty() {
        return Err(AppError::new(2, "CSV has no header row."));
    }
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(AppError::new(2, format!("CSV header {} is empty.", i + 1)));
        }
        if names[..i].contains(name) {
            return Err(AppError::new(2, format!("Duplicate CSV header '{name}'.")));
        }
    }
    Ok(names)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header; without stripping it the first column can't be found by name.
    name.trim().trim_start_matches('\u{feff}').to_string()
}
