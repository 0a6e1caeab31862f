//! Shared `select` pipeline.
//!
//! CSV ingest -> optional preparation -> design split -> backward elimination
//!
//! Presentation (text, JSON, verbose trace, debug bundle) stays in `app`.

use crate::domain::SelectConfig;
use crate::error::AppError;
use crate::fit::{SelectionOptions, backward_elimination};
use crate::io::{RowError, load_frame};
use crate::prep::{PrepConfig, preprocess};
use crate::report::SelectReport;

/// Everything computed by one `olskit select` run.
#[derive(Debug, Clone)]
pub struct SelectRun {
    pub report: SelectReport,
    pub row_errors: Vec<RowError>,
}

pub fn run_select(config: &SelectConfig, prep: &PrepConfig) -> Result<SelectRun, AppError> {
    let ingest = load_frame(&config.csv_path)?;

    let frame = if config.prep {
        preprocess(&ingest.frame, prep)?
    } else {
        ingest.frame
    };
    let rows = frame.n_rows();

    let (features, target) = frame.into_design(&config.target)?;
    let initial_features = features.names().to_vec();

    let elimination = backward_elimination(
        &features,
        &target,
        SelectionOptions {
            threshold: config.threshold,
        },
    )?;

    Ok(SelectRun {
        report: SelectReport {
            target: config.target.clone(),
            rows,
            initial_features,
            elimination,
        },
        row_errors: ingest.row_errors,
    })
}
