//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/selection code stays clean and testable
//! - output changes are localized

use crate::fit::{EliminationStep, Significance};
use crate::io::RowError;
use crate::report::{DescribeReport, FitReport, SelectReport};

pub fn format_describe(report: &DescribeReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== olskit describe ({} rows) ===\n", report.rows));
    out.push_str(&format!(
        "{:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "column", "n", "mean", "median", "variance", "std", "min", "max"
    ));
    for col in &report.columns {
        let s = &col.summary;
        out.push_str(&format!(
            "{:<20} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            col.name, s.count, s.mean, s.median, s.variance, s.std_dev, s.min, s.max
        ));
    }
    if !report.skipped.is_empty() {
        out.push_str(&format!(
            "\nSkipped (non-numeric or missing cells): {}\n",
            report.skipped.join(", ")
        ));
    }
    out
}

pub fn format_fit(report: &FitReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== olskit fit: {} ~ {} ===\n", report.y, report.x));
    out.push_str(&format!("slope:     {:.6}\n", report.model.slope));
    out.push_str(&format!("intercept: {:.6}\n", report.model.intercept));
    out.push_str(&format!("\nIn-sample quality (n={}):\n", report.quality.n));
    out.push_str(&format!("- MSE:  {:.6}\n", report.quality.mse));
    out.push_str(&format!("- RMSE: {:.6}\n", report.quality.rmse));
    out.push_str(&format!(
        "- R² (var(pred)/var(actual)): {:.6}\n",
        report.quality.r_squared
    ));
    let r = &report.residual_summary;
    out.push_str(&format!(
        "\nResiduals: mean={:.6} median={:.6} std={:.6} min={:.6} max={:.6}\n",
        r.mean, r.median, r.std_dev, r.min, r.max
    ));
    out
}

pub fn format_select(report: &SelectReport) -> String {
    let e = &report.elimination;
    let mut out = String::new();
    out.push_str(&format!(
        "=== olskit select: target={} (n={}, threshold={}) ===\n",
        report.target, report.rows, e.threshold
    ));
    out.push_str(&format!(
        "Initial features ({}): {}\n",
        report.initial_features.len(),
        report.initial_features.join(", ")
    ));

    out.push_str(&format!("\nElimination ({} fits):\n", e.fits));
    if e.steps.is_empty() {
        out.push_str("  (nothing removed)\n");
    }
    for step in &e.steps {
        out.push_str(&format!("  {}\n", format_step(step)));
    }

    out.push_str(&format!("\nRetained: {}\n", e.design.names.join(", ")));
    out.push_str("\nFinal fit:\n");
    out.push_str(&format_significance(&e.significance));
    out
}

/// One-line description of a pruning step.
pub fn format_step(step: &EliminationStep) -> String {
    format!(
        "fit #{:<3} removed {:<20} p={:.6}",
        step.fit, step.removed, step.p_value
    )
}

pub fn format_significance(sig: &Significance) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {:<20} {:>14} {:>14} {:>12}\n",
        "column", "coef", "std err", "p-value"
    ));
    for c in &sig.columns {
        out.push_str(&format!(
            "  {:<20} {:>14.6} {:>14.6} {:>12.6}\n",
            c.name, c.coefficient, c.std_error, c.p_value
        ));
    }
    out.push_str(&format!("  residual df: {}\n", sig.df_resid));
    out
}

pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = format!("Skipped {} CSV row(s):\n", errors.len());
    for e in errors {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    out
}
