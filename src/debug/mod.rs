//! Debug bundle writer for inspecting a backward-elimination run.
//!
//! The bundle is a Markdown file with the run settings, every pruning step
//! and the significance table of the final fit.

use std::fs::{File, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AppError;
use crate::fit::Significance;
use crate::report::SelectReport;

pub fn write_debug_bundle(dir: &Path, report: &SelectReport) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("olskit_debug_{}_{ts}.md", report.target));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    write_bundle(&mut file, report)
        .map_err(|e| AppError::new(4, format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

fn write_bundle<W: Write>(out: &mut W, report: &SelectReport) -> io::Result<()> {
    let e = &report.elimination;

    writeln!(out, "# olskit debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- target: {}", report.target)?;
    writeln!(out, "- rows: {}", report.rows)?;
    writeln!(out, "- threshold: {}", e.threshold)?;
    writeln!(out, "- initial_features: {}", report.initial_features.join(", "))?;
    writeln!(out, "- fits: {}", e.fits)?;

    writeln!(out, "\n## Elimination steps")?;
    writeln!(out, "| fit | removed | p_value |")?;
    writeln!(out, "| - | - | - |")?;
    for step in &e.steps {
        writeln!(out, "| {} | {} | {:.6e} |", step.fit, step.removed, step.p_value)?;
    }

    writeln!(out, "\n## Retained")?;
    for name in &e.design.names {
        writeln!(out, "- {name}")?;
    }

    writeln!(out, "\n## Final fit")?;
    write_significance(out, &e.significance)
}

fn write_significance<W: Write>(out: &mut W, sig: &Significance) -> io::Result<()> {
    writeln!(out, "| column | coef | std_err | p_value |")?;
    writeln!(out, "| - | - | - | - |")?;
    for c in &sig.columns {
        writeln!(
            out,
            "| {} | {:.6} | {:.6} | {:.6e} |",
            c.name, c.coefficient, c.std_error, c.p_value
        )?;
    }
    writeln!(out, "\nresidual df: {}", sig.df_resid)
}
