//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment defaults
//! - loads CSV input
//! - runs the statistics / fit / selection code
//! - prints reports (text or JSON) and writes the optional debug bundle

use std::io;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::cli::{Cli, Command, DescribeArgs, FitArgs, SampleArgs, SelectArgs};
use crate::domain::{DEFAULT_THRESHOLD, OutputFormat, SelectConfig};
use crate::error::AppError;
use crate::io::{IngestedData, load_frame};
use crate::prep::{CategoricalStrategy, PrepConfig};
use crate::report::{self, format_row_errors};

pub mod pipeline;

const THRESHOLD_VAR: &str = "OLSKIT_THRESHOLD";
const DEBUG_DIR_VAR: &str = "OLSKIT_DEBUG_DIR";

/// Entry point for the `olskit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Describe(args) => handle_describe(args),
        Command::Fit(args) => handle_fit(args),
        Command::Select(args) => handle_select(args, &settings),
        Command::Sample(args) => handle_sample(args),
    }
}

/// Defaults read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub threshold: f64,
    pub debug_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let threshold = match lookup(THRESHOLD_VAR) {
            Some(raw) => parse_threshold(&raw)
                .ok_or_else(|| AppError::new(2, format!("Invalid {THRESHOLD_VAR} value '{raw}'")))?,
            None => DEFAULT_THRESHOLD,
        };
        let debug_dir = lookup(DEBUG_DIR_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("debug"));

        Ok(Self {
            threshold,
            debug_dir,
        })
    }
}

fn parse_threshold(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

fn format_of(json: bool) -> OutputFormat {
    if json { OutputFormat::Json } else { OutputFormat::Text }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

fn warn_row_errors(ingest: &IngestedData) {
    if !ingest.row_errors.is_empty() {
        eprint!("{}", format_row_errors(&ingest.row_errors));
    }
}

fn handle_describe(args: DescribeArgs) -> Result<(), AppError> {
    let ingest = load_frame(&args.csv)?;
    warn_row_errors(&ingest);

    let report = report::describe_frame(&ingest.frame, &args.columns)?;
    match format_of(args.json) {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", report::format_describe(&report));
            Ok(())
        }
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let ingest = load_frame(&args.csv)?;
    warn_row_errors(&ingest);

    let report = report::fit_report(&ingest.frame, &args.x, &args.y)?;
    match format_of(args.json) {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print!("{}", report::format_fit(&report));
            Ok(())
        }
    }
}

fn handle_select(args: SelectArgs, settings: &Settings) -> Result<(), AppError> {
    let config = select_config_from_args(&args, settings)?;
    let prep = prep_config_from_args(&args);

    let run = pipeline::run_select(&config, &prep)?;
    if !run.row_errors.is_empty() {
        eprint!("{}", format_row_errors(&run.row_errors));
    }

    if config.verbose {
        for step in &run.report.elimination.steps {
            eprintln!("{}", report::format_step(step));
        }
    }

    if let Some(dir) = &config.debug_dir {
        let path = crate::debug::write_debug_bundle(dir, &run.report)?;
        eprintln!("Debug bundle written to {}", path.display());
    }

    match config.format {
        OutputFormat::Json => print_json(&run.report),
        OutputFormat::Text => {
            print!("{}", report::format_select(&run.report));
            Ok(())
        }
    }
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = crate::data::SampleSpec {
        rows: args.rows,
        noise_features: args.noise,
        slope: args.slope,
        intercept: args.intercept,
        noise_sd: args.noise_sd,
        seed: args.seed,
    };
    let data = crate::data::generate_dataset(&spec)?;

    match format_of(args.json) {
        OutputFormat::Json => print_json(&data),
        OutputFormat::Text => crate::data::write_csv(&data, io::stdout().lock()),
    }
}

/// Layer `select` flags over environment defaults.
pub fn select_config_from_args(args: &SelectArgs, settings: &Settings) -> Result<SelectConfig, AppError> {
    let threshold = args.threshold.unwrap_or(settings.threshold);
    if !threshold.is_finite() {
        return Err(AppError::new(2, format!("Invalid threshold {threshold}")));
    }

    Ok(SelectConfig {
        csv_path: args.csv.clone(),
        target: args.target.clone(),
        threshold,
        prep: args.prep,
        verbose: args.verbose,
        debug_dir: args.debug.then(|| settings.debug_dir.clone()),
        format: format_of(args.json),
    })
}

pub fn prep_config_from_args(args: &SelectArgs) -> PrepConfig {
    PrepConfig {
        numeric: args.impute.into(),
        categorical: CategoricalStrategy::MostFrequent,
        outlier_multiplier: args.iqr_multiplier,
        encode: args.encode,
        ..PrepConfig::default()
    }
}
