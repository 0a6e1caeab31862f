//! Command-line parsing for `olskit`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! statistics/selection code. Flags are turned into config structs in
//! `crate::app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::prep::{EncodeMethod, NumericStrategy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "olskit", version, about = "Descriptive stats, OLS fits and backward elimination")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise numeric columns of a CSV file.
    Describe(DescribeArgs),
    /// Fit a univariate line `y = slope * x + intercept`.
    Fit(FitArgs),
    /// Run p-value driven backward elimination against a target column.
    Select(SelectArgs),
    /// Write a synthetic dataset (one signal feature plus noise) to stdout.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct DescribeArgs {
    /// Input CSV with a header row.
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,

    /// Only summarise these columns (repeatable).
    #[arg(long = "column", value_name = "NAME")]
    pub columns: Vec<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,

    /// Predictor column.
    #[arg(long)]
    pub x: String,

    /// Response column.
    #[arg(long)]
    pub y: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,

    /// Target (response) column; every other column is a candidate feature.
    #[arg(long)]
    pub target: String,

    /// Prune while the worst p-value is above this (default: $OLSKIT_THRESHOLD or 0.05).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Impute, trim outliers and encode categoricals before fitting.
    #[arg(long)]
    pub prep: bool,

    /// Fill strategy for numeric columns when `--prep` is set.
    #[arg(long, value_enum, default_value_t = ImputeArg::Mean)]
    pub impute: ImputeArg,

    /// Categorical encoding when `--prep` is set.
    #[arg(long, value_enum, default_value_t = EncodeMethod::OneHot)]
    pub encode: EncodeMethod,

    /// IQR multiplier for outlier trimming when `--prep` is set.
    #[arg(long, default_value_t = crate::prep::DEFAULT_IQR_MULTIPLIER)]
    pub iqr_multiplier: f64,

    /// Print each elimination step to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a Markdown debug bundle (directory: $OLSKIT_DEBUG_DIR or `debug`).
    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    #[arg(short = 'n', long, default_value_t = 100)]
    pub rows: usize,

    /// Number of pure-noise feature columns.
    #[arg(long, default_value_t = 3)]
    pub noise: usize,

    #[arg(long, default_value_t = 2.0)]
    pub slope: f64,

    #[arg(long, default_value_t = 1.0)]
    pub intercept: f64,

    /// Standard deviation of the target noise.
    #[arg(long, default_value_t = 1.0)]
    pub noise_sd: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Print the generated data as JSON instead of CSV.
    #[arg(long)]
    pub json: bool,
}

/// Numeric fill strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImputeArg {
    Mean,
    Median,
    MostFrequent,
}

impl From<ImputeArg> for NumericStrategy {
    fn from(arg: ImputeArg) -> Self {
        match arg {
            ImputeArg::Mean => NumericStrategy::Mean,
            ImputeArg::Median => NumericStrategy::Median,
            ImputeArg::MostFrequent => NumericStrategy::MostFrequent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_flags_parse() {
        let cli = Cli::try_parse_from([
            "olskit", "select", "--csv", "data.csv", "--target", "price", "--threshold", "0.01",
            "--prep", "--impute", "median", "--encode", "label", "-v",
        ])
        .unwrap();
        let Command::Select(args) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.target, "price");
        assert_eq!(args.threshold, Some(0.01));
        assert!(args.prep && args.verbose && !args.debug);
        assert_eq!(NumericStrategy::from(args.impute), NumericStrategy::Median);
        assert_eq!(args.encode, EncodeMethod::Label);
        assert_eq!(args.iqr_multiplier, 1.5);
    }

    #[test]
    fn describe_accepts_repeated_columns() {
        let cli = Cli::try_parse_from([
            "olskit", "describe", "--csv", "d.csv", "--column", "a", "--column", "b", "--json",
        ])
        .unwrap();
        let Command::Describe(args) = cli.command else {
            panic!("expected describe");
        };
        assert_eq!(args.columns, vec!["a", "b"]);
        assert!(args.json);
    }

    #[test]
    fn fit_requires_both_columns() {
        assert!(Cli::try_parse_from(["olskit", "fit", "--csv", "d.csv", "--x", "a"]).is_err());
    }
}
