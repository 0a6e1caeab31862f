//! Data preparation: imputation, outlier trimming, categorical encoding.
//!
//! This is the collaborator that turns a raw CSV frame into something the
//! modeling code accepts. The modeling modules never call it; the CLI runs it
//! when asked (`select --prep`) before building the design.

pub mod encode;
pub mod impute;
pub mod outliers;

pub use encode::*;
pub use impute::*;
pub use outliers::*;

use crate::domain::Frame;
use crate::error::ModelError;

/// Settings for the full preparation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepConfig {
    pub numeric: NumericStrategy,
    pub categorical: CategoricalStrategy,
    /// Columns checked for outliers; `None` means every numeric column.
    pub outlier_columns: Option<Vec<String>>,
    pub outlier_multiplier: f64,
    pub encode: EncodeMethod,
    /// Columns to encode; `None` means every categorical column.
    pub encode_columns: Option<Vec<String>>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            numeric: NumericStrategy::Mean,
            categorical: CategoricalStrategy::MostFrequent,
            outlier_columns: None,
            outlier_multiplier: DEFAULT_IQR_MULTIPLIER,
            encode: EncodeMethod::OneHot,
            encode_columns: None,
        }
    }
}

/// Fill missing values, then trim outliers, then encode categoricals.
pub fn preprocess(frame: &Frame, config: &PrepConfig) -> Result<Frame, ModelError> {
    let filled = fill_missing(frame, &config.numeric, &config.categorical)?;
    let trimmed = remove_outliers_iqr(
        &filled,
        config.outlier_columns.as_deref(),
        config.outlier_multiplier,
    )?;
    encode_categorical(&trimmed, config.encode_columns.as_deref(), config.encode)
}
