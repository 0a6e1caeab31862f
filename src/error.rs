//! Error types.
//!
//! - `ModelError` is raised by the statistics/modeling core and always
//!   propagates unmodified to the caller.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use std::fmt;

/// Failures raised by the statistics, model, metric and selection code.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A sequence that must be non-empty had zero length.
    EmptyInput,
    /// The element at `index` is not a finite number.
    InvalidElement { index: usize },
    /// Two sequences that must be paired have different lengths.
    LengthMismatch { left: usize, right: usize },
    /// Every predictor value is identical, so the slope is undefined.
    DegenerateInput,
    /// The reference sequence has zero variance, so the ratio is undefined.
    ZeroVariance,
    /// The design matrix is rank-deficient (duplicate or collinear columns).
    SingularMatrix { columns: Vec<String> },
    /// A scalar parameter is out of its domain.
    InvalidInput { reason: String },
    /// Not enough rows to leave any residual degrees of freedom.
    InsufficientData { rows: usize, columns: usize },
    /// A named column does not exist.
    UnknownColumn { name: String },
    /// A table cell that must be numeric is text, missing or non-finite.
    InvalidCell { column: String, row: usize },
}

impl ModelError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "input sequence is empty"),
            Self::InvalidElement { index } => {
                write!(f, "element at index {index} is not a finite number")
            }
            Self::LengthMismatch { left, right } => {
                write!(f, "inputs must be the same length ({left} != {right})")
            }
            Self::DegenerateInput => {
                write!(f, "all predictor values are identical; slope is undefined")
            }
            Self::ZeroVariance => write!(f, "actual values have zero variance"),
            Self::SingularMatrix { columns } => write!(
                f,
                "design matrix is singular over columns [{}]",
                columns.join(", ")
            ),
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::InsufficientData { rows, columns } => write!(
                f,
                "insufficient data: {rows} rows for {columns} columns leaves no residual degrees of freedom"
            ),
            Self::UnknownColumn { name } => write!(f, "unknown column '{name}'"),
            Self::InvalidCell { column, row } => {
                write!(f, "column '{column}': row {row} is not a finite number")
            }
        }
    }
}

impl std::error::Error for ModelError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        // 2 = bad input, 3 = not enough data, 4 = numerical failure
        let exit_code = match &err {
            ModelError::InvalidElement { .. }
            | ModelError::LengthMismatch { .. }
            | ModelError::InvalidInput { .. }
            | ModelError::UnknownColumn { .. }
            | ModelError::InvalidCell { .. } => 2,
            ModelError::EmptyInput | ModelError::InsufficientData { .. } => 3,
            ModelError::DegenerateInput
            | ModelError::ZeroVariance
            | ModelError::SingularMatrix { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
