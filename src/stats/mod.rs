//! Descriptive statistics and regression-quality metrics.

pub mod descriptive;
pub mod metrics;

pub use descriptive::*;
pub use metrics::*;
