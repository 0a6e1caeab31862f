//! Numerical utilities: least squares with significance and special functions.

pub mod ols;
pub mod special;

pub use ols::*;
pub use special::*;
