//! Feature selection.
//!
//! Responsibilities:
//!
//! - build the design (intercept + live feature columns)
//! - compute per-column significance through a `LeastSquares` solver
//! - prune the least significant feature until every survivor passes

pub mod selection;

pub use selection::*;
