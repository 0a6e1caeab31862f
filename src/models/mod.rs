//! Simple linear model (single predictor).
//!
//! Implemented as small, pure functions so reporting code can stay generic.

pub mod model;

pub use model::*;
