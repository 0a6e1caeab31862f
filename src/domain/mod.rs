//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the tagged raw cell (`Datum`) and its numeric conversion
//! - the raw column table (`Frame`) produced by ingest
//! - the validated `FeatureMatrix` consumed by backward elimination
//! - run configuration for the CLI

pub mod frame;
pub mod types;

pub use frame::*;
pub use types::*;
