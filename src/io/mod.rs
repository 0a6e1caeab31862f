//! Input helpers.
//!
//! - CSV ingest into a raw `Frame` (`ingest`)

pub mod ingest;

pub use ingest::*;
