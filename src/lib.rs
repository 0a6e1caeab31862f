//! `olskit` library crate.
//!
//! The binary (`olskit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the statistics and selection modules are usable on their own

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod prep;
pub mod report;
pub mod stats;
