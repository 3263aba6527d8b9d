//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the depth-indexed `WellTable`
//! - filter, range and coefficient types (`FilterSpec`, `ValueRange`, `CoefficientRecord`)
//! - run configuration (`GsaParams`, `GsaConfig`, `ThreePassConfig`)

pub mod config;
pub mod table;
pub mod types;

pub use config::*;
pub use table::*;
pub use types::*;
