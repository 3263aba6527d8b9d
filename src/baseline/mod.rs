//! Baseline reconstruction.
//!
//! Turns coefficient records back into a curve: evaluate the cubic at each
//! row's driver reading with coefficients looked up at the row's depth, undo
//! the regression transform, then attach the gas-effect flag and companion
//! columns.

pub mod merge;
pub mod reconstruct;

pub use merge::*;
pub use reconstruct::*;
