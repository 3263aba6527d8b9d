//! Baseline model implementation.
//!
//! The model is a small set of pure functions so that fitting and
//! reconstruction code can stay generic over the baseline kind.

pub mod model;

pub use model::*;
