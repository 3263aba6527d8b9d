//! Baseline fitting.
//!
//! Responsibilities:
//!
//! - select rows by interval/zone (`filter`)
//! - plan sliding or tumbling windows over the operating set (`windows`)
//! - fit one cubic per window (`fitter`)
//! - look coefficients up at arbitrary depths (`interpolate`)

pub mod filter;
pub mod fitter;
pub mod interpolate;
pub mod windows;

pub use filter::*;
pub use fitter::*;
pub use interpolate::*;
pub use windows::*;
