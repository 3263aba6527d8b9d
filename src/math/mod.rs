//! Mathematical utilities: polynomial basis, least squares, interpolation, quantiles.

pub mod basis;
pub mod interp;
pub mod ols;
pub mod stats;

pub use basis::*;
pub use interp::*;
pub use ols::*;
pub use stats::*;
