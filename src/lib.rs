//! `well-gsa` library crate.
//!
//! Gas-effect baselines for well logs: a cubic regression of a target curve
//! (RT, NPHI or RHOB) on gamma ray, fitted over depth windows and evaluated
//! back at every selected row.
//!
//! Layering, bottom to top:
//!
//! - `domain`, `error`: table model, parameters, error taxonomy
//! - `math`, `models`: least squares, interpolation, the cubic baseline model
//! - `fit`: row selection, window plans, per-window regression, coefficient lookup
//! - `baseline`: reconstruction and companion columns
//! - `gsa`: RGSA / NGSA / DGSA orchestrators, combined scoring, batch runs
//! - `report`, `data`: summaries and synthetic wells

pub mod baseline;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod gsa;
pub mod math;
pub mod models;
pub mod report;
