//! Coefficient lookup at arbitrary depths.
//!
//! Two interpolators share the [`CoefficientSource`] seam:
//!
//! - [`CoefficientTable`]: the per-row contract. Clamp to the shallowest or
//!   deepest record outside the recorded range; otherwise blend the record
//!   with the greatest depth `<= q` and the record with the smallest depth
//!   `> q`. A query on a recorded depth returns that record bit-for-bit.
//! - [`LinearProfile`]: each coefficient is treated as its own knot series and
//!   passed through [`crate::math::interp`]. Used by the 3-pass RGSA, whose
//!   records are already strictly depth-ordered.

use crate::domain::{CoefficientRecord, CubicCoefficients};
use crate::math::interp;

pub trait CoefficientSource {
    /// Coefficients to use at `depth`; `None` if `depth` is NaN.
    fn coefficients_at(&self, depth: f64) -> Option<CubicCoefficients>;
}

/// Depth-sorted coefficient records.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    depths: Vec<f64>,
    coefficients: Vec<CubicCoefficients>,
}

impl CoefficientTable {
    /// Sort `records` by depth (stable, duplicates kept). Records with a NaN
    /// depth are dropped. Returns `None` if nothing usable remains.
    pub fn new(records: &[CoefficientRecord]) -> Option<Self> {
        let mut sorted: Vec<&CoefficientRecord> =
            records.iter().filter(|r| !r.depth.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.depth.partial_cmp(&b.depth).unwrap_or(std::cmp::Ordering::Equal));
        Some(Self {
            depths: sorted.iter().map(|r| r.depth).collect(),
            coefficients: sorted.iter().map(|r| r.coefficients).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn depth_range(&self) -> (f64, f64) {
        (self.depths[0], self.depths[self.depths.len() - 1])
    }
}

impl CoefficientSource for CoefficientTable {
    fn coefficients_at(&self, depth: f64) -> Option<CubicCoefficients> {
        if depth.is_nan() {
            return None;
        }
        let last = self.depths.len() - 1;
        if depth <= self.depths[0] {
            return Some(self.coefficients[0]);
        }
        if depth >= self.depths[last] {
            return Some(self.coefficients[last]);
        }

        // depths[0] < depth < depths[last], so both neighbours exist.
        let upper = self.depths.partition_point(|&d| d <= depth);
        let lower = upper - 1;
        let (d0, d1) = (self.depths[lower], self.depths[upper]);
        if d0 == d1 || d0 == depth {
            return Some(self.coefficients[lower]);
        }
        let w = (depth - d0) / (d1 - d0);
        Some(self.coefficients[lower].lerp(&self.coefficients[upper], w))
    }
}

/// Per-coefficient clamped linear interpolation over record depths.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProfile {
    depths: Vec<f64>,
    b0: Vec<f64>,
    b1: Vec<f64>,
    b2: Vec<f64>,
    b3: Vec<f64>,
}

impl LinearProfile {
    /// Build from records; they are sorted by depth first.
    pub fn new(records: &[CoefficientRecord]) -> Option<Self> {
        let table = CoefficientTable::new(records)?;
        let c = &table.coefficients;
        Some(Self {
            b0: c.iter().map(|c| c.b0).collect(),
            b1: c.iter().map(|c| c.b1).collect(),
            b2: c.iter().map(|c| c.b2).collect(),
            b3: c.iter().map(|c| c.b3).collect(),
            depths: table.depths,
        })
    }
}

impl CoefficientSource for LinearProfile {
    fn coefficients_at(&self, depth: f64) -> Option<CubicCoefficients> {
        Some(CubicCoefficients {
            b0: interp(depth, &self.depths, &self.b0)?,
            b1: interp(depth, &self.depths, &self.b1)?,
            b2: interp(depth, &self.depths, &self.b2)?,
            b3: interp(depth, &self.depths, &self.b3)?,
        })
    }
}
