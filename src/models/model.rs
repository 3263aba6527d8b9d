//! Cubic baseline model.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given driver reading (for OLS)
//! - predict the baseline given coefficients and a driver reading
//!
//! The regression response is the target curve itself or its `log10`,
//! depending on the baseline kind; `Transform` carries that choice in both
//! directions so the fit and the reconstruction can never disagree.

use serde::{Deserialize, Serialize};

use crate::domain::{CubicCoefficients, GsaKind};
use crate::math::{fill_powers, scaled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    Identity,
    /// Regress on `log10(target)`, reconstruct with `10^y`.
    Log10,
}

impl Transform {
    pub fn for_kind(kind: GsaKind) -> Self {
        match kind {
            GsaKind::Resistivity => Transform::Log10,
            GsaKind::Neutron | GsaKind::Density => Transform::Identity,
        }
    }

    /// Target value to regression response. `None` when undefined (log of <= 0).
    pub fn forward(self, target: f64) -> Option<f64> {
        let y = match self {
            Transform::Identity => target,
            Transform::Log10 => {
                if target <= 0.0 {
                    return None;
                }
                target.log10()
            }
        };
        y.is_finite().then_some(y)
    }

    /// Regression response back to target units.
    pub fn inverse(self, y: f64) -> f64 {
        match self {
            Transform::Identity => y,
            Transform::Log10 => 10f64.powf(y),
        }
    }
}

/// Fill the design row `[1, x, x^2, x^3]` for a raw driver reading.
pub fn fill_design_row(driver: f64, out: &mut [f64]) {
    fill_powers(scaled(driver), out);
}

/// Evaluate the cubic in regression space.
pub fn evaluate(c: &CubicCoefficients, driver: f64) -> f64 {
    let x = scaled(driver);
    c.b0 + c.b1 * x + c.b2 * x * x + c.b3 * x * x * x
}

/// Baseline value in target units.
pub fn predict(c: &CubicCoefficients, driver: f64, transform: Transform) -> f64 {
    transform.inverse(evaluate(c, driver))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log10_round_trips_positive_values() {
        let t = Transform::Log10;
        let y = t.forward(25.0).unwrap();
        assert!((t.inverse(y) - 25.0).abs() < 1e-12);
        assert_eq!(t.forward(0.0), None);
        assert_eq!(t.forward(-3.0), None);
    }

    #[test]
    fn predict_matches_hand_evaluation() {
        let c = CubicCoefficients {
            b0: 1.0,
            b1: 0.1,
            b2: 0.0,
            b3: 0.0,
        };
        // x = 0.5 -> log10(RT) = 1.05
        let rt = predict(&c, 50.0, Transform::Log10);
        assert!((rt - 10f64.powf(1.05)).abs() < 1e-10);
        assert!((predict(&c, 50.0, Transform::Identity) - 1.05).abs() < 1e-12);
    }
}
