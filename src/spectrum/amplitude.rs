//! Amplitude bounds over a real/imaginary box.
//!
//! Given `R_k × I_k`, the DFT amplitude `|z| = sqrt(R² + I²)` ranges over
//! `[min |z|, max |z|]` on the rectangle. Two policies share this input:
//!
//! - **Selective**: modulus at the four corners only. The maximum is exact (a
//!   convex function peaks at a vertex). The corner minimum is only a valid lower
//!   bound when the minimizer is itself a corner, i.e. when neither axis has zero
//!   as an interior point; otherwise the corners cannot certify anything below
//!   them and the lower bound falls back to `0`. The result always encloses the
//!   exact bound and coincides with it exactly when the minimizer is a corner.
//! - **Exact**: the same maximum, plus the true minimum from a case split on
//!   whether each axis straddles zero:
//!
//! | `R` straddles 0 | `I` straddles 0 | closest point to the origin         |
//! |-----------------|-----------------|-------------------------------------|
//! | yes             | yes             | the origin itself (`min = 0`)       |
//! | yes             | no              | foot on the edge `I = mig(I)`       |
//! | no              | yes             | foot on the edge `R = mig(R)`       |
//! | no              | no              | the corner `(mig(R), mig(I))`       |
//!
//! where `mig` is the smallest magnitude on the interval. The four cases are
//! exhaustive and mutually exclusive, so neither policy can fail.

use crate::domain::Algorithm;
use crate::math::{IntervalNumber, modulus};
use crate::spectrum::FrequencyBox;

/// Exact and selective bounds for one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeBounds {
    pub exact: IntervalNumber,
    pub selective: IntervalNumber,
}

impl AmplitudeBounds {
    pub fn get(&self, algorithm: Algorithm) -> IntervalNumber {
        match algorithm {
            Algorithm::Exact => self.exact,
            Algorithm::Selective => self.selective,
        }
    }
}

impl FrequencyBox {
    /// Modulus at the four corners.
    pub fn corner_moduli(&self) -> [f64; 4] {
        let (r, i) = (self.re, self.im);
        [
            modulus(r.lo(), i.lo()),
            modulus(r.lo(), i.hi()),
            modulus(r.hi(), i.lo()),
            modulus(r.hi(), i.hi()),
        ]
    }

    /// Amplitude bound under `algorithm`.
    pub fn amplitude_bound(&self, algorithm: Algorithm) -> IntervalNumber {
        match algorithm {
            Algorithm::Exact => exact_bound(self),
            Algorithm::Selective => selective_bound(self),
        }
    }

    /// Both policies at once, sharing the corner evaluation.
    pub fn amplitude_bounds(&self) -> AmplitudeBounds {
        let (corner_min, corner_max) = corner_range(self);
        AmplitudeBounds {
            exact: IntervalNumber::ordered(closest_to_origin(self), corner_max),
            selective: IntervalNumber::ordered(certified_corner_min(self, corner_min), corner_max),
        }
    }
}

/// Corner-only bound.
pub fn selective_bound(b: &FrequencyBox) -> IntervalNumber {
    let (lo, hi) = corner_range(b);
    IntervalNumber::ordered(certified_corner_min(b, lo), hi)
}

/// True range of the modulus over the box.
pub fn exact_bound(b: &FrequencyBox) -> IntervalNumber {
    IntervalNumber::ordered(closest_to_origin(b), farthest_from_origin(b))
}

fn corner_range(b: &FrequencyBox) -> (f64, f64) {
    b.corner_moduli()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &m| (lo.min(m), hi.max(m)))
}

/// The corner minimum when a corner is the minimizer, else the trivial bound 0.
fn certified_corner_min(b: &FrequencyBox, corner_min: f64) -> f64 {
    if b.re.straddles_zero_strictly() || b.im.straddles_zero_strictly() {
        0.0
    } else {
        corner_min
    }
}

/// The corner `(mag(R), mag(I))` up to signs.
fn farthest_from_origin(b: &FrequencyBox) -> f64 {
    modulus(b.re.magnitude(), b.im.magnitude())
}

/// Distance from the origin to the nearest point of the box.
fn closest_to_origin(b: &FrequencyBox) -> f64 {
    match (b.re.straddles_zero(), b.im.straddles_zero()) {
        (true, true) => 0.0,
        (true, false) => b.im.mignitude(),
        (false, true) => b.re.mignitude(),
        (false, false) => modulus(b.re.mignitude(), b.im.mignitude()),
    }
}
