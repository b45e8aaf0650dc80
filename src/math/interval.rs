//! Closed real intervals `[lo, hi]`.
//!
//! An [`IntervalNumber`] stands for an unknown precise value known only to lie
//! somewhere in `[lo, hi]`. A degenerate interval (`lo == hi`) is a precise value.
//!
//! Arithmetic here is restricted to what the linear-form bounds need (sum,
//! negation, scaling by a known real) and is *correctly bounded*: for
//! `x ∈ a`, `y ∈ b` the results always contain `x + y`, `x - y` and `c·x`.
//! Since each operation is monotone in every operand, the bounds are also tight.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::BoundsError;

/// Closed interval of reals, `lo <= hi`, both endpoints finite.
///
/// Serialized as a two-element array `[lo, hi]`; deserialization re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct IntervalNumber {
    lo: f64,
    hi: f64,
}

impl IntervalNumber {
    /// The degenerate interval `[0, 0]`.
    pub const ZERO: IntervalNumber = IntervalNumber { lo: 0.0, hi: 0.0 };

    /// Build `[lo, hi]`.
    ///
    /// Fails with [`BoundsError::InvalidInterval`] when `lo > hi` or an endpoint
    /// is not finite. `lo == hi` is accepted as a degenerate interval.
    pub fn new(lo: f64, hi: f64) -> Result<Self, BoundsError> {
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            return Err(BoundsError::InvalidInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Degenerate interval `[x, x]` for a precise value.
    pub fn degenerate(x: f64) -> Result<Self, BoundsError> {
        Self::new(x, x)
    }

    /// Interval centred on `mid` with half-width `radius >= 0`.
    pub fn from_mid_radius(mid: f64, radius: f64) -> Result<Self, BoundsError> {
        if !(radius >= 0.0) {
            return Err(BoundsError::domain(format!(
                "interval radius must be non-negative, got {radius}"
            )));
        }
        Self::new(mid - radius, mid + radius)
    }

    /// Endpoints already known to be ordered (results of bounded arithmetic).
    pub(crate) fn ordered(lo: f64, hi: f64) -> Self {
        debug_assert!(!(lo > hi), "unordered interval [{lo}, {hi}]");
        Self { lo, hi }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// `hi - lo`.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// `(lo + hi) / 2`, halved first so it stays finite for any finite endpoints.
    pub fn mid(&self) -> f64 {
        0.5 * self.lo + 0.5 * self.hi
    }

    /// Half the width. Finite even when `width()` overflows.
    pub fn radius(&self) -> f64 {
        0.5 * self.hi - 0.5 * self.lo
    }

    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &IntervalNumber) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// `lo <= 0 <= hi`.
    pub fn straddles_zero(&self) -> bool {
        self.lo <= 0.0 && 0.0 <= self.hi
    }

    /// `lo < 0 < hi`: zero is an interior point.
    pub fn straddles_zero_strictly(&self) -> bool {
        self.lo < 0.0 && 0.0 < self.hi
    }

    /// Smallest `|x|` over the interval (0 when it straddles zero).
    pub fn mignitude(&self) -> f64 {
        if self.straddles_zero() {
            0.0
        } else {
            self.lo.abs().min(self.hi.abs())
        }
    }

    /// Largest `|x|` over the interval.
    pub fn magnitude(&self) -> f64 {
        self.lo.abs().max(self.hi.abs())
    }

    /// `[a.lo + b.lo, a.hi + b.hi]`.
    pub fn add(self, other: IntervalNumber) -> IntervalNumber {
        Self::ordered(self.lo + other.lo, self.hi + other.hi)
    }

    /// `[-hi, -lo]`.
    pub fn negate(self) -> IntervalNumber {
        Self::ordered(-self.hi, -self.lo)
    }

    /// `[a.lo - b.hi, a.hi - b.lo]`.
    pub fn subtract(self, other: IntervalNumber) -> IntervalNumber {
        self.add(other.negate())
    }

    /// Multiply by a known real `c`.
    ///
    /// For `c < 0` the endpoints swap, which keeps the result ordered and makes
    /// every term of a linear form attain its extremes at an endpoint of its own
    /// variable.
    pub fn scale(self, c: f64) -> IntervalNumber {
        if c >= 0.0 {
            Self::ordered(c * self.lo, c * self.hi)
        } else {
            Self::ordered(c * self.hi, c * self.lo)
        }
    }

    /// Smallest interval containing both operands.
    pub fn hull(self, other: IntervalNumber) -> IntervalNumber {
        Self::ordered(self.lo.min(other.lo), self.hi.max(other.hi))
    }
}

impl Default for IntervalNumber {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for IntervalNumber {
    type Output = IntervalNumber;

    fn add(self, rhs: IntervalNumber) -> IntervalNumber {
        IntervalNumber::add(self, rhs)
    }
}

impl Sub for IntervalNumber {
    type Output = IntervalNumber;

    fn sub(self, rhs: IntervalNumber) -> IntervalNumber {
        self.subtract(rhs)
    }
}

impl Neg for IntervalNumber {
    type Output = IntervalNumber;

    fn neg(self) -> IntervalNumber {
        self.negate()
    }
}

impl TryFrom<(f64, f64)> for IntervalNumber {
    type Error = BoundsError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self, Self::Error> {
        IntervalNumber::new(lo, hi)
    }
}

impl From<IntervalNumber> for (f64, f64) {
    fn from(value: IntervalNumber) -> Self {
        (value.lo, value.hi)
    }
}

impl std::fmt::Display for IntervalNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "[{:.*}, {:.*}]", p, self.lo, p, self.hi),
            None => write!(f, "[{}, {}]", self.lo, self.hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: f64, hi: f64) -> IntervalNumber {
        IntervalNumber::new(lo, hi).unwrap()
    }

    #[test]
    fn construction_rejects_reversed_and_non_finite() {
        assert!(matches!(
            IntervalNumber::new(2.0, 1.0),
            Err(BoundsError::InvalidInterval { .. })
        ));
        assert!(IntervalNumber::new(f64::NAN, 1.0).is_err());
        assert!(IntervalNumber::new(0.0, f64::INFINITY).is_err());

        let point = IntervalNumber::new(1.5, 1.5).unwrap();
        assert!(point.is_degenerate());
        assert_eq!(point.width(), 0.0);
    }

    #[test]
    fn scale_swaps_endpoints_for_negative_factor() {
        let a = iv(1.0, 3.0);
        assert_eq!(a.scale(2.0), iv(2.0, 6.0));
        assert_eq!(a.scale(-2.0), iv(-6.0, -2.0));
        assert_eq!(a.scale(0.0), iv(0.0, 0.0));
    }

    #[test]
    fn arithmetic_contains_every_pointwise_result() {
        let a = iv(-1.5, 2.0);
        let b = iv(0.25, 4.0);
        let steps = 8;
        for i in 0..=steps {
            let x = a.lo() + a.width() * i as f64 / steps as f64;
            for j in 0..=steps {
                let y = b.lo() + b.width() * j as f64 / steps as f64;
                assert!((a + b).contains(x + y));
                assert!((a - b).contains(x - y));
            }
            for &c in &[-3.0, -0.5, 0.0, 0.7, 5.0] {
                assert!(a.scale(c).contains(c * x), "c={c}, x={x}");
            }
            assert!((-a).contains(-x));
        }
    }

    #[test]
    fn accessors_and_zero_predicates() {
        let a = iv(-1.0, 3.0);
        assert_eq!(a.mid(), 1.0);
        assert_eq!(a.radius(), 2.0);
        assert!(a.straddles_zero());
        assert!(a.straddles_zero_strictly());
        assert!(iv(0.0, 1.0).straddles_zero() && !iv(0.0, 1.0).straddles_zero_strictly());
        assert_eq!(a.mignitude(), 0.0);
        assert_eq!(a.magnitude(), 3.0);

        let b = iv(-5.0, -2.0);
        assert!(!b.straddles_zero());
        assert_eq!(b.mignitude(), 2.0);
        assert_eq!(b.magnitude(), 5.0);

        assert_eq!(a.hull(b), iv(-5.0, 3.0));

        let wide = iv(-1e308, 1e308);
        assert!(wide.width().is_infinite());
        assert_eq!(wide.mid(), 0.0);
        assert_eq!(wide.radius(), 1e308);
        assert!(a.hull(b).encloses(&a));
    }

    #[test]
    fn serde_uses_pair_form_and_revalidates() {
        let json = serde_json::to_string(&iv(1.0, 2.5)).unwrap();
        assert_eq!(json, "[1.0,2.5]");

        let back: IntervalNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, iv(1.0, 2.5));

        assert!(serde_json::from_str::<IntervalNumber>("[3.0,1.0]").is_err());
    }

    #[test]
    fn display_honours_precision() {
        assert_eq!(format!("{:.2}", iv(1.0, 2.5)), "[1.00, 2.50]");
    }
}
