//! Interval-valued time signals.
//!
//! An [`IntervalSignal`] holds one [`IntervalNumber`] per time step. It is built
//! once (directly from bounds, or by intervalizing a precise sequence) and never
//! mutated afterwards; drawing realizations produces new precise sequences.

use crate::domain::Perturbation;
use crate::error::BoundsError;
use crate::math::IntervalNumber;

/// Ordered, non-empty sequence of intervals indexed by time step `n = 0..N-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSignal {
    samples: Vec<IntervalNumber>,
}

impl IntervalSignal {
    /// Wrap already-validated intervals.
    pub fn new(samples: Vec<IntervalNumber>) -> Result<Self, BoundsError> {
        if samples.is_empty() {
            return Err(BoundsError::length_mismatch("signal samples (minimum)", 1, 0));
        }
        Ok(Self { samples })
    }

    /// Build from parallel lower/upper bound slices.
    pub fn from_bounds(lower: &[f64], upper: &[f64]) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::length_mismatch(
                "upper bounds",
                lower.len(),
                upper.len(),
            ));
        }
        let samples = lower
            .iter()
            .zip(upper)
            .map(|(&lo, &hi)| IntervalNumber::new(lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(samples)
    }

    /// Degenerate intervals around a precise sequence.
    pub fn precise(values: &[f64]) -> Result<Self, BoundsError> {
        Self::intervalize(values, Perturbation::None)
    }

    /// Widen a precise sequence according to `perturbation`.
    ///
    /// Relative perturbations scale with `|x_n|` so the result stays ordered for
    /// samples of either sign. Negative (or non-finite) parameters are rejected.
    pub fn intervalize(values: &[f64], perturbation: Perturbation) -> Result<Self, BoundsError> {
        validate_perturbation(perturbation)?;

        let samples = values
            .iter()
            .map(|&x| match perturbation {
                Perturbation::None => IntervalNumber::degenerate(x),
                Perturbation::Relative { p } => IntervalNumber::new(x - p * x.abs(), x + p * x.abs()),
                Perturbation::Asymmetric { lower, upper } => {
                    IntervalNumber::new(x - lower * x.abs(), x + upper * x.abs())
                }
                Perturbation::Absolute { half_width } => IntervalNumber::from_mid_radius(x, half_width),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<&IntervalNumber> {
        self.samples.get(n)
    }

    pub fn as_slice(&self) -> &[IntervalNumber] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntervalNumber> {
        self.samples.iter()
    }

    pub fn lower(&self) -> Vec<f64> {
        self.samples.iter().map(IntervalNumber::lo).collect()
    }

    pub fn upper(&self) -> Vec<f64> {
        self.samples.iter().map(IntervalNumber::hi).collect()
    }

    /// Midpoint sequence; a realization in its own right.
    pub fn midpoints(&self) -> Vec<f64> {
        self.samples.iter().map(IntervalNumber::mid).collect()
    }

    /// `true` when every sample is degenerate.
    pub fn is_precise(&self) -> bool {
        self.samples.iter().all(IntervalNumber::is_degenerate)
    }

    /// `true` when `values` is a realization (same length, each value inside its interval).
    pub fn admits(&self, values: &[f64]) -> bool {
        values.len() == self.samples.len()
            && self.samples.iter().zip(values).all(|(iv, &x)| iv.contains(x))
    }
}

impl<'a> IntoIterator for &'a IntervalSignal {
    type Item = &'a IntervalNumber;
    type IntoIter = std::slice::Iter<'a, IntervalNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

fn validate_perturbation(perturbation: Perturbation) -> Result<(), BoundsError> {
    let check = |name: &str, v: f64| {
        if v.is_finite() && v >= 0.0 {
            Ok(())
        } else {
            Err(BoundsError::domain(format!(
                "{name} must be finite and non-negative, got {v}"
            )))
        }
    };

    match perturbation {
        Perturbation::None => Ok(()),
        Perturbation::Relative { p } => check("perturbation factor", p),
        Perturbation::Asymmetric { lower, upper } => {
            check("lower perturbation factor", lower)?;
            check("upper perturbation factor", upper)
        }
        Perturbation::Absolute { half_width } => check("perturbation half-width", half_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_intervalization_is_sign_aware() {
        let signal =
            IntervalSignal::intervalize(&[2.0, -2.0, 0.0], Perturbation::Relative { p: 0.1 }).unwrap();
        let s = signal.as_slice();
        assert!((s[0].lo() - 1.8).abs() < 1e-12 && (s[0].hi() - 2.2).abs() < 1e-12);
        assert!((s[1].lo() + 2.2).abs() < 1e-12 && (s[1].hi() + 1.8).abs() < 1e-12);
        assert!(s[2].is_degenerate());
    }

    #[test]
    fn asymmetric_and_absolute_widths() {
        let asym = IntervalSignal::intervalize(
            &[10.0],
            Perturbation::Asymmetric {
                lower: 0.1,
                upper: 0.3,
            },
        )
        .unwrap();
        assert!((asym.as_slice()[0].lo() - 9.0).abs() < 1e-12);
        assert!((asym.as_slice()[0].hi() - 13.0).abs() < 1e-12);

        let abs = IntervalSignal::intervalize(&[-1.0], Perturbation::Absolute { half_width: 0.5 })
            .unwrap();
        assert_eq!(abs.as_slice()[0], IntervalNumber::new(-1.5, -0.5).unwrap());
    }

    #[test]
    fn negative_perturbation_is_a_domain_error() {
        let err = IntervalSignal::intervalize(&[1.0], Perturbation::Relative { p: -0.1 }).unwrap_err();
        assert!(matches!(err, BoundsError::DomainError(_)));

        let err = IntervalSignal::intervalize(
            &[1.0],
            Perturbation::Asymmetric {
                lower: 0.1,
                upper: -1.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, BoundsError::DomainError(_)));
    }

    #[test]
    fn from_bounds_validates_shape_and_order() {
        assert!(matches!(
            IntervalSignal::from_bounds(&[0.0, 1.0], &[1.0]),
            Err(BoundsError::LengthMismatch { .. })
        ));
        assert!(matches!(
            IntervalSignal::from_bounds(&[0.0, 2.0], &[1.0, 1.0]),
            Err(BoundsError::InvalidInterval { .. })
        ));
        assert!(matches!(
            IntervalSignal::new(Vec::new()),
            Err(BoundsError::LengthMismatch { .. })
        ));

        let signal = IntervalSignal::from_bounds(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
        assert_eq!(signal.len(), 2);
        assert_eq!(signal.midpoints(), vec![0.5, 2.0]);
        assert!(signal.admits(&[0.0, 3.0]));
        assert!(!signal.admits(&[0.0, 3.5]));
        assert!(!signal.is_precise());
    }

    #[test]
    fn precise_signal_is_degenerate() {
        let signal = IntervalSignal::precise(&[1.0, -4.0]).unwrap();
        assert!(signal.is_precise());
        assert_eq!(signal.lower(), signal.upper());
    }
}
