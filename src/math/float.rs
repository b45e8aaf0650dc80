//! Small floating-point helpers shared by the precise and interval paths.
//!
//! Numerical notes:
//! - Moduli are computed with `hypot`, which avoids overflow/underflow of
//!   `sqrt(re² + im²)` for very large or very small components.
//! - Comparisons between independently rounded sums (e.g. a precise DFT versus an
//!   interval bound) need a tolerance that scales with the magnitudes involved.

/// Absolute floor for [`scaled_tolerance`], so exact zeros still compare sanely.
const ABS_FLOOR: f64 = 1e-12;

/// `|re + i·im|`.
pub fn modulus(re: f64, im: f64) -> f64 {
    re.hypot(im)
}

/// Tolerance `rel · max(|reference|, 1)`, floored at a tiny absolute value.
pub fn scaled_tolerance(reference: f64, rel: f64) -> f64 {
    (rel * reference.abs().max(1.0)).max(ABS_FLOOR)
}
