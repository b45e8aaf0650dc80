//! Exact range of a real linear form over an interval signal.
//!
//! For fixed weights `c_n`, the form `Σ c_n·x_n` is monotone in every `x_n`, and
//! every variable appears exactly once. Summing `scale(x_n, c_n)` term by term
//! therefore gives the exact range: there is no dependency problem to widen it.
//! The real and imaginary parts of the DFT at one frequency are two such forms
//! (cosine row and sine row) and together give the [`FrequencyBox`].

use crate::error::BoundsError;
use crate::math::IntervalNumber;
use crate::signal::IntervalSignal;
use crate::spectrum::CoefficientTable;

/// Real/imaginary ranges `(R_k, I_k)` of the DFT at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBox {
    pub re: IntervalNumber,
    pub im: IntervalNumber,
}

impl FrequencyBox {
    pub fn new(re: IntervalNumber, im: IntervalNumber) -> Self {
        Self { re, im }
    }
}

/// Which end of a linear form's range to realize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Lower,
    Upper,
}

/// Exact interval range of `Σ_n coeffs[n]·x_n` with `x_n ∈ signal[n]`.
pub fn linear_form_bounds(signal: &IntervalSignal, coeffs: &[f64]) -> Result<IntervalNumber, BoundsError> {
    if coeffs.len() != signal.len() {
        return Err(BoundsError::length_mismatch(
            "coefficient row",
            signal.len(),
            coeffs.len(),
        ));
    }

    Ok(signal
        .iter()
        .zip(coeffs)
        .fold(IntervalNumber::ZERO, |acc, (x, &c)| acc.add(x.scale(c))))
}

/// Build `(R_k, I_k)` for frequency index `k`.
///
/// Fails with `LengthMismatch` if the signal does not match the table's time grid,
/// or if `k` is not a frequency index of the table.
pub fn frequency_box(
    signal: &IntervalSignal,
    table: &CoefficientTable,
    k: usize,
) -> Result<FrequencyBox, BoundsError> {
    if k >= table.n_frequencies() {
        return Err(BoundsError::length_mismatch(
            "frequency index (table size)",
            table.n_frequencies(),
            k + 1,
        ));
    }
    let re = linear_form_bounds(signal, table.cos_row(k))?;
    let im = linear_form_bounds(signal, table.sin_row(k))?;
    Ok(FrequencyBox { re, im })
}

/// A realization attaining one end of the linear form's range.
///
/// Each sample is pinned to the endpoint that pushes its own term in the
/// requested direction (`hi` for positive weights when maximizing, `lo` for
/// negative ones, and the reverse when minimizing).
pub fn extremal_realization(
    signal: &IntervalSignal,
    coeffs: &[f64],
    extreme: Extreme,
) -> Result<Vec<f64>, BoundsError> {
    if coeffs.len() != signal.len() {
        return Err(BoundsError::length_mismatch(
            "coefficient row",
            signal.len(),
            coeffs.len(),
        ));
    }

    Ok(signal
        .iter()
        .zip(coeffs)
        .map(|(x, &c)| match (extreme, c >= 0.0) {
            (Extreme::Upper, true) | (Extreme::Lower, false) => x.hi(),
            (Extreme::Upper, false) | (Extreme::Lower, true) => x.lo(),
        })
        .collect())
}
