//! Monte-Carlo inner envelope and dominance checks.
//!
//! Random realizations only ever explore the inside of the admissible set, so
//! the envelope of their amplitudes must sit inside the exact bound at every
//! frequency. With more draws the envelope grows towards (but never past) it.

use rand::Rng;

use crate::error::BoundsError;
use crate::math::{IntervalNumber, scaled_tolerance};
use crate::signal::IntervalSignal;
use crate::spectrum::{CoefficientTable, precise_amplitudes};

/// Default relative tolerance for comparing independently rounded sums.
pub const DOMINANCE_REL_TOL: f64 = 1e-9;

/// Per-frequency `[min, max]` of precise amplitudes over `count` realizations.
pub fn inner_envelope<R: Rng + ?Sized>(
    signal: &IntervalSignal,
    table: &CoefficientTable,
    rng: &mut R,
    count: usize,
) -> Result<Vec<IntervalNumber>, BoundsError> {
    if count == 0 {
        return Err(BoundsError::domain("Monte-Carlo sample count must be > 0"));
    }
    if signal.len() != table.n_times() {
        return Err(BoundsError::length_mismatch(
            "signal samples (time grid)",
            table.n_times(),
            signal.len(),
        ));
    }

    let mut envelope: Vec<Option<IntervalNumber>> = vec![None; table.n_frequencies()];
    for draw in signal.realizations(rng, count) {
        let amps = precise_amplitudes(&draw, table)?;
        for (slot, a) in envelope.iter_mut().zip(amps) {
            let point = IntervalNumber::degenerate(a)?;
            *slot = Some(slot.map_or(point, |e| e.hull(point)));
        }
    }

    // count >= 1, so every slot is filled.
    Ok(envelope.into_iter().flatten().collect())
}

/// Outcome of comparing an inner envelope against exact bounds.
#[derive(Debug, Clone)]
pub struct DominanceReport {
    pub n_frequencies: usize,
    /// Frequency indices where the envelope escapes the bound beyond tolerance.
    pub violations: Vec<usize>,
    /// Largest escape observed (0 when fully contained).
    pub max_excess: f64,
    /// Mean of `envelope width / bound width` over frequencies with a non-degenerate bound.
    pub mean_coverage: f64,
}

impl DominanceReport {
    pub fn holds(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check `bound.lo <= inner.lo` and `inner.hi <= bound.hi` at every frequency.
pub fn check_dominance(
    bounds: &[IntervalNumber],
    inner: &[IntervalNumber],
    rel_tol: f64,
) -> Result<DominanceReport, BoundsError> {
    if bounds.len() != inner.len() {
        return Err(BoundsError::length_mismatch("inner envelope", bounds.len(), inner.len()));
    }

    let mut violations = Vec::new();
    let mut max_excess: f64 = 0.0;
    let mut coverage_sum = 0.0;
    let mut coverage_n = 0usize;

    for (idx, (b, e)) in bounds.iter().zip(inner).enumerate() {
        let tol = scaled_tolerance(b.hi(), rel_tol);
        let excess = (b.lo() - e.lo()).max(e.hi() - b.hi()).max(0.0);
        if excess > tol {
            violations.push(idx);
        }
        max_excess = max_excess.max(excess);

        if b.width() > 0.0 {
            coverage_sum += e.width() / b.width();
            coverage_n += 1;
        }
    }

    if !violations.is_empty() {
        tracing::warn!(
            count = violations.len(),
            max_excess,
            "Monte-Carlo envelope escapes the amplitude bound"
        );
    }

    Ok(DominanceReport {
        n_frequencies: bounds.len(),
        violations,
        max_excess,
        mean_coverage: if coverage_n > 0 {
            coverage_sum / coverage_n as f64
        } else {
            1.0
        },
    })
}
