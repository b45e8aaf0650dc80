//! Reporting utilities: per-frequency diagnostics, rankings, and formatted output.

pub mod format;

pub use format::*;

use crate::error::AppError;
use crate::math::IntervalNumber;
use crate::spectrum::SpectrumBounds;

/// Bounds plus derived quantities for one frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyDiagnostic {
    pub index: usize,
    pub omega: f64,
    pub exact: IntervalNumber,
    pub selective: IntervalNumber,
    /// Precise amplitude of the reference realization, when one is known.
    pub reference: Option<f64>,
    /// `exact.lo - selective.lo` (how much the selective bound gives away below).
    pub looseness: f64,
}

/// Aggregate view over all frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsSummary {
    pub n_frequencies: usize,
    pub mean_exact_width: f64,
    pub mean_looseness: f64,
    pub max_looseness: f64,
    /// Frequencies where the selective lower bound is strictly below the exact one.
    pub n_loose: usize,
    /// `Some(true)` when every reference amplitude lies inside its exact bound.
    pub reference_contained: Option<bool>,
}

/// Build one diagnostic row per frequency.
pub fn compute_diagnostics(
    bounds: &SpectrumBounds,
    reference: Option<&[f64]>,
) -> Result<Vec<FrequencyDiagnostic>, AppError> {
    if let Some(r) = reference {
        if r.len() != bounds.len() {
            return Err(AppError::new(
                4,
                format!("Reference has {} entries, bounds have {}.", r.len(), bounds.len()),
            ));
        }
    }

    Ok((0..bounds.len())
        .map(|k| {
            let exact = bounds.exact[k];
            let selective = bounds.selective[k];
            FrequencyDiagnostic {
                index: k,
                omega: bounds.frequencies[k],
                exact,
                selective,
                reference: reference.map(|r| r[k]),
                looseness: exact.lo() - selective.lo(),
            }
        })
        .collect())
}

/// Summarize diagnostics. `tol` is the absolute slack allowed for reference containment.
pub fn summarize(diagnostics: &[FrequencyDiagnostic], tol: f64) -> BoundsSummary {
    let n = diagnostics.len();
    let denom = n.max(1) as f64;

    let mean_exact_width = diagnostics.iter().map(|d| d.exact.width()).sum::<f64>() / denom;
    let mean_looseness = diagnostics.iter().map(|d| d.looseness).sum::<f64>() / denom;
    let max_looseness = diagnostics.iter().map(|d| d.looseness).fold(0.0, f64::max);
    let n_loose = diagnostics.iter().filter(|d| d.looseness > 0.0).count();

    let has_reference = diagnostics.iter().any(|d| d.reference.is_some());
    let reference_contained = has_reference.then(|| {
        diagnostics.iter().all(|d| match d.reference {
            Some(a) => d.exact.lo() - tol <= a && a <= d.exact.hi() + tol,
            None => true,
        })
    });

    BoundsSummary {
        n_frequencies: n,
        mean_exact_width,
        mean_looseness,
        max_looseness,
        n_loose,
        reference_contained,
    }
}

/// The `top_n` frequencies with the widest exact bound (most uncertain first).
pub fn rank_widest(diagnostics: &[FrequencyDiagnostic], top_n: usize) -> Vec<FrequencyDiagnostic> {
    let mut sorted = diagnostics.to_vec();
    sorted.sort_by(|a, b| {
        b.exact
            .width()
            .partial_cmp(&a.exact.width())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(lo: f64, hi: f64) -> IntervalNumber {
        IntervalNumber::new(lo, hi).unwrap()
    }

    fn bounds() -> SpectrumBounds {
        SpectrumBounds {
            frequencies: vec![1.0, 2.0, 3.0],
            exact: vec![iv(1.0, 2.0), iv(0.5, 4.0), iv(0.0, 1.0)],
            selective: vec![iv(1.0, 2.0), iv(0.0, 4.0), iv(0.0, 1.0)],
        }
    }

    #[test]
    fn diagnostics_measure_selective_looseness() {
        let diags = compute_diagnostics(&bounds(), Some(&[1.5, 3.0, 0.2])).unwrap();
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[1].looseness, 0.5);
        assert_eq!(diags[0].looseness, 0.0);

        let summary = summarize(&diags, 1e-9);
        assert_eq!(summary.n_loose, 1);
        assert!((summary.max_looseness - 0.5).abs() < 1e-12);
        assert!((summary.mean_exact_width - 5.5 / 3.0).abs() < 1e-12);
        assert_eq!(summary.reference_contained, Some(true));
    }

    #[test]
    fn summary_flags_reference_outside_bound() {
        let diags = compute_diagnostics(&bounds(), Some(&[2.5, 3.0, 0.2])).unwrap();
        assert_eq!(summarize(&diags, 1e-9).reference_contained, Some(false));

        let no_ref = compute_diagnostics(&bounds(), None).unwrap();
        assert_eq!(summarize(&no_ref, 1e-9).reference_contained, None);
    }

    #[test]
    fn rank_widest_orders_by_exact_width() {
        let diags = compute_diagnostics(&bounds(), None).unwrap();
        let top = rank_widest(&diags, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].index, 1);
        assert_eq!(top[1].index, 0);
    }

    #[test]
    fn misaligned_reference_is_an_error() {
        assert!(compute_diagnostics(&bounds(), Some(&[1.0])).is_err());
    }
}
