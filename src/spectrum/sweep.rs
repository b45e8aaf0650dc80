//! Per-frequency sweep.
//!
//! For each frequency `k` we build the real/imaginary box (O(N)) and derive both
//! amplitude bounds from it (O(1)). Frequencies are independent: the only shared
//! state is the read-only signal and coefficient table, so the parallel sweep is a
//! plain rayon map with no locking. Output order always follows the frequency grid.

use rayon::prelude::*;

use crate::domain::{Algorithm, Execution};
use crate::error::BoundsError;
use crate::math::IntervalNumber;
use crate::signal::IntervalSignal;
use crate::spectrum::{AmplitudeBounds, CoefficientTable, frequency_box};

/// Exact and selective amplitude bounds aligned with a frequency grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumBounds {
    pub frequencies: Vec<f64>,
    pub exact: Vec<IntervalNumber>,
    pub selective: Vec<IntervalNumber>,
}

impl SpectrumBounds {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn bound(&self, algorithm: Algorithm) -> &[IntervalNumber] {
        match algorithm {
            Algorithm::Exact => &self.exact,
            Algorithm::Selective => &self.selective,
        }
    }

    /// Prepend the conventional DC entry (`ω = 0`, bound `[0, 0]`) to every sequence.
    pub fn with_dc(mut self) -> Self {
        self.frequencies.insert(0, 0.0);
        self.exact.insert(0, IntervalNumber::ZERO);
        self.selective.insert(0, IntervalNumber::ZERO);
        self
    }
}

/// Compute both bound sequences for every frequency of `table`.
///
/// Lengths are checked before any frequency is processed.
pub fn compute_bounds(
    signal: &IntervalSignal,
    table: &CoefficientTable,
    execution: Execution,
) -> Result<SpectrumBounds, BoundsError> {
    if signal.len() != table.n_times() {
        return Err(BoundsError::length_mismatch(
            "signal samples (time grid)",
            table.n_times(),
            signal.len(),
        ));
    }

    let k = table.n_frequencies();
    tracing::debug!(
        n_samples = signal.len(),
        n_frequencies = k,
        ?execution,
        "computing amplitude bounds"
    );

    let per_frequency = |idx: usize| frequency_box(signal, table, idx).map(|b| b.amplitude_bounds());

    let bounds: Vec<AmplitudeBounds> = match execution {
        Execution::Parallel => (0..k)
            .into_par_iter()
            .map(per_frequency)
            .collect::<Result<_, _>>()?,
        Execution::Sequential => (0..k).map(per_frequency).collect::<Result<_, _>>()?,
    };

    let (exact, selective): (Vec<_>, Vec<_>) = bounds
        .iter()
        .map(|b| (b.get(Algorithm::Exact), b.get(Algorithm::Selective)))
        .unzip();

    Ok(SpectrumBounds {
        frequencies: table.frequencies().to_vec(),
        exact,
        selective,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::domain::Perturbation;
    use crate::spectrum::precise_amplitudes;

    fn wave(n: usize, dt: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                1.5 * (0.9 * t).sin() + 0.7 * (2.3 * t + 0.4).cos() - 0.2
            })
            .collect()
    }

    #[test]
    fn precise_signal_collapses_to_reference_amplitudes() {
        let n = 64;
        let dt = 0.25;
        let values = wave(n, dt);
        let table = CoefficientTable::uniform(n, dt).unwrap();
        let signal = IntervalSignal::precise(&values).unwrap();

        let bounds = compute_bounds(&signal, &table, Execution::Sequential).unwrap();
        let reference = precise_amplitudes(&values, &table).unwrap();

        assert_eq!(bounds.len(), reference.len());
        for (k, amp) in reference.iter().enumerate() {
            for alg in Algorithm::ALL {
                let b = bounds.bound(alg)[k];
                assert!(b.width() < 1e-9, "{alg:?} k={k} width {}", b.width());
                assert!((b.mid() - amp).abs() < 1e-9, "{alg:?} k={k}");
            }
        }
    }

    #[test]
    fn interval_signal_bounds_bracket_reference_and_realizations() {
        let n = 48;
        let dt = 0.5;
        let values = wave(n, dt);
        let table = CoefficientTable::uniform(n, dt).unwrap();
        let signal = IntervalSignal::intervalize(&values, Perturbation::Relative { p: 0.1 }).unwrap();

        let bounds = compute_bounds(&signal, &table, Execution::Parallel).unwrap();
        let reference = precise_amplitudes(&values, &table).unwrap();
        let tol = 1e-9;

        for k in 0..bounds.len() {
            let exact = bounds.exact[k];
            let selective = bounds.selective[k];
            assert!(exact.lo() >= 0.0);
            assert!(selective.encloses(&exact));
            assert_eq!(selective.hi(), exact.hi());
            assert!(exact.lo() - tol <= reference[k] && reference[k] <= exact.hi() + tol);
        }

        let mut rng = StdRng::seed_from_u64(99);
        for draw in signal.realizations(&mut rng, 100) {
            let amps = precise_amplitudes(&draw, &table).unwrap();
            for (k, a) in amps.iter().enumerate() {
                assert!(bounds.exact[k].lo() - tol <= *a && *a <= bounds.exact[k].hi() + tol);
            }
        }
    }

    #[test]
    fn parallel_and_sequential_sweeps_agree() {
        let mut rng = StdRng::seed_from_u64(21);
        let n = 40;
        let lower: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let upper: Vec<f64> = lower.iter().map(|v| v + rng.gen_range(0.0..0.5)).collect();
        let signal = IntervalSignal::from_bounds(&lower, &upper).unwrap();
        let table = CoefficientTable::uniform(n, 0.1).unwrap();

        let par = compute_bounds(&signal, &table, Execution::Parallel).unwrap();
        let seq = compute_bounds(&signal, &table, Execution::Sequential).unwrap();
        assert_eq!(par, seq);
    }

    #[test]
    fn dc_entry_is_prepended_by_the_caller() {
        let signal = IntervalSignal::precise(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let table = CoefficientTable::uniform(4, 1.0).unwrap();
        let bounds = compute_bounds(&signal, &table, Execution::Sequential).unwrap();
        assert_eq!(bounds.len(), 2);

        let with_dc = bounds.with_dc();
        assert_eq!(with_dc.len(), 3);
        assert_eq!(with_dc.frequencies[0], 0.0);
        assert_eq!(with_dc.exact[0], IntervalNumber::ZERO);
        assert_eq!(with_dc.selective[0], IntervalNumber::ZERO);
    }

    #[test]
    fn length_mismatch_is_reported_up_front() {
        let signal = IntervalSignal::precise(&[1.0, 2.0, 3.0]).unwrap();
        let table = CoefficientTable::uniform(8, 1.0).unwrap();
        assert_eq!(
            compute_bounds(&signal, &table, Execution::Parallel).unwrap_err(),
            BoundsError::length_mismatch("signal samples (time grid)", 8, 3)
        );
    }
}
