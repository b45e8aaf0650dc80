//! Reference DFT for precise (non-interval) signals.
//!
//! Uses the same coefficient table as the bound engine, so bounds and reference
//! amplitudes are directly comparable frequency by frequency.

use nalgebra::DVector;

use crate::error::BoundsError;
use crate::math::modulus;
use crate::spectrum::CoefficientTable;

/// Real and imaginary DFT sums at every table frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct PreciseSpectrum {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

impl PreciseSpectrum {
    pub fn amplitudes(&self) -> Vec<f64> {
        self.re
            .iter()
            .zip(&self.im)
            .map(|(&r, &i)| modulus(r, i))
            .collect()
    }
}

/// `R_k = Σ x_n cos(ω_k t_n)`, `I_k = Σ x_n sin(ω_k t_n)` for all `k`.
pub fn precise_spectrum(values: &[f64], table: &CoefficientTable) -> Result<PreciseSpectrum, BoundsError> {
    if values.len() != table.n_times() {
        return Err(BoundsError::length_mismatch(
            "signal samples (time grid)",
            table.n_times(),
            values.len(),
        ));
    }

    let x = DVector::from_column_slice(values);
    let re = table.cos_matrix().tr_mul(&x);
    let im = table.sin_matrix().tr_mul(&x);

    Ok(PreciseSpectrum {
        re: re.iter().copied().collect(),
        im: im.iter().copied().collect(),
    })
}

/// Amplitude `|X(ω_k)|` at every table frequency.
pub fn precise_amplitudes(values: &[f64], table: &CoefficientTable) -> Result<Vec<f64>, BoundsError> {
    Ok(precise_spectrum(values, table)?.amplitudes())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::spectrum::{FrequencyGrid, TimeGrid};

    #[test]
    fn pure_tone_peaks_at_its_bin() {
        // x_n = cos(ω_2 t_n) on a 16-sample record: |X| = N/2 at bin 2, ~0 elsewhere.
        let n = 16;
        let dt = 0.5;
        let table = CoefficientTable::uniform(n, dt).unwrap();
        let w2 = table.frequencies()[1];
        let values: Vec<f64> = (0..n).map(|i| (w2 * i as f64 * dt).cos()).collect();

        let amps = precise_amplitudes(&values, &table).unwrap();
        assert_eq!(amps.len(), n / 2);
        for (k, a) in amps.iter().enumerate() {
            if k == 1 {
                assert!((a - n as f64 / 2.0).abs() < 1e-9, "peak {a}");
            } else {
                assert!(a.abs() < 1e-9, "bin {k} leaked {a}");
            }
        }
    }

    #[test]
    fn matches_direct_summation_on_arbitrary_grid() {
        let times = TimeGrid::new(vec![0.0, 0.3, 0.7, 1.6]).unwrap();
        let freqs = FrequencyGrid::new(vec![0.5, PI, 4.2]).unwrap();
        let table = CoefficientTable::new(&times, &freqs);
        let values = [1.0, -2.0, 0.5, 3.0];

        let spectrum = precise_spectrum(&values, &table).unwrap();
        for (k, &w) in freqs.as_slice().iter().enumerate() {
            let re: f64 = times.as_slice().iter().zip(&values).map(|(t, x)| x * (w * t).cos()).sum();
            let im: f64 = times.as_slice().iter().zip(&values).map(|(t, x)| x * (w * t).sin()).sum();
            assert!((spectrum.re[k] - re).abs() < 1e-12);
            assert!((spectrum.im[k] - im).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_wrong_signal_length() {
        let table = CoefficientTable::uniform(8, 1.0).unwrap();
        assert!(matches!(
            precise_amplitudes(&[1.0; 7], &table),
            Err(BoundsError::LengthMismatch { .. })
        ));
    }
}
