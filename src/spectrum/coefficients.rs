//! Time/frequency grids and the precomputed DFT weight table.
//!
//! The table stores `cos(ω_k·t_n)` and `sin(ω_k·t_n)` for every pair of frequency
//! index `k` and time index `n`. It depends only on the grids, never on signal
//! values, so it is built once and shared read-only by every bound computation
//! (including across rayon workers).
//!
//! Layout: both matrices are `N × K` (time × frequency) in nalgebra's
//! column-major storage, so the weights for one frequency are a contiguous slice
//! and the precise transform is a single `tr_mul`.

use std::f64::consts::PI;

use nalgebra::DMatrix;

use crate::error::BoundsError;
use crate::math::scaled_tolerance;

/// Sample time stamps `t_n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Finite, non-decreasing time stamps.
    pub fn new(times: Vec<f64>) -> Result<Self, BoundsError> {
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(BoundsError::domain(format!("time stamps must be finite, got {t}")));
        }
        if let Some(n) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(BoundsError::domain(format!(
                "time stamps must be ordered, but t[{}] = {} follows t[{n}] = {}",
                n + 1,
                times[n + 1],
                times[n]
            )));
        }
        Ok(Self { times })
    }

    /// The common spacing `t_1 - t_0` when every step matches it within
    /// `rel_tol`; `None` for fewer than two stamps.
    pub fn uniform_step(&self, rel_tol: f64) -> Result<Option<f64>, BoundsError> {
        let [t0, t1, ..] = self.times.as_slice() else {
            return Ok(None);
        };
        let step = t1 - t0;
        let tol = scaled_tolerance(step, rel_tol);
        if let Some(n) = self
            .times
            .windows(2)
            .position(|w| ((w[1] - w[0]) - step).abs() > tol)
        {
            return Err(BoundsError::domain(format!(
                "time stamps are not uniformly spaced: t[{}] - t[{n}] = {} but t[1] - t[0] = {step}",
                n + 1,
                self.times[n + 1] - self.times[n]
            )));
        }
        Ok(Some(step))
    }

    /// `t_n = n·dt` for `n = 0..n`.
    pub fn uniform(n: usize, dt: f64) -> Result<Self, BoundsError> {
        validate_step(dt)?;
        Ok(Self {
            times: (0..n).map(|i| i as f64 * dt).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }
}

/// Non-negative angular frequencies `ω_k` (rad/s).
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyGrid {
    omega: Vec<f64>,
}

impl FrequencyGrid {
    pub fn new(omega: Vec<f64>) -> Result<Self, BoundsError> {
        if let Some(w) = omega.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
            return Err(BoundsError::domain(format!(
                "angular frequencies must be finite and non-negative, got {w}"
            )));
        }
        Ok(Self { omega })
    }

    /// Conventional one-sided DFT grid without the DC bin:
    /// `ω_k = k·2π/(N·dt)` for `k = 1..=⌊N/2⌋`.
    pub fn nyquist(n: usize, dt: f64) -> Result<Self, BoundsError> {
        validate_step(dt)?;
        let d_omega = resolution(n, dt);
        Ok(Self {
            omega: (1..=n / 2).map(|k| k as f64 * d_omega).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.omega.len()
    }

    pub fn is_empty(&self) -> bool {
        self.omega.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.omega
    }
}

/// Angular frequency spacing `2π/(N·dt)` of an `N`-sample record.
pub fn resolution(n: usize, dt: f64) -> f64 {
    2.0 * PI / (n.max(1) as f64 * dt)
}

fn validate_step(dt: f64) -> Result<(), BoundsError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(BoundsError::domain(format!(
            "time step must be finite and positive, got {dt}"
        )))
    }
}

/// Read-only cosine/sine weights for every (frequency, time) pair.
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    omega: Vec<f64>,
    cos: DMatrix<f64>,
    sin: DMatrix<f64>,
}

impl CoefficientTable {
    pub fn new(times: &TimeGrid, frequencies: &FrequencyGrid) -> Self {
        let t = times.as_slice();
        let w = frequencies.as_slice();
        let cos = DMatrix::from_fn(t.len(), w.len(), |n, k| (w[k] * t[n]).cos());
        let sin = DMatrix::from_fn(t.len(), w.len(), |n, k| (w[k] * t[n]).sin());

        Self {
            omega: w.to_vec(),
            cos,
            sin,
        }
    }

    /// Uniform sampling with the Nyquist frequency grid.
    pub fn uniform(n: usize, dt: f64) -> Result<Self, BoundsError> {
        Ok(Self::new(
            &TimeGrid::uniform(n, dt)?,
            &FrequencyGrid::nyquist(n, dt)?,
        ))
    }

    /// Number of time samples `N`.
    pub fn n_times(&self) -> usize {
        self.cos.nrows()
    }

    /// Number of frequencies `K`.
    pub fn n_frequencies(&self) -> usize {
        self.omega.len()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.omega
    }

    /// `cos(ω_k·t_n)` for `n = 0..N`.
    ///
    /// # Panics
    /// Panics if `k >= self.n_frequencies()`.
    pub fn cos_row(&self, k: usize) -> &[f64] {
        column(&self.cos, k)
    }

    /// `sin(ω_k·t_n)` for `n = 0..N`.
    ///
    /// # Panics
    /// Panics if `k >= self.n_frequencies()`.
    pub fn sin_row(&self, k: usize) -> &[f64] {
        column(&self.sin, k)
    }

    pub fn cos_matrix(&self) -> &DMatrix<f64> {
        &self.cos
    }

    pub fn sin_matrix(&self) -> &DMatrix<f64> {
        &self.sin
    }
}

fn column(m: &DMatrix<f64>, k: usize) -> &[f64] {
    let n = m.nrows();
    &m.as_slice()[k * n..(k + 1) * n]
}
