//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the bound sweep
//! - exported to JSON/CSV
//! - reloaded later for reporting or comparisons

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::IntervalNumber;

/// Amplitude-bound policy.
///
/// Both variants consume the same per-frequency real/imaginary box so they can
/// be cross-checked against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Exact range of the modulus over the box (case analysis on zero straddles).
    Exact,
    /// Modulus evaluated at the four box corners only (valid, looser minimum).
    Selective,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Exact, Algorithm::Selective];

    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::Exact => "interval (exact)",
            Algorithm::Selective => "selective",
        }
    }
}

/// Which bound sequences to show/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmChoice {
    Exact,
    Selective,
    Both,
}

impl AlgorithmChoice {
    pub fn includes(self, algorithm: Algorithm) -> bool {
        match self {
            AlgorithmChoice::Both => true,
            AlgorithmChoice::Exact => algorithm == Algorithm::Exact,
            AlgorithmChoice::Selective => algorithm == Algorithm::Selective,
        }
    }
}

/// How the per-frequency sweep is scheduled. Results are identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Frequencies evaluated on the rayon thread pool.
    Parallel,
    /// Frequencies evaluated in order on the calling thread.
    Sequential,
}

/// How a precise signal is widened into an interval signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Perturbation {
    /// Keep the samples precise (degenerate intervals).
    None,
    /// `[x - p|x|, x + p|x|]`; equals `[x(1-p), x(1+p)]` for `x >= 0`.
    Relative { p: f64 },
    /// `[x - lower·|x|, x + upper·|x|]`.
    Asymmetric { lower: f64, upper: f64 },
    /// `[x - w, x + w]`.
    Absolute { half_width: f64 },
}

/// Samples as read from disk, before intervalization.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalSamples {
    Precise(Vec<f64>),
    Intervals(Vec<IntervalNumber>),
}

impl SignalSamples {
    pub fn len(&self) -> usize {
        match self {
            SignalSamples::Precise(v) => v.len(),
            SignalSamples::Intervals(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded time signal plus its sampling step.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalData {
    /// Time step (seconds) between consecutive samples.
    pub dt: f64,
    pub samples: SignalSamples,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub signal_path: PathBuf,
    /// Overrides the step stored in the signal file.
    pub dt: Option<f64>,
    pub perturbation: Perturbation,
    pub algorithm: AlgorithmChoice,
    pub execution: Execution,

    pub top_n: usize,

    /// Monte-Carlo realizations drawn by `ispec check`.
    pub samples: usize,
    pub seed: u64,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved bounds file (JSON).
///
/// Sequences include the conventional DC entry (`omega = 0`, bound `[0, 0]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub dt: f64,
    pub n_samples: usize,
    pub perturbation: Perturbation,
    pub omega: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<Vec<IntervalNumber>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<Vec<IntervalNumber>>,
}
