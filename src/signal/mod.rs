//! Interval time signals and realization sampling.
//!
//! - `IntervalSignal`: immutable per-sample intervals plus intervalization
//! - `sample`: uniform realizations for Monte-Carlo comparisons

pub mod interval_signal;
pub mod sample;

pub use interval_signal::*;
pub use sample::*;
