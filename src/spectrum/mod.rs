//! Amplitude-bound engine.
//!
//! Responsibilities:
//!
//! - build time/frequency grids and the shared cosine/sine table
//! - bound the real and imaginary DFT sums per frequency (exact linear forms)
//! - turn each real/imaginary box into exact and selective amplitude bounds
//! - sweep all frequencies (parallel or sequential)
//! - precise reference DFT and Monte-Carlo inner envelopes for comparison

pub mod amplitude;
pub mod coefficients;
pub mod linear_form;
pub mod monte_carlo;
pub mod precise;
pub mod sweep;

pub use amplitude::*;
pub use coefficients::*;
pub use linear_form::*;
pub use monte_carlo::*;
pub use precise::*;
pub use sweep::*;
