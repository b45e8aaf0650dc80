//! `interval-spectra` library crate.
//!
//! Guaranteed lower/upper bounds on DFT amplitudes of signals whose samples are
//! only known to lie in closed intervals.
//!
//! The binary (`ispec`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the bound engine is reusable from other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod signal;
pub mod spectrum;
