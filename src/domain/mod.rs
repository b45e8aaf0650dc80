//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - algorithm and scheduling enums (`Algorithm`, `AlgorithmChoice`, `Execution`)
//! - intervalization settings (`Perturbation`)
//! - loaded input (`SignalData`) and run configuration (`RunConfig`)
//! - the exported bounds schema (`BoundsFile`)

pub mod types;

pub use types::*;
