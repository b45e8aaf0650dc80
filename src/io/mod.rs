//! Input/output helpers.
//!
//! - signal ingest from JSON/CSV (`signal`)
//! - per-frequency CSV exports (`export`)
//! - bounds JSON read/write (`bounds`)

pub mod bounds;
pub mod export;
pub mod signal;

pub use bounds::*;
pub use export::*;
pub use signal::*;
