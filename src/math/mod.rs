//! Mathematical utilities: closed real intervals and float helpers.

pub mod interval;
pub mod float;

pub use float::*;
pub use interval::*;
