//! Error types.
//!
//! Two layers:
//!
//! - [`BoundsError`]: the failure kinds of the numerical core (bad intervals,
//!   mismatched lengths, out-of-domain parameters). Every core operation
//!   returns these eagerly, before any partial accumulation.
//! - [`AppError`]: what the binary reports, carrying a process exit code.

use thiserror::Error;

/// Failure kinds of the bound computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// An interval with `lo > hi` or a non-finite endpoint.
    #[error("Invalid interval [{lo}, {hi}]: endpoints must be finite with lo <= hi")]
    InvalidInterval { lo: f64, hi: f64 },

    /// Two sequences that must be aligned have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// A parameter outside its admissible range (negative perturbation, negative frequency, ...).
    #[error("Domain error: {0}")]
    DomainError(String),
}

impl BoundsError {
    pub fn length_mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        BoundsError::LengthMismatch {
            what,
            expected,
            found,
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        BoundsError::DomainError(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<BoundsError> for AppError {
    fn from(err: BoundsError) -> Self {
        AppError::new(2, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_errors_map_to_usage_exit_code() {
        let err: AppError = BoundsError::length_mismatch("coefficient row", 4, 3).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("expected 4, found 3"));
    }
}
