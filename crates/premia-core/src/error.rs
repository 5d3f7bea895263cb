//! Error types for Premia.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("invalid parameter {name}: {reason}")] InvalidParameter { name: &'static str, reason: String },
    #[error("value does not fit in uint256: {0}")] Overflow(String),
}

impl CurveError {
    /// Shorthand for [`CurveError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("value does not fit in uint256: {0}")] Overflow(String),
    #[error("malformed decimal integer: {0:?}")] InvalidDecimal(String),
    #[error("malformed hex: {0}")] InvalidHex(String),
    #[error("invalid word length: got {got}, expected {expected}")] InvalidLength { got: usize, expected: usize },
}
