//! Common domain types and the library-wide error type.

pub mod serialization;
pub mod types;

pub use serialization::{from_json, from_msgpack, to_json_pretty, to_msgpack};
pub use types::Root;

use crate::dsl::ParseError;
use crate::engines::fft::FftError;
use crate::math::MathError;

/// Errors surfaced by the design-level API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Input validation error, including unparsable text.
    InvalidInput(String),
    /// Root extraction ran out of restart trials.
    ConvergenceFailure(String),
    /// Numerical issue (transform size, aliasing, invalid state).
    NumericalError(String),
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::ConvergenceFailure(msg) => write!(f, "convergence failure: {msg}"),
            Self::NumericalError(msg) => write!(f, "numerical error: {msg}"),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<ParseError> for FilterError {
    fn from(err: ParseError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<MathError> for FilterError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::NonConvergence { .. } => Self::ConvergenceFailure(err.to_string()),
            MathError::InvalidInput(_) => Self::InvalidInput(err.to_string()),
        }
    }
}

impl From<FftError> for FilterError {
    fn from(err: FftError) -> Self {
        Self::NumericalError(err.to_string())
    }
}
