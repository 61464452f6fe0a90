//! Numeric building blocks: complex algebra and polynomials with complex coefficients.
//!
//! Everything here works in fixed `f64` precision. Equality and ordering of complex
//! values are epsilon-tolerant; see [`EPSILON`].

pub mod complex;
pub mod polynomial;

pub use complex::{Complex, Polar, conjugates};
pub use polynomial::{HalleySolver, Polynomial, ROOT_EPSILON};

/// Default tolerance for complex equality, ordering and conjugate detection.
pub const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// Every restart of an iterative solver failed to converge.
    NonConvergence { trials: usize },
    InvalidInput(&'static str),
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonConvergence { trials } => {
                write!(f, "no convergence after {trials} restart trials")
            }
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for MathError {}

/// Returns `true` when `a` and `b` differ by less than `eps`.
#[inline]
pub fn close_to(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}
