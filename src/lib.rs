//! polezero is a toolkit for designing digital filters by placing poles and zeros.
//!
//! The crate combines a complex-number calculator (roots are typed as expressions
//! such as `0.9*e^(pi/4*i)`), a polynomial engine that builds transfer-function
//! polynomials from roots and recovers roots from polynomials, and a radix-2 FFT
//! that evaluates those polynomials on the unit circle to produce the magnitude
//! response.
//!
//! Layout:
//! - [`math`]: complex algebra, polynomials and Halley root finding.
//! - [`dsl`]: parser combinators, the expression grammar and bulk import.
//! - [`engines`]: the FFT and the frequency response built on it.
//! - [`design`]: editable design state (roots, options, import/export).
//! - [`core`]: shared types, the crate-level error and persistence helpers.
//!
//! Numerical considerations:
//! - Everything is `f64`. Complex equality and ordering are tolerant to `1e-9`.
//! - A single complex root always brings its conjugate along, so the filter's
//!   polynomials have real coefficients.
//! - The response resolution must be a power of two no larger than 65536, and the
//!   number of expanded roots must stay below it.
//!
//! # Quick Start
//! Evaluate an expression:
//! ```rust
//! use polezero::dsl::calculate;
//!
//! let z = calculate("sqrt(-1)").unwrap();
//! assert!((z.imag - 1.0).abs() < 1e-9);
//! ```
//!
//! Build a polynomial from roots and recover them:
//! ```rust
//! use polezero::math::{Complex, Polynomial};
//!
//! let roots = [Complex::new(0.5, 0.5), Complex::new(0.5, -0.5), Complex::from_real(-2.0)];
//! let poly = Polynomial::from_roots(&roots);
//! let found = poly.find_roots().unwrap();
//! assert_eq!(found.len(), 3);
//! assert!(found[0].approx_eq_eps(Complex::from_real(-2.0), 1e-6));
//! ```
//!
//! Compute a frequency response:
//! ```rust
//! use polezero::design::FilterDesign;
//!
//! let design = FilterDesign::from_import("zeros = [-1]\npoles = [0.5]").unwrap();
//! let response = design.response().unwrap();
//! assert!((response.magnitudes[0] - 4.0).abs() < 1e-9);
//! ```

pub mod core;
pub mod design;
pub mod dsl;
pub mod engines;
pub mod math;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::{FilterError, Root};
    pub use crate::design::{FilterDesign, ResponseOptions, RootKind};
    pub use crate::dsl::{ParseError, calculate, parse_import};
    pub use crate::engines::{FrequencyResponse, magnitude_response};
    pub use crate::math::{Complex, Polar, Polynomial};
}
