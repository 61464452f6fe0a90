//! Complex-expression calculator built on backtracking parser combinators.
//!
//! # Architecture
//!
//! ```text
//! text ──→ lexer primitives ──→ combinators ──→ expr (precedence tower) ──→ Complex
//!                                    │
//!                                    └──→ import (label = [ expr, ... ] lists)
//! ```
//!
//! Failures never unwind. Every parser returns either a success or a failure value,
//! and both carry a hint tree recording what was expected at which offset. A
//! failed parse reports the labels found at the deepest offset any branch reached.
//!
//! # Quick Start
//!
//! ```rust
//! use polezero::dsl::{calculate, parse_import};
//!
//! let z = calculate("2pi i").unwrap();
//! assert!((z.imag - 2.0 * std::f64::consts::PI).abs() < 1e-12);
//!
//! let err = calculate("sqrt(").unwrap_err();
//! assert_eq!(err.offset, 5);
//!
//! let entries = parse_import("zeros = [1, -1]\npoles = [0.5i]").unwrap();
//! assert_eq!(entries[1].roots[0].repr, "0.5i");
//! ```

pub mod combinator;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod hints;
pub mod import;
pub mod lexer;

pub use combinator::{
    Failure, Parser, Reply, Success, choice, forward, many, not, optional, sep_by, sequence,
};
pub use error::{ParseError, Span};
pub use grammar::{BinaryFn, UnaryFn, calculate, constant, expression};
pub use hints::Hints;
pub use import::{ImportEntry, parse_import};
