use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dsl::calculate;
use crate::math::{Complex, Polar};

/// A pole or zero as the user wrote it.
///
/// Keeps the source text next to its value. Text that fails to parse is kept
/// as-is with the rendered parse error and a zero value; a zero root adds no
/// factor to its polynomial, so an invalid entry never disturbs the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub repr: String,
    pub value: Complex,
    pub error: Option<String>,
}

impl Root {
    pub fn new(repr: impl Into<String>, value: Complex) -> Self {
        Self {
            repr: repr.into(),
            value,
            error: None,
        }
    }

    /// Evaluates `text` with the calculator grammar.
    pub fn parse(text: &str) -> Self {
        match calculate(text) {
            Ok(value) => Self::new(text, value),
            Err(err) => Self {
                repr: text.to_string(),
                value: Complex::ZERO,
                error: Some(err.to_string()),
            },
        }
    }

    /// An entry created from a value, e.g. by dragging a marker.
    pub fn from_value(value: Complex) -> Self {
        Self::new(value.to_string(), value)
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::new("0", Complex::ZERO)
    }
}

/// The error text if parsing failed, polar form if the text mentions `e`, and
/// Cartesian form otherwise.
impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return f.write_str(error);
        }
        if self.repr.contains('e') {
            fmt::Display::fmt(&Polar::from(self.value), f)
        } else {
            fmt::Display::fmt(&self.value, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parse_keeps_text_and_value() {
        let root = Root::parse("0.5 + 0.5i");
        assert!(root.is_valid());
        assert_eq!(root.repr, "0.5 + 0.5i");
        assert_eq!(root.value, Complex::new(0.5, 0.5));
        assert_eq!(root.to_string(), "0.5000 + 0.5000i");
    }

    #[test]
    fn invalid_text_becomes_a_zero_root_with_error() {
        let root = Root::parse("1 +");
        assert!(!root.is_valid());
        assert_eq!(root.value, Complex::ZERO);
        assert_eq!(root.repr, "1 +");
        assert_eq!(
            root.to_string(),
            "ParseError: expected sign, number, constant, function or \"(\" at index 3"
        );
    }

    #[test]
    fn exponential_text_displays_in_polar_form() {
        let root = Root::parse("0.9*e^(pi/2*i)");
        assert_abs_diff_eq!(root.value.norm(), 0.9, epsilon = 1e-12);
        assert_eq!(root.to_string(), "0.9000*e^(1.5708i)");
        assert_eq!(format!("{root:.2}"), "0.90*e^(1.57i)");
    }

    #[test]
    fn from_value_renders_cartesian_text() {
        let root = Root::from_value(Complex::new(-0.25, 1.0));
        assert_eq!(root.repr, "-0.2500 + 1.0000i");
        assert_eq!(Root::parse(&root.repr).value, root.value);
    }
}
