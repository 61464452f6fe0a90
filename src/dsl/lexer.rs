//! Primitive parsers: literal strings, anchored regexes and the token shapes the
//! expression grammar is built from.

use regex::Regex;

use crate::dsl::combinator::{Failure, Parser, Success};
use crate::dsl::hints::Hints;

/// Label reported when trailing input remains.
pub const END_OF_INPUT: &str = "end of input";

pub const NUMBER_PATTERN: &str = r"[0-9]+(\.[0-9]*)?(e[+-]?[0-9]+)?";
pub const IDENTIFIER_PATTERN: &str = r"[0-9A-Za-z_]+";

/// Matches `literal` exactly. Failures are labeled with the quoted literal.
pub fn string(literal: &'static str) -> Parser<&'static str> {
    let label = format!("{literal:?}");
    Parser::new(move |text, offset| {
        if text
            .get(offset..)
            .is_some_and(|rest| rest.starts_with(literal))
        {
            Ok(Success {
                offset: offset + literal.len(),
                value: literal,
                hints: Hints::empty(),
            })
        } else {
            Err(Failure::expected(offset, label.as_str()))
        }
    })
}

/// Matches `pattern` starting exactly at the current offset.
///
/// Failures are labeled `/pattern/`.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression.
pub fn regex(pattern: &str) -> Parser<String> {
    let anchored = Regex::new(&format!("^(?:{pattern})"))
        .unwrap_or_else(|e| panic!("invalid token pattern {pattern:?}: {e}"));
    let label = format!("/{pattern}/");
    Parser::new(move |text, offset| {
        match text.get(offset..).and_then(|rest| anchored.find(rest)) {
            Some(m) => Ok(Success {
                offset: offset + m.end(),
                value: m.as_str().to_string(),
                hints: Hints::empty(),
            }),
            None => Err(Failure::expected(offset, label.as_str())),
        }
    })
}

/// Unsigned decimal literal with optional fraction and exponent.
pub fn number() -> Parser<f64> {
    regex(NUMBER_PATTERN)
        .filter_map(|digits| digits.parse::<f64>().ok())
        .label("number")
}

pub fn identifier() -> Parser<String> {
    regex(IDENTIFIER_PATTERN).label("identifier")
}

/// Zero or more whitespace characters; never fails.
pub fn whitespace() -> Parser<()> {
    regex(r"\s*").map(|_| ())
}

pub fn eof() -> Parser<()> {
    Parser::new(|text, offset| {
        if offset >= text.len() {
            Ok(Success {
                offset,
                value: (),
                hints: Hints::empty(),
            })
        } else {
            Err(Failure::expected(offset, END_OF_INPUT))
        }
    })
}

/// A literal followed by optional whitespace.
pub fn symbol(literal: &'static str) -> Parser<&'static str> {
    string(literal).lexeme()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::error::ParseError;

    #[test]
    fn string_matches_at_offset_only() {
        let p = string("pi");
        assert_eq!(p.parse_at("2pi", 1).unwrap().offset, 3);
        let failure = p.parse_at("2pi", 0).unwrap_err();
        let err = ParseError::from_hints(&failure.hints);
        assert_eq!(err.expected, vec!["\"pi\"".to_string()]);
        assert!(p.parse_at("p", 5).is_err());
    }

    #[test]
    fn regex_is_anchored() {
        let p = regex("[0-9]+");
        assert!(p.parse_at("a12", 0).is_err());
        let s = p.parse_at("a12b", 1).unwrap();
        assert_eq!((s.offset, s.value.as_str()), (3, "12"));
        let err = ParseError::from_hints(&p.parse_at("x", 0).unwrap_err().hints);
        assert_eq!(err.expected, vec!["/[0-9]+/".to_string()]);
    }

    #[test]
    fn number_accepts_fraction_and_exponent() {
        let p = number();
        assert_eq!(p.parse("42").unwrap(), 42.0);
        assert_eq!(p.parse("1.").unwrap(), 1.0);
        assert_eq!(p.parse("2.5e-3").unwrap(), 2.5e-3);
        assert_eq!(p.parse_at("3e", 0).unwrap().offset, 1);
        assert!(p.parse(".5").is_err());
        assert!(p.parse("-1").is_err());
    }

    #[test]
    fn identifier_uses_word_characters() {
        let p = identifier();
        assert_eq!(p.parse("sqrt_2").unwrap(), "sqrt_2");
        let err = p.parse("+").unwrap_err();
        assert_eq!(err.expected, vec!["identifier".to_string()]);
    }

    #[test]
    fn symbol_skips_trailing_whitespace() {
        let s = symbol("(").parse_at("(  \n1", 0).unwrap();
        assert_eq!(s.offset, 4);
    }

    #[test]
    fn eof_only_at_end() {
        assert!(eof().parse_at("ab", 2).is_ok());
        let err = ParseError::from_hints(&eof().parse_at("ab", 1).unwrap_err().hints);
        assert_eq!(err.to_string(), "ParseError: expected end of input at index 1");
    }
}
