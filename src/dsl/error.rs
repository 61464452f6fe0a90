//! Parse errors with offset-based diagnostics.

use std::fmt;

use crate::dsl::hints::Hints;

/// Byte range of consumed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The covered text with surrounding whitespace removed.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start..self.end)
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// What the parser expected at the furthest offset it reached.
///
/// `Display` renders `ParseError: expected {labels} at index {offset}`; two labels
/// are joined with "or", longer lists with commas and a final "or".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    pub expected: Vec<String>,
}

impl ParseError {
    pub fn new(offset: usize, expected: Vec<String>) -> Self {
        Self { offset, expected }
    }

    /// Reduces a hint tree to the distinct labels at its maximum offset.
    pub fn from_hints(hints: &Hints) -> Self {
        match hints.furthest() {
            Some(offset) => Self {
                offset,
                expected: hints.expected_at(offset),
            },
            None => Self::new(0, Vec::new()),
        }
    }

    /// The message without the `ParseError:` prefix.
    pub fn message(&self) -> String {
        if self.expected.is_empty() {
            format!("unexpected input at index {}", self.offset)
        } else {
            format!(
                "expected {} at index {}",
                join_alternatives(&self.expected),
                self.offset
            )
        }
    }

    /// 1-based line and column of the error offset within `source`.
    pub fn location(&self, source: &str) -> (usize, usize) {
        let offset = self.offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.chars().filter(|&c| c == '\n').count() + 1;
        let col = before.rfind('\n').map_or(offset, |nl| offset - nl - 1) + 1;
        (line, col)
    }
}

fn join_alternatives(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.message())
    }
}

impl std::error::Error for ParseError {}
