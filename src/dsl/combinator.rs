//! Backtracking parser combinators.
//!
//! A [`Parser<T>`] is a shared, immutable function from `(text, offset)` to a
//! [`Reply<T>`]. Failures are ordinary values: `or`, `optional` and `many` branch on
//! the result instead of unwinding. Both outcomes carry a [`Hints`] tree so that an
//! alternative which succeeded can still report what a deeper failed branch wanted.

use std::sync::{Arc, OnceLock};

use crate::dsl::error::{ParseError, Span};
use crate::dsl::hints::Hints;
use crate::dsl::lexer;

#[derive(Debug, Clone)]
pub struct Success<T> {
    pub offset: usize,
    pub value: T,
    pub hints: Hints,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub hints: Hints,
}

impl Failure {
    pub fn expected(offset: usize, label: impl Into<Arc<str>>) -> Self {
        Self {
            hints: Hints::expected(offset, label),
        }
    }

    pub fn mark(offset: usize) -> Self {
        Self {
            hints: Hints::mark(offset),
        }
    }
}

pub type Reply<T> = Result<Success<T>, Failure>;

type ParseFn<T> = dyn Fn(&str, usize) -> Reply<T> + Send + Sync;

/// A cloneable parser. Cloning shares the underlying function.
pub struct Parser<T> {
    run: Arc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Parser")
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(run: impl Fn(&str, usize) -> Reply<T> + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(run) }
    }

    /// Always succeeds with a clone of `value`, consuming nothing.
    pub fn pure(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self::new(move |_, offset| {
            Ok(Success {
                offset,
                value: value.clone(),
                hints: Hints::empty(),
            })
        })
    }

    /// Runs the parser at `offset` without requiring it to consume everything.
    pub fn parse_at(&self, text: &str, offset: usize) -> Reply<T> {
        (self.run)(text, offset)
    }

    /// Runs the parser over the whole of `text`.
    ///
    /// Trailing input is reported as an expected end of input, merged with any
    /// deeper expectation the parser recorded on the way.
    pub fn parse(&self, text: &str) -> Result<T, ParseError> {
        let hints = match self.parse_at(text, 0) {
            Ok(success) if success.offset == text.len() => return Ok(success.value),
            Ok(success) => success
                .hints
                .join(&Hints::expected(success.offset, lexer::END_OF_INPUT)),
            Err(failure) => failure.hints,
        };
        Err(ParseError::from_hints(&hints))
    }

    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Parser<U> {
        Parser::new(move |text, offset| {
            self.parse_at(text, offset).map(|s| Success {
                offset: s.offset,
                value: f(s.value),
                hints: s.hints,
            })
        })
    }

    /// Monadic sequencing: the continuation picks the next parser from the value.
    pub fn bind<U: 'static>(
        self,
        f: impl Fn(T) -> Parser<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        Parser::new(move |text, offset| {
            let first = self.parse_at(text, offset)?;
            match f(first.value).parse_at(text, first.offset) {
                Ok(second) => Ok(Success {
                    offset: second.offset,
                    value: second.value,
                    hints: first.hints.join(&second.hints),
                }),
                Err(failure) => Err(Failure {
                    hints: first.hints.join(&failure.hints),
                }),
            }
        })
    }

    pub fn then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |text, offset| {
            let first = self.parse_at(text, offset)?;
            match other.parse_at(text, first.offset) {
                Ok(second) => Ok(Success {
                    offset: second.offset,
                    value: (first.value, second.value),
                    hints: first.hints.join(&second.hints),
                }),
                Err(failure) => Err(Failure {
                    hints: first.hints.join(&failure.hints),
                }),
            }
        })
    }

    pub fn then_ignore<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.then(other).map(|(value, _)| value)
    }

    pub fn ignore_then<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        self.then(other).map(|(_, value)| value)
    }

    /// Tries `self`, then `other` from the same offset.
    ///
    /// When both fail the deeper failure wins and equal depths are merged. When
    /// `other` succeeds it still carries the hints of the failed left branch.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |text, offset| {
            let left = match self.parse_at(text, offset) {
                Ok(success) => return Ok(success),
                Err(failure) => failure,
            };
            match other.parse_at(text, offset) {
                Ok(success) => Ok(Success {
                    hints: left.hints.join(&success.hints),
                    ..success
                }),
                Err(right) => Err(Failure {
                    hints: left.hints.deepest(&right.hints),
                }),
            }
        })
    }

    /// Rejects a syntactically valid match whose value fails `pred`.
    pub fn filter(self, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Parser<T> {
        Parser::new(move |text, offset| {
            let success = self.parse_at(text, offset)?;
            if pred(&success.value) {
                Ok(success)
            } else {
                Err(Failure {
                    hints: success.hints.join(&Hints::mark(offset)),
                })
            }
        })
    }

    /// `filter` and `map` in one step; `None` rejects the match.
    pub fn filter_map<U: 'static>(
        self,
        f: impl Fn(T) -> Option<U> + Send + Sync + 'static,
    ) -> Parser<U> {
        Parser::new(move |text, offset| {
            let success = self.parse_at(text, offset)?;
            match f(success.value) {
                Some(value) => Ok(Success {
                    offset: success.offset,
                    value,
                    hints: success.hints,
                }),
                None => Err(Failure {
                    hints: success.hints.join(&Hints::mark(offset)),
                }),
            }
        })
    }

    /// Replaces the failure hints with `name` at the furthest offset reached.
    pub fn label(self, name: &str) -> Parser<T> {
        let name: Arc<str> = Arc::from(name);
        Parser::new(move |text, offset| {
            self.parse_at(text, offset).map_err(|failure| {
                let at = failure.hints.furthest().unwrap_or(offset);
                Failure::expected(at, Arc::clone(&name))
            })
        })
    }

    /// Consumes trailing whitespace after a successful match.
    pub fn lexeme(self) -> Parser<T> {
        self.then_ignore(lexer::whitespace())
    }

    /// Pairs the value with the byte range it consumed.
    pub fn spanned(self) -> Parser<(T, Span)> {
        Parser::new(move |text, offset| {
            self.parse_at(text, offset).map(|s| Success {
                offset: s.offset,
                value: (s.value, Span::new(offset, s.offset)),
                hints: s.hints,
            })
        })
    }
}

/// Runs every parser in order, collecting their values.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::new(move |text, offset| {
        let mut at = offset;
        let mut hints = Hints::empty();
        let mut values = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            match parser.parse_at(text, at) {
                Ok(success) => {
                    at = success.offset;
                    hints = hints.join(&success.hints);
                    values.push(success.value);
                }
                Err(failure) => {
                    return Err(Failure {
                        hints: hints.join(&failure.hints),
                    });
                }
            }
        }
        Ok(Success {
            offset: at,
            value: values,
            hints,
        })
    })
}

/// Ordered alternatives, folded with [`Parser::or`].
///
/// # Panics
///
/// Panics when `parsers` is empty; an empty choice is a grammar construction bug.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    parsers
        .into_iter()
        .reduce(Parser::or)
        .expect("choice requires at least one alternative")
}

/// Zero or more repetitions.
///
/// Stops at the first failure or at a match that consumed nothing. The hints of
/// the stopping attempt are kept so that a deeper partial match still shows up
/// in the final error.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |text, offset| {
        let mut at = offset;
        let mut hints = Hints::empty();
        let mut values = Vec::new();
        loop {
            match parser.parse_at(text, at) {
                Ok(success) if success.offset > at => {
                    at = success.offset;
                    hints = hints.join(&success.hints);
                    values.push(success.value);
                }
                Ok(success) => {
                    hints = hints.join(&success.hints);
                    break;
                }
                Err(failure) => {
                    hints = hints.join(&failure.hints);
                    break;
                }
            }
        }
        Ok(Success {
            offset: at,
            value: values,
            hints,
        })
    })
}

pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new(move |text, offset| match parser.parse_at(text, offset) {
        Ok(success) => Ok(Success {
            offset: success.offset,
            value: Some(success.value),
            hints: success.hints,
        }),
        Err(failure) => Ok(Success {
            offset,
            value: None,
            hints: failure.hints,
        }),
    })
}

/// Negative lookahead. Never consumes input.
pub fn not<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::new(move |text, offset| match parser.parse_at(text, offset) {
        Ok(_) => Err(Failure::mark(offset)),
        Err(_) => Ok(Success {
            offset,
            value: (),
            hints: Hints::empty(),
        }),
    })
}

/// One or more `item`s separated by `separator`.
pub fn sep_by<T: 'static, S: 'static>(item: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>> {
    item.clone()
        .then(many(separator.ignore_then(item)))
        .map(|(first, rest)| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first);
            items.extend(rest);
            items
        })
}

/// Defers construction of a rule until it is first run.
///
/// The built parser is cached, so self-referential rules are constructed once.
pub fn forward<T: 'static>(build: impl Fn() -> Parser<T> + Send + Sync + 'static) -> Parser<T> {
    let cell: Arc<OnceLock<Parser<T>>> = Arc::new(OnceLock::new());
    Parser::new(move |text, offset| cell.get_or_init(&build).parse_at(text, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::lexer::{eof, number, regex, string, symbol};
    use std::sync::LazyLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn failure_at<T: std::fmt::Debug>(reply: Reply<T>) -> (usize, Vec<String>) {
        let hints = reply.expect_err("parser should fail").hints;
        let err = ParseError::from_hints(&hints);
        (err.offset, err.expected)
    }

    #[test]
    fn map_and_then_thread_offsets() {
        let p = string("ab").then(number()).map(|(_, n)| n * 2.0);
        let s = p.parse_at("ab21", 0).unwrap();
        assert_eq!(s.offset, 4);
        assert_eq!(s.value, 42.0);
    }

    #[test]
    fn or_prefers_the_deeper_failure() {
        let long = string("a").then(string("b")).map(|_| ());
        let short = string("x").map(|_| ());
        let (offset, expected) = failure_at(long.or(short).parse_at("ac", 0));
        assert_eq!(offset, 1);
        assert_eq!(expected, vec!["\"b\"".to_string()]);
    }

    #[test]
    fn or_unions_hints_on_equal_depth() {
        let p = string("a").or(string("b"));
        let (offset, expected) = failure_at(p.parse_at("c", 0));
        assert_eq!(offset, 0);
        assert_eq!(expected, vec!["\"a\"".to_string(), "\"b\"".to_string()]);
    }

    #[test]
    fn sequence_keeps_hints_from_earlier_steps() {
        let p = sequence(vec![
            many(string("a")).map(|v| v.len()),
            string("b").map(|_| 0),
        ]);
        let (offset, expected) = failure_at(p.parse_at("aac", 0));
        assert_eq!(offset, 2);
        assert_eq!(expected, vec!["\"a\"".to_string(), "\"b\"".to_string()]);
    }

    #[test]
    fn many_stops_without_progress() {
        let p = many(regex("x*"));
        let s = p.parse_at("xxy", 0).unwrap();
        assert_eq!(s.offset, 2);
        assert_eq!(s.value, vec!["xx".to_string()]);
    }

    #[test]
    fn many_handles_long_inputs_iteratively() {
        let text = "a".repeat(50_000);
        let s = many(string("a")).parse_at(&text, 0).unwrap();
        assert_eq!(s.value.len(), 50_000);
    }

    #[test]
    fn optional_and_not_consume_nothing_on_failure() {
        let s = optional(string("a")).parse_at("b", 0).unwrap();
        assert_eq!((s.offset, s.value), (0, None));

        let s = not(string("a")).parse_at("b", 0).unwrap();
        assert_eq!(s.offset, 0);
        let (offset, expected) = failure_at(not(string("b")).parse_at("b", 0));
        assert_eq!(offset, 0);
        assert!(expected.is_empty());
    }

    #[test]
    fn filter_rejects_with_an_unlabeled_mark() {
        let even = number().filter(|n| *n as i64 % 2 == 0);
        assert!(even.parse_at("4", 0).is_ok());
        let (offset, expected) = failure_at(even.parse_at("3", 0));
        assert_eq!(offset, 0);
        assert!(expected.is_empty());
    }

    #[test]
    fn label_renames_failures_only() {
        let p = regex("[a-z]+").label("word");
        assert_eq!(p.parse_at("abc", 0).unwrap().offset, 3);
        let (offset, expected) = failure_at(p.parse_at("123", 0));
        assert_eq!(offset, 0);
        assert_eq!(expected, vec!["word".to_string()]);
    }

    #[test]
    fn bind_chooses_the_continuation_from_the_value() {
        let p = regex("[ab]").bind(|tag| {
            if tag == "a" {
                number().map(|n| n as i64)
            } else {
                string("!").map(|_| -1)
            }
        });
        assert_eq!(p.parse_at("a12", 0).unwrap().value, 12);
        assert_eq!(p.parse_at("b!", 0).unwrap().value, -1);
        assert!(p.parse_at("b1", 0).is_err());
    }

    #[test]
    fn sep_by_requires_one_item() {
        let p = sep_by(number(), symbol(","));
        assert_eq!(p.parse_at("1, 2, 3", 0).unwrap().value, vec![1.0, 2.0, 3.0]);
        assert!(p.parse_at("", 0).is_err());
        let s = p.parse_at("1,", 0).unwrap();
        assert_eq!(s.offset, 1);
    }

    #[test]
    fn spanned_reports_consumed_range() {
        let p = string("[").ignore_then(number().lexeme().spanned());
        let s = p.parse_at("[12  ]", 0).unwrap();
        assert_eq!(s.value.1, Span::new(1, 5));
    }

    #[test]
    fn parse_requires_end_of_input() {
        let p = number();
        assert_eq!(p.parse("7").unwrap(), 7.0);
        let err = p.parse("7x").unwrap_err();
        assert_eq!(err.offset, 1);
        assert_eq!(err.expected, vec!["end of input".to_string()]);
        assert!(number().then_ignore(eof()).parse("7").is_ok());
    }

    #[test]
    fn forward_builds_once_and_supports_recursion() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);
        static NESTED: LazyLock<Parser<usize>> = LazyLock::new(|| {
            let inner = forward(|| {
                BUILDS.fetch_add(1, Ordering::SeqCst);
                NESTED.clone()
            });
            string("(")
                .ignore_then(inner)
                .then_ignore(string(")"))
                .map(|depth| depth + 1)
                .or(Parser::pure(0))
        });

        assert_eq!(NESTED.parse("((()))").unwrap(), 3);
        assert_eq!(NESTED.parse("()").unwrap(), 1);
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }
}
