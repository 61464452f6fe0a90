//! Bulk root lists: `label = [ expr, expr, ... ]`, one list per line or `;`.
//!
//! ```text
//! zeros = [ 1, -1 ]
//! poles = [ 0.9*e^(pi/4*i), 0.5 ]; gain = [ 2 ]
//! ```

use std::fmt;
use std::sync::LazyLock;

use crate::core::types::Root;
use crate::dsl::combinator::{Parser, many, optional, sep_by};
use crate::dsl::error::{ParseError, Span};
use crate::dsl::grammar::expression;
use crate::dsl::lexer::{identifier, regex, string, symbol, whitespace};
use crate::math::Complex;

/// One `label = [ ... ]` line.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportEntry {
    pub label: String,
    pub roots: Vec<Root>,
}

impl fmt::Display for ImportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.roots.is_empty() {
            return write!(f, "{} = []", self.label);
        }
        let slots: Vec<&str> = self.roots.iter().map(|root| root.repr.as_str()).collect();
        write!(f, "{} = [ {} ]", self.label, slots.join(", "))
    }
}

type Slot = (Complex, Span);

static IMPORT: LazyLock<Parser<Vec<(String, Vec<Slot>)>>> = LazyLock::new(|| {
    let inline = || regex(r"[ \t\r]*");
    let separator = regex(r"[;\n]\s*").label("separator");

    let slots = optional(sep_by(expression().spanned(), symbol(",")))
        .map(Option::unwrap_or_default);
    let entry = identifier()
        .then_ignore(inline())
        .then_ignore(string("="))
        .then_ignore(inline())
        .then_ignore(symbol("["))
        .then(slots)
        .then_ignore(string("]"))
        .then_ignore(inline());

    whitespace()
        .ignore_then(optional(sep_by(entry, separator.clone())))
        .then_ignore(many(separator))
        .map(Option::unwrap_or_default)
});

/// Parses import text into labelled root lists.
///
/// Each slot keeps its trimmed source text as the root's `repr`. Labels are
/// not interpreted here.
pub fn parse_import(text: &str) -> Result<Vec<ImportEntry>, ParseError> {
    let entries = IMPORT.parse(text)?;
    Ok(entries
        .into_iter()
        .map(|(label, slots)| ImportEntry {
            label,
            roots: slots
                .into_iter()
                .map(|(value, span)| Root::new(span.slice(text), value))
                .collect(),
        })
        .collect())
}
