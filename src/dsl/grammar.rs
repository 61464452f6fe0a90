//! The calculator grammar.
//!
//! Expressions evaluate to a [`Complex`] while they are parsed; there is no AST.
//!
//! Precedence, tightest first:
//!
//! | level | syntax                        | associativity |
//! |-------|-------------------------------|---------------|
//! | 1     | juxtaposition (`2pi i`)       | left          |
//! | 2     | prefix `+` / `-`              | right         |
//! | 3     | `^`                           | left          |
//! | 4     | `*`, `/`, `%`                 | left          |
//! | 5     | `+`, `-`                      | left          |
//!
//! Terms are number literals, the constants `i`, `j`, `e` and `pi`, calls of the
//! one- and two-argument functions below, and parenthesised expressions.

use std::f64::consts::{E, PI};
use std::sync::LazyLock;

use crate::dsl::combinator::{Parser, choice, forward};
use crate::dsl::error::ParseError;
use crate::dsl::expr::{infixl, postfix, prefix};
use crate::dsl::lexer::{identifier, number, regex, symbol, whitespace};
use crate::math::Complex;

/// One-argument functions. `+` and `-` double as the sign prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFn {
    Identity,
    Negate,
    Abs,
    Angle,
    Conj,
    Real,
    Imag,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Ln,
    Exp,
    Sqrt,
}

impl UnaryFn {
    pub const ALL: [UnaryFn; 16] = [
        UnaryFn::Identity,
        UnaryFn::Negate,
        UnaryFn::Abs,
        UnaryFn::Angle,
        UnaryFn::Conj,
        UnaryFn::Real,
        UnaryFn::Imag,
        UnaryFn::Sin,
        UnaryFn::Cos,
        UnaryFn::Tan,
        UnaryFn::Asin,
        UnaryFn::Acos,
        UnaryFn::Atan,
        UnaryFn::Ln,
        UnaryFn::Exp,
        UnaryFn::Sqrt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnaryFn::Identity => "+",
            UnaryFn::Negate => "-",
            UnaryFn::Abs => "abs",
            UnaryFn::Angle => "angle",
            UnaryFn::Conj => "conj",
            UnaryFn::Real => "real",
            UnaryFn::Imag => "imag",
            UnaryFn::Sin => "sin",
            UnaryFn::Cos => "cos",
            UnaryFn::Tan => "tan",
            UnaryFn::Asin => "asin",
            UnaryFn::Acos => "acos",
            UnaryFn::Atan => "atan",
            UnaryFn::Ln => "ln",
            UnaryFn::Exp => "exp",
            UnaryFn::Sqrt => "sqrt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn apply(self, x: Complex) -> Complex {
        match self {
            UnaryFn::Identity => x,
            UnaryFn::Negate => -x,
            UnaryFn::Abs => x.abs(),
            UnaryFn::Angle => x.angle(),
            UnaryFn::Conj => x.conj(),
            UnaryFn::Real => x.real_part(),
            UnaryFn::Imag => x.imag_part(),
            UnaryFn::Sin => x.sin(),
            UnaryFn::Cos => x.cos(),
            UnaryFn::Tan => x.tan(),
            UnaryFn::Asin => x.asin(),
            UnaryFn::Acos => x.acos(),
            UnaryFn::Atan => x.atan(),
            UnaryFn::Ln => x.ln(),
            UnaryFn::Exp => x.exp(),
            UnaryFn::Sqrt => x.sqrt(),
        }
    }
}

/// Two-argument functions, reachable both as operators and by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFn {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryFn {
    pub const ALL: [BinaryFn; 6] = [
        BinaryFn::Add,
        BinaryFn::Sub,
        BinaryFn::Mul,
        BinaryFn::Div,
        BinaryFn::Mod,
        BinaryFn::Pow,
    ];

    /// Operator token; multiplication also has the empty token (juxtaposition).
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryFn::Add => "+",
            BinaryFn::Sub => "-",
            BinaryFn::Mul => "*",
            BinaryFn::Div => "/",
            BinaryFn::Mod => "%",
            BinaryFn::Pow => "^",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinaryFn::Add => "add",
            BinaryFn::Sub => "sub",
            BinaryFn::Mul => "mul",
            BinaryFn::Div => "div",
            BinaryFn::Mod => "mod",
            BinaryFn::Pow => "pow",
        }
    }

    /// Looks up either the word or the operator token.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(BinaryFn::Mul);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name || f.symbol() == name)
    }

    pub fn apply(self, x: Complex, y: Complex) -> Complex {
        match self {
            BinaryFn::Add => x + y,
            BinaryFn::Sub => x - y,
            BinaryFn::Mul => x * y,
            BinaryFn::Div => x / y,
            BinaryFn::Mod => x % y,
            BinaryFn::Pow => x.pow(y),
        }
    }
}

/// Named constants: `i` and `j` are the imaginary unit.
pub fn constant(name: &str) -> Option<Complex> {
    match name {
        "i" | "j" => Some(Complex::I),
        "e" => Some(Complex::from_real(E)),
        "pi" => Some(Complex::from_real(PI)),
        _ => None,
    }
}

static EXPRESSION: LazyLock<Parser<Complex>> = LazyLock::new(build_expression);

static CALCULATOR: LazyLock<Parser<Complex>> =
    LazyLock::new(|| whitespace().ignore_then(expression()));

/// The full expression rule. Usable inside larger grammars; does not skip
/// leading whitespace.
pub fn expression() -> Parser<Complex> {
    forward(|| EXPRESSION.clone())
}

/// Evaluates `text` as a complex expression.
///
/// ```rust
/// use polezero::dsl::calculate;
///
/// let z = calculate("2+3*4").unwrap();
/// assert_eq!(z.real, 14.0);
///
/// let err = calculate("2+").unwrap_err();
/// assert_eq!(err.offset, 2);
/// ```
pub fn calculate(text: &str) -> Result<Complex, ParseError> {
    CALCULATOR.parse(text)
}

fn term() -> Parser<Complex> {
    let literal = number().lexeme().map(Complex::from_real);

    let named_constant = identifier()
        .filter_map(|name| constant(&name))
        .label("constant")
        .lexeme();

    let unary_call = identifier()
        .filter_map(|name| UnaryFn::from_name(&name))
        .label("function")
        .lexeme()
        .then_ignore(symbol("("))
        .then(expression())
        .then_ignore(symbol(")"))
        .map(|(f, x)| f.apply(x));

    let binary_call = identifier()
        .filter_map(|name| BinaryFn::from_name(&name))
        .label("function")
        .lexeme()
        .then_ignore(symbol("("))
        .then(expression())
        .then_ignore(symbol(","))
        .then(expression())
        .then_ignore(symbol(")"))
        .map(|((f, x), y)| f.apply(x, y));

    let parenthesised = symbol("(")
        .ignore_then(expression())
        .then_ignore(symbol(")"));

    choice(vec![literal, named_constant, unary_call, binary_call, parenthesised])
}

fn operator(pattern: &str) -> Parser<BinaryFn> {
    regex(pattern)
        .filter_map(|token| BinaryFn::from_name(&token))
        .label("operator")
        .lexeme()
}

fn build_expression() -> Parser<Complex> {
    let term = term();
    let juxtaposed = postfix(term.clone(), term, |x, y| BinaryFn::Mul.apply(x, y));

    let sign = regex("[+-]")
        .filter_map(|token| UnaryFn::from_name(&token))
        .label("sign")
        .lexeme();
    let signed = prefix(juxtaposed, sign, UnaryFn::apply);

    let power = infixl(signed, operator(r"\^"), BinaryFn::apply);
    let product = infixl(power, operator("[*/%]"), BinaryFn::apply);
    infixl(product, operator("[+-]"), BinaryFn::apply)
}
