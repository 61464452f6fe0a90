//! Operator-precedence helpers.
//!
//! Each helper wraps an operand parser into the next looser precedence level. The
//! operator parser yields a value (usually a function enum) that `apply` combines
//! with the operands.

use crate::dsl::combinator::{Parser, many, optional};

/// Zero or more prefix operators, applied innermost first.
pub fn prefix<T: 'static, Op: 'static>(
    operand: Parser<T>,
    op: Parser<Op>,
    apply: impl Fn(Op, T) -> T + Send + Sync + 'static,
) -> Parser<T> {
    many(op)
        .then(operand)
        .map(move |(ops, value)| ops.into_iter().rev().fold(value, |acc, op| apply(op, acc)))
}

/// Zero or more postfix operators, applied left to right.
pub fn postfix<T: 'static, Op: 'static>(
    operand: Parser<T>,
    op: Parser<Op>,
    apply: impl Fn(T, Op) -> T + Send + Sync + 'static,
) -> Parser<T> {
    operand
        .then(many(op))
        .map(move |(value, ops)| ops.into_iter().fold(value, &apply))
}

/// Left-associative chain of binary operators.
pub fn infixl<T: 'static, Op: 'static>(
    operand: Parser<T>,
    op: Parser<Op>,
    apply: impl Fn(Op, T, T) -> T + Send + Sync + 'static,
) -> Parser<T> {
    operand
        .clone()
        .then(many(op.then(operand)))
        .map(move |(first, rest)| {
            rest.into_iter()
                .fold(first, |acc, (op, rhs)| apply(op, acc, rhs))
        })
}

/// At most one binary application.
pub fn infixn<T: 'static, Op: 'static>(
    operand: Parser<T>,
    op: Parser<Op>,
    apply: impl Fn(Op, T, T) -> T + Send + Sync + 'static,
) -> Parser<T> {
    operand
        .clone()
        .then(optional(op.then(operand)))
        .map(move |(lhs, tail)| match tail {
            Some((op, rhs)) => apply(op, lhs, rhs),
            None => lhs,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::lexer::{number, symbol};

    fn int() -> Parser<i64> {
        number().map(|n| n as i64).lexeme()
    }

    #[test]
    fn infixl_folds_left() {
        let p = infixl(int(), symbol("-"), |_, a, b| a - b);
        assert_eq!(p.parse("10 - 3 - 2").unwrap(), 5);
    }

    #[test]
    fn infixn_rejects_chains() {
        let p = infixn(int(), symbol("<"), |_, a, b| i64::from(a < b));
        assert_eq!(p.parse("1 < 2").unwrap(), 1);
        let err = p.parse("1 < 2 < 3").unwrap_err();
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn prefix_applies_innermost_first() {
        let ops = symbol("-").map(|_| -1).or(symbol("~").map(|_| 0));
        let p = prefix(int(), ops, |op, x| if op == 0 { x + 100 } else { -x });
        assert_eq!(p.parse("- ~ 1").unwrap(), -101);
        assert_eq!(p.parse("~ - 1").unwrap(), 99);
    }

    #[test]
    fn postfix_applies_left_to_right() {
        let p = postfix(int(), symbol("!").map(|_| ()), |x, _| x * 2 + 1);
        assert_eq!(p.parse("1!!").unwrap(), 7);
    }
}
