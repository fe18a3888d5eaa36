//! Integer constant evaluation.

use sift_core::{BinaryOp, LiteralKind, Node, NodeId, SourceFile, UnaryOp};

use crate::symbols::SymbolTable;

use super::MAX_IDENTIFIER_RESOLUTION;

/// Evaluate `expr` to an `i64`, or `None` when it is not a compile-time
/// integer. Overflow and division by zero yield `None` rather than a
/// wrong value; division truncates toward zero.
pub fn evaluate_arithmetic_expression(
    file: &SourceFile,
    symbols: &SymbolTable,
    expr: NodeId,
) -> Option<i64> {
    evaluate(file, symbols, expr, MAX_IDENTIFIER_RESOLUTION)
}

fn evaluate(
    file: &SourceFile,
    symbols: &SymbolTable,
    expr: NodeId,
    budget: u32,
) -> Option<i64> {
    if budget == 0 {
        return None;
    }
    match file.node(expr) {
        Node::Literal(lit) if lit.kind == LiteralKind::Integer => parse_integer(&lit.value),
        Node::Parenthesized { expression } => evaluate(file, symbols, *expression, budget),
        Node::Unary { op: UnaryOp::Minus, operand } => {
            evaluate(file, symbols, *operand, budget)?.checked_neg()
        }
        Node::Binary { op, left, right } => {
            let l = evaluate(file, symbols, *left, budget)?;
            let r = evaluate(file, symbols, *right, budget)?;
            match op {
                BinaryOp::Plus => l.checked_add(r),
                BinaryOp::Minus => l.checked_sub(r),
                BinaryOp::Times => l.checked_mul(r),
                BinaryOp::Divide => {
                    if r == 0 {
                        None
                    } else {
                        l.checked_div(r)
                    }
                }
                _ => None,
            }
        }
        Node::Identifier(ident) => {
            let value = symbols.symbol_of(ident).and_then(|s| s.safe_value())?;
            evaluate(file, symbols, value, budget - 1)
        }
        _ => None,
    }
}

/// Parse an integer literal as spelled in source: `0x`/`0o`/`0b` prefixes,
/// legacy leading-zero octal, and `_` digit separators.
fn parse_integer(raw: &str) -> Option<i64> {
    let text: String = raw.chars().filter(|&c| c != '_').collect();
    let (digits, radix) = match text.as_bytes() {
        [b'0', b'x' | b'X', ..] => (&text[2..], 16),
        [b'0', b'o' | b'O', ..] => (&text[2..], 8),
        [b'0', b'b' | b'B', ..] => (&text[2..], 2),
        [b'0', rest @ ..] if !rest.is_empty() => (&text[1..], 8),
        _ => (text.as_str(), 10),
    };
    i64::from_str_radix(digits, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_radix() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("0x2A"), Some(42));
        assert_eq!(parse_integer("0o52"), Some(42));
        assert_eq!(parse_integer("052"), Some(42));
        assert_eq!(parse_integer("0b101010"), Some(42));
        assert_eq!(parse_integer("1_000"), Some(1000));
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("nope"), None);
    }
}
