//! String constant resolution.

use sift_core::{BinaryOp, LiteralKind, Node, NodeId, SourceFile};

use crate::symbols::SymbolTable;

use super::MAX_IDENTIFIER_RESOLUTION;

/// Stands in for every sub-expression that does not fold to a string.
pub const PLACEHOLDER: &str = "_?_";

/// Fully resolve `expr` to a compile-time string, or `None` if any part
/// of it is unknown.
pub fn resolve_as_string_constant(
    file: &SourceFile,
    symbols: &SymbolTable,
    expr: Option<NodeId>,
) -> Option<String> {
    let resolved = resolve(file, symbols, expr, MAX_IDENTIFIER_RESOLUTION);
    if resolved.contains(PLACEHOLDER) {
        None
    } else {
        Some(resolved)
    }
}

/// Whether `expr` folds to a known string.
pub fn is_constant_string(file: &SourceFile, symbols: &SymbolTable, expr: NodeId) -> bool {
    resolve_as_string_constant(file, symbols, Some(expr)).is_some()
}

/// Resolve as much of `expr` as possible; unknown parts appear as
/// [`PLACEHOLDER`]. Useful for reporting, e.g. `"SELECT " + table` becomes
/// `"SELECT _?_"`.
pub fn resolve_as_partial_string_constant(
    file: &SourceFile,
    symbols: &SymbolTable,
    expr: Option<NodeId>,
) -> String {
    resolve(file, symbols, expr, MAX_IDENTIFIER_RESOLUTION)
}

fn resolve(
    file: &SourceFile,
    symbols: &SymbolTable,
    expr: Option<NodeId>,
    budget: u32,
) -> String {
    let Some(expr) = expr else {
        return PLACEHOLDER.to_string();
    };
    if budget == 0 {
        return PLACEHOLDER.to_string();
    }
    match file.node(expr) {
        Node::Literal(lit) if lit.kind == LiteralKind::String => lit.value.clone(),
        Node::Binary { op: BinaryOp::Plus, left, right } => {
            let mut out = resolve(file, symbols, Some(*left), budget);
            out.push_str(&resolve(file, symbols, Some(*right), budget));
            out
        }
        Node::Parenthesized { expression } => resolve(file, symbols, Some(*expression), budget),
        Node::Identifier(ident) => {
            let value = symbols.symbol_of(ident).and_then(|s| s.safe_value());
            match value {
                Some(value) => resolve(file, symbols, Some(value), budget - 1),
                None => PLACEHOLDER.to_string(),
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}
