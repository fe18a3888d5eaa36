//! Static receiver-type tracing.
//!
//! Derives the declared type a receiver expression must have, following
//! local variable types and the single declared return type of functions
//! indexed from the file, one member-select hop at a time. A function with
//! more than one return value disqualifies further chaining off its
//! result; so does any shape the tracer does not understand.

use sift_core::ast::utils::skip_parentheses;
use sift_core::{FxHashMap, Node, NodeId, SourceFile};

use crate::folding::MAX_IDENTIFIER_RESOLUTION;
use crate::symbols::SymbolTable;

#[derive(Debug, Clone)]
struct FunctionSig {
    receiver_type: Option<String>,
    return_types: Vec<String>,
}

/// Index of the file's top-level function and method declarations,
/// keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FunctionIndex {
    by_name: FxHashMap<String, Vec<FunctionSig>>,
}

impl FunctionIndex {
    pub fn new(file: &SourceFile) -> Self {
        let mut index = Self::default();
        for &decl in file.declarations() {
            let Node::FunctionDeclaration { name: Some(name), receiver, return_types, .. } =
                file.node(decl)
            else {
                continue;
            };
            let Some(name) = file.ident(*name) else {
                continue;
            };
            let receiver_type = receiver.as_ref().and_then(|&r| match file.node(r) {
                Node::Parameter { declared_type, .. } => declared_type.clone(),
                _ => None,
            });
            index
                .by_name
                .entry(name.name.clone())
                .or_default()
                .push(FunctionSig {
                    receiver_type,
                    return_types: return_types.clone(),
                });
        }
        index
    }

    /// The single return type of the free function `name`, when the file
    /// declares exactly one such function with exactly one result.
    fn free_function_return(&self, name: &str) -> Option<&str> {
        self.single_return(name, |sig| sig.receiver_type.is_none())
    }

    /// The single return type of the method `name` on `receiver_type`,
    /// matched pointer-insensitively.
    fn method_return(&self, name: &str, receiver_type: &str) -> Option<&str> {
        let wanted = base_type(receiver_type);
        self.single_return(name, |sig| {
            sig.receiver_type
                .as_deref()
                .is_some_and(|r| base_type(r) == wanted)
        })
    }

    fn single_return(&self, name: &str, accept: impl Fn(&FunctionSig) -> bool) -> Option<&str> {
        let mut candidates = self
            .by_name
            .get(name)?
            .iter()
            .filter(|sig| accept(sig));
        match (candidates.next(), candidates.next()) {
            (Some(sig), None) if sig.return_types.len() == 1 => {
                Some(sig.return_types[0].as_str())
            }
            _ => None,
        }
    }
}

/// Strip pointer/reference sigils from a type spelling.
pub(super) fn base_type(spelling: &str) -> &str {
    spelling.trim_start_matches(['*', '&'])
}

/// Statically trace the declared type of `expr`, as spelled in source
/// (e.g. `*rand.Rand`).
pub fn trace_static_type(
    file: &SourceFile,
    symbols: &SymbolTable,
    functions: &FunctionIndex,
    expr: NodeId,
) -> Option<String> {
    trace(file, symbols, functions, expr, MAX_IDENTIFIER_RESOLUTION)
}

fn trace(
    file: &SourceFile,
    symbols: &SymbolTable,
    functions: &FunctionIndex,
    expr: NodeId,
    budget: u32,
) -> Option<String> {
    if budget == 0 {
        return None;
    }
    let expr = skip_parentheses(file, expr);
    match file.node(expr) {
        Node::Identifier(ident) => {
            if let Some(hint) = &ident.type_hint {
                return Some(hint.clone());
            }
            let symbol = symbols.symbol_of(ident)?;
            if let Some(declared) = &symbol.declared_type {
                return Some(declared.clone());
            }
            let value = symbol.safe_value()?;
            trace(file, symbols, functions, value, budget - 1)
        }
        Node::FunctionInvocation { callee, .. } => {
            let callee = skip_parentheses(file, *callee);
            match file.node(callee) {
                Node::Identifier(ident) => functions
                    .free_function_return(&ident.name)
                    .map(str::to_string),
                Node::MemberSelect { expression, member } => {
                    let member = file.ident(*member)?;
                    let receiver = trace(file, symbols, functions, *expression, budget - 1)?;
                    functions
                        .method_return(&member.name, &receiver)
                        .map(str::to_string)
                }
                _ => None,
            }
        }
        _ => None,
    }
}
