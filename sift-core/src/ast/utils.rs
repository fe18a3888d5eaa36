//! Tree utilities shared by the binder, the folder, and the matchers.

use smallvec::SmallVec;

use crate::types::identifiers::NodeId;

use super::arena::SourceFile;
use super::{LiteralKind, Node};

/// Dotted rendering of an identifier / member-select chain.
/// `a` → `"a"`, `a.b.c` → `"a.b.c"`; anything else renders empty.
pub fn tree_to_string(file: &SourceFile, id: NodeId) -> String {
    match file.node(id) {
        Node::Identifier(ident) => ident.name.clone(),
        Node::MemberSelect { expression, member } => {
            let head = tree_to_string(file, *expression);
            match file.ident(*member) {
                Some(m) if !head.is_empty() => format!("{}.{}", head, m.name),
                Some(m) => m.name.clone(),
                None => head,
            }
        }
        Node::Unary { operand, .. } => tree_to_string(file, *operand),
        _ => String::new(),
    }
}

/// Strip any number of surrounding parentheses.
pub fn skip_parentheses(file: &SourceFile, id: NodeId) -> NodeId {
    let mut current = id;
    while let Node::Parenthesized { expression } = file.node(current) {
        current = *expression;
    }
    current
}

/// First identifier of a chain, piercing member selects and invocations:
/// `a.b` → `a`, `a.b().c` → `a`, `5` → `None`.
pub fn first_identifier(file: &SourceFile, id: NodeId) -> Option<NodeId> {
    match file.node(id) {
        Node::Identifier(_) => Some(id),
        Node::MemberSelect { expression, .. } => first_identifier(file, *expression),
        Node::FunctionInvocation { callee, .. } => first_identifier(file, *callee),
        _ => None,
    }
}

/// Last identifier of a chain: `a.b` → `b`, `a` → `a`.
pub fn last_identifier(file: &SourceFile, id: NodeId) -> Option<NodeId> {
    match file.node(id) {
        Node::Identifier(_) => Some(id),
        Node::MemberSelect { member, .. } => Some(*member),
        _ => None,
    }
}

/// A pure identifier / member-select chain, head first: `a.b.c` →
/// `[a, b, c]`. Any other shape in the chain (a call, an index
/// expression) yields `None`.
pub fn identifier_chain(file: &SourceFile, expr: NodeId) -> Option<SmallVec<[NodeId; 4]>> {
    match file.node(expr) {
        Node::Identifier(_) => Some(SmallVec::from_slice(&[expr])),
        Node::MemberSelect { expression, member } => {
            let mut chain = identifier_chain(file, *expression)?;
            chain.push(*member);
            Some(chain)
        }
        _ => None,
    }
}

/// Name of an identifier node, if it is one.
pub fn identifier_name(file: &SourceFile, id: NodeId) -> Option<&str> {
    file.ident(id).map(|i| i.name.as_str())
}

pub fn is_boolean_literal(file: &SourceFile, id: NodeId) -> bool {
    matches!(
        file.node(id),
        Node::Literal(lit) if lit.kind == LiteralKind::Boolean
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::TreeBuilder;

    #[test]
    fn renders_member_select_chains() {
        let mut b = TreeBuilder::new();
        let chain = b.member_chain(&["a", "b", "c"]);
        let lit = b.int_literal("5");
        let file = b.build(vec![], vec![chain, lit]);

        assert_eq!(tree_to_string(&file, chain), "a.b.c");
        assert_eq!(tree_to_string(&file, lit), "");
    }

    #[test]
    fn pierces_invocations_for_first_identifier() {
        let mut b = TreeBuilder::new();
        let head = b.member_chain(&["a", "b"]);
        let call = b.call(head, vec![]);
        let outer = b.member(call, "c");
        let file = b.build(vec![], vec![outer]);

        let first = first_identifier(&file, outer).unwrap();
        assert_eq!(identifier_name(&file, first), Some("a"));
    }

    #[test]
    fn chain_and_last_identifier_follow_member_selects() {
        let mut b = TreeBuilder::new();
        let chain = b.member_chain(&["a", "b"]);
        let yes = b.bool_literal(true);
        let file = b.build(vec![], vec![chain, yes]);

        let ids = identifier_chain(&file, chain).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(identifier_name(&file, ids[0]), Some("a"));

        let last = last_identifier(&file, chain).unwrap();
        assert_eq!(identifier_name(&file, last), Some("b"));

        assert!(is_boolean_literal(&file, yes));
        assert!(!is_boolean_literal(&file, chain));
        assert!(identifier_chain(&file, yes).is_none());
    }

    #[test]
    fn skips_nested_parentheses() {
        let mut b = TreeBuilder::new();
        let lit = b.string_literal("x");
        let inner = b.paren(lit);
        let outer = b.paren(inner);
        let file = b.build(vec![], vec![outer]);

        assert_eq!(skip_parentheses(&file, outer), lit);
    }
}
