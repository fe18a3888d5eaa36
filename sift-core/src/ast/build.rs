//! Tree construction API.
//!
//! The external parser adapter (and the test suites) allocate nodes through
//! a `TreeBuilder` and finish the file with `build()`. Ids handed out by a
//! builder are only meaningful for the `SourceFile` it produces.

use std::cell::Cell;

use crate::types::identifiers::NodeId;

use super::arena::SourceFile;
use super::{BinaryOp, Ident, ImportDecl, Literal, LiteralKind, Node, UnaryOp};

#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    // ---- Leaves ----

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.push(Node::Identifier(Ident::new(name)))
    }

    pub fn typed_ident(&mut self, name: &str, type_hint: &str) -> NodeId {
        self.push(Node::Identifier(Ident {
            name: name.to_string(),
            type_hint: Some(type_hint.to_string()),
            package: None,
            symbol: Cell::new(None),
        }))
    }

    pub fn package_ident(&mut self, name: &str, package: &str) -> NodeId {
        self.push(Node::Identifier(Ident {
            name: name.to_string(),
            type_hint: None,
            package: Some(package.to_string()),
            symbol: Cell::new(None),
        }))
    }

    pub fn string_literal(&mut self, content: &str) -> NodeId {
        self.literal(LiteralKind::String, content)
    }

    pub fn int_literal(&mut self, raw: &str) -> NodeId {
        self.literal(LiteralKind::Integer, raw)
    }

    pub fn bool_literal(&mut self, value: bool) -> NodeId {
        self.literal(LiteralKind::Boolean, if value { "true" } else { "false" })
    }

    pub fn float_literal(&mut self, raw: &str) -> NodeId {
        self.literal(LiteralKind::Float, raw)
    }

    pub fn nil_literal(&mut self) -> NodeId {
        self.literal(LiteralKind::Nil, "nil")
    }

    pub fn literal(&mut self, kind: LiteralKind, value: &str) -> NodeId {
        self.push(Node::Literal(Literal { kind, value: value.to_string() }))
    }

    // ---- Expressions ----

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node::Binary { op, left, right })
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.push(Node::Unary { op, operand })
    }

    pub fn paren(&mut self, expression: NodeId) -> NodeId {
        self.push(Node::Parenthesized { expression })
    }

    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        self.push(Node::FunctionInvocation { callee, arguments })
    }

    /// `expression.member` — allocates the member identifier.
    pub fn member(&mut self, expression: NodeId, member: &str) -> NodeId {
        let member = self.ident(member);
        self.push(Node::MemberSelect { expression, member })
    }

    /// Dotted chain `a.b.c` from plain identifier names.
    pub fn member_chain(&mut self, names: &[&str]) -> NodeId {
        debug_assert!(!names.is_empty());
        let mut node = self.ident(names[0]);
        for name in &names[1..] {
            node = self.member(node, name);
        }
        node
    }

    // ---- Statements ----

    pub fn assignment(&mut self, targets: Vec<NodeId>, values: Vec<NodeId>) -> NodeId {
        self.push(Node::Assignment { targets, values })
    }

    pub fn var_decl(
        &mut self,
        names: Vec<NodeId>,
        declared_type: Option<&str>,
        values: Vec<NodeId>,
    ) -> NodeId {
        self.push(Node::VariableDeclaration {
            names,
            declared_type: declared_type.map(str::to_string),
            values,
        })
    }

    pub fn param(&mut self, name: &str, declared_type: Option<&str>) -> NodeId {
        let name = self.ident(name);
        self.push(Node::Parameter {
            name,
            declared_type: declared_type.map(str::to_string),
        })
    }

    pub fn function(
        &mut self,
        name: Option<&str>,
        receiver: Option<NodeId>,
        parameters: Vec<NodeId>,
        return_types: &[&str],
        body: Option<NodeId>,
    ) -> NodeId {
        let name = name.map(|n| self.ident(n));
        self.push(Node::FunctionDeclaration {
            name,
            receiver,
            parameters,
            return_types: return_types.iter().map(|t| t.to_string()).collect(),
            body,
        })
    }

    /// Function literal: no name, no receiver, no declared results.
    pub fn closure(&mut self, parameters: Vec<NodeId>, body: NodeId) -> NodeId {
        self.function(None, None, parameters, &[], Some(body))
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.push(Node::Block { statements })
    }

    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    ) -> NodeId {
        self.push(Node::If { condition, then_branch, else_branch })
    }

    pub fn loop_stmt(
        &mut self,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        body: NodeId,
    ) -> NodeId {
        self.push(Node::Loop { init, condition, body })
    }

    pub fn match_stmt(&mut self, expression: Option<NodeId>, cases: Vec<NodeId>) -> NodeId {
        self.push(Node::Match { expression, cases })
    }

    pub fn match_case(&mut self, expression: Option<NodeId>, body: NodeId) -> NodeId {
        self.push(Node::MatchCase { expression, body })
    }

    pub fn ret(&mut self, expressions: Vec<NodeId>) -> NodeId {
        self.push(Node::Return { expressions })
    }

    /// Finish the file with its imports and top-level declarations.
    pub fn build(mut self, imports: Vec<ImportDecl>, declarations: Vec<NodeId>) -> SourceFile {
        let root = self.push(Node::TopLevel { imports, declarations });
        SourceFile { nodes: self.nodes, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_allocates_sequential_ids() {
        let mut b = TreeBuilder::new();
        let a = b.ident("a");
        let lit = b.string_literal("x");
        let decl = b.var_decl(vec![a], None, vec![lit]);
        let file = b.build(vec![], vec![decl]);

        assert_eq!(file.len(), 4); // a, "x", decl, top-level
        assert_eq!(file.declarations(), &[decl]);
        assert!(matches!(file.node(decl), Node::VariableDeclaration { .. }));
    }

    #[test]
    fn children_follow_syntactic_order() {
        let mut b = TreeBuilder::new();
        let l = b.int_literal("1");
        let r = b.int_literal("2");
        let sum = b.binary(BinaryOp::Plus, l, r);
        let file = b.build(vec![], vec![sum]);

        assert_eq!(file.children(sum).as_slice(), &[l, r]);
        assert!(file.children(l).is_empty());
    }
}
