//! Arena storage for one file's tree.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::identifiers::NodeId;

use super::{Ident, ImportDecl, Node};

/// One parsed file: a node arena plus the root `TopLevel` node.
///
/// Construction goes through [`TreeBuilder`](super::build::TreeBuilder), so
/// every `NodeId` stored in a node is valid for this arena. The arena is
/// append-only; nothing is removed or reordered after `build()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub(super) nodes: Vec<Node>,
    pub(super) root: NodeId,
}

impl SourceFile {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// The identifier payload of `id`, if it is an `Identifier` node.
    pub fn ident(&self, id: NodeId) -> Option<&Ident> {
        match self.node(id) {
            Node::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    /// Import declarations of the root `TopLevel` node.
    pub fn imports(&self) -> &[ImportDecl] {
        match self.node(self.root) {
            Node::TopLevel { imports, .. } => imports,
            _ => &[],
        }
    }

    /// Top-level declarations of the file.
    pub fn declarations(&self) -> &[NodeId] {
        match self.node(self.root) {
            Node::TopLevel { declarations, .. } => declarations,
            _ => &[],
        }
    }

    /// Child node ids in syntactic order.
    pub fn children(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        let mut out = SmallVec::new();
        match self.node(id) {
            Node::TopLevel { declarations, .. } => out.extend_from_slice(declarations),
            Node::Identifier(_) | Node::Literal(_) => {}
            Node::Binary { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            Node::Unary { operand, .. } => out.push(*operand),
            Node::Parenthesized { expression } => out.push(*expression),
            Node::Assignment { targets, values } => {
                out.extend_from_slice(targets);
                out.extend_from_slice(values);
            }
            Node::VariableDeclaration { names, values, .. } => {
                out.extend_from_slice(names);
                out.extend_from_slice(values);
            }
            Node::FunctionInvocation { callee, arguments } => {
                out.push(*callee);
                out.extend_from_slice(arguments);
            }
            Node::MemberSelect { expression, member } => {
                out.push(*expression);
                out.push(*member);
            }
            Node::FunctionDeclaration { name, receiver, parameters, body, .. } => {
                out.extend(name.iter().copied());
                out.extend(receiver.iter().copied());
                out.extend_from_slice(parameters);
                out.extend(body.iter().copied());
            }
            Node::Parameter { name, .. } => out.push(*name),
            Node::Block { statements } => out.extend_from_slice(statements),
            Node::If { condition, then_branch, else_branch } => {
                out.push(*condition);
                out.push(*then_branch);
                out.extend(else_branch.iter().copied());
            }
            Node::Loop { init, condition, body } => {
                out.extend(init.iter().copied());
                out.extend(condition.iter().copied());
                out.push(*body);
            }
            Node::Match { expression, cases } => {
                out.extend(expression.iter().copied());
                out.extend_from_slice(cases);
            }
            Node::MatchCase { expression, body } => {
                out.extend(expression.iter().copied());
                out.push(*body);
            }
            Node::Return { expressions } => out.extend_from_slice(expressions),
        }
        out
    }
}
