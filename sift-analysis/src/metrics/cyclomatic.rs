//! Cyclomatic complexity.

use sift_core::{Node, NodeId, SourceFile};

/// Decision-contributing nodes under `root`, in traversal order: named
/// function declarations with a body, conditionals, loops, non-default
/// match arms, and `&&`/`||` operators.
pub fn cyclomatic_nodes(file: &SourceFile, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    collect(file, root, &mut out);
    out
}

/// Complexity = number of decision points.
pub fn cyclomatic_complexity(file: &SourceFile, root: NodeId) -> usize {
    cyclomatic_nodes(file, root).len()
}

fn collect(file: &SourceFile, id: NodeId, out: &mut Vec<NodeId>) {
    match file.node(id) {
        Node::FunctionDeclaration { name: Some(_), body: Some(_), .. } => out.push(id),
        Node::If { .. } | Node::Loop { .. } => out.push(id),
        Node::MatchCase { expression: Some(_), .. } => out.push(id),
        Node::Binary { op, .. } if op.is_logical() => out.push(id),
        _ => {}
    }
    for child in file.children(id) {
        collect(file, child, out);
    }
}
