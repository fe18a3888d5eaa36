//! Cognitive complexity.
//!
//! Each branching construct contributes 1 plus its lexical nesting depth.
//! `else` branches and boolean-operator alternation contribute 1 without
//! nesting; an `else if` is a continuation of its chain, not a new
//! conditional. Function literals do not reset the nesting counter: a
//! loop inside a closure inside a loop is two levels deep.

use serde::{Deserialize, Serialize};

use sift_core::{BinaryOp, Node, NodeId, SourceFile};

/// One contribution to the total: the construct and the nesting depth it
/// sat at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Increment {
    pub node: NodeId,
    pub nesting: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CognitiveComplexity {
    increments: Vec<Increment>,
}

impl CognitiveComplexity {
    pub fn compute(file: &SourceFile, root: NodeId) -> Self {
        let mut walker = Walker {
            file,
            increments: Vec::new(),
            ancestors: Vec::new(),
        };
        walker.visit(root);
        Self { increments: walker.increments }
    }

    pub fn value(&self) -> u32 {
        self.increments.iter().map(|i| 1 + i.nesting).sum()
    }

    pub fn increments(&self) -> &[Increment] {
        &self.increments
    }
}

struct Walker<'a> {
    file: &'a SourceFile,
    increments: Vec<Increment>,
    ancestors: Vec<NodeId>,
}

impl Walker<'_> {
    fn visit(&mut self, id: NodeId) {
        match self.file.node(id) {
            Node::If { else_branch, .. } => {
                if !self.is_else_if(id) {
                    self.increments.push(Increment { node: id, nesting: self.nesting_level() });
                }
                if let Some(else_branch) = else_branch {
                    self.increments.push(Increment { node: *else_branch, nesting: 0 });
                }
            }
            Node::Loop { .. } | Node::Match { .. } => {
                self.increments.push(Increment { node: id, nesting: self.nesting_level() });
            }
            Node::Binary { op, .. } if op.is_logical() => {
                // The top of a boolean expression scores its whole
                // operator sequence; operands were already covered.
                if !self.under_logical_operator() {
                    self.count_operator_sequence(id);
                }
            }
            _ => {}
        }
        self.ancestors.push(id);
        for child in self.file.children(id) {
            self.visit(child);
        }
        self.ancestors.pop();
    }

    /// Whether `id` is the `else` branch of the ancestor conditional.
    fn is_else_if(&self, id: NodeId) -> bool {
        let Some(&parent) = self.ancestors.last() else {
            return false;
        };
        matches!(
            self.file.node(parent),
            Node::If { else_branch: Some(e), .. } if *e == id
        )
    }

    /// Whether the direct parent is itself a logical operator, meaning
    /// this node already belongs to an enclosing operator sequence.
    fn under_logical_operator(&self) -> bool {
        match self.ancestors.last() {
            Some(&parent) => {
                matches!(self.file.node(parent), Node::Binary { op, .. } if op.is_logical())
            }
            None => false,
        }
    }

    /// Score a maximal boolean expression: flatten its operators into
    /// source order and add one increment each time the operator differs
    /// from the previous one. `a && b && c` scores once; `a || b && c || d`
    /// reads `||, &&, ||` and scores three times.
    fn count_operator_sequence(&mut self, id: NodeId) {
        let mut sequence = Vec::new();
        self.flatten_operators(id, &mut sequence);
        let mut previous = None;
        for (node, op) in sequence {
            if previous != Some(op) {
                self.increments.push(Increment { node, nesting: 0 });
            }
            previous = Some(op);
        }
    }

    /// In-order operator collection. Parenthesized operands are opaque
    /// here; they start a sequence of their own when the walk reaches them.
    fn flatten_operators(&self, id: NodeId, out: &mut Vec<(NodeId, BinaryOp)>) {
        if let Node::Binary { op, left, right } = self.file.node(id) {
            if op.is_logical() {
                self.flatten_operators(*left, out);
                out.push((id, *op));
                self.flatten_operators(*right, out);
            }
        }
    }

    /// Nesting depth at the current position: enclosing conditionals
    /// (chains counted once), loops, matches, and function declarations
    /// past the outermost one.
    fn nesting_level(&self) -> u32 {
        let mut nesting = 0;
        let mut inside_function = false;
        for (i, &ancestor) in self.ancestors.iter().enumerate() {
            match self.file.node(ancestor) {
                Node::FunctionDeclaration { .. } => {
                    if inside_function || nesting > 0 {
                        nesting += 1;
                    }
                    inside_function = true;
                }
                Node::If { .. } => {
                    let chained = i > 0
                        && matches!(
                            self.file.node(self.ancestors[i - 1]),
                            Node::If { else_branch: Some(e), .. } if *e == ancestor
                        );
                    if !chained {
                        nesting += 1;
                    }
                }
                Node::Loop { .. } | Node::Match { .. } => nesting += 1,
                _ => {}
            }
        }
        nesting
    }
}
