//! Lexical binding pass.
//!
//! A single depth-first walk that resolves identifier occurrences to
//! symbols and records a usage for each one. Binding is the only mutation
//! the tree ever sees: every identifier's symbol slot is cleared up front
//! and filled at most once, so re-binding a file is deterministic and
//! produces the same table.
//!
//! Scoping rules:
//! - the file itself is the package scope
//! - a function declaration opens a function scope that absorbs its body
//!   block, so parameters and body locals share one frame
//! - every other block, loop, and match opens a block scope
//! - a member-select binds only its head identifier; member names are
//!   never looked up

mod scope;

use sift_core::{LiteralKind, Node, NodeId, SourceFile};

use crate::symbols::{ScopeKind, Symbol, SymbolTable, Usage, UsageKind};

use self::scope::ScopeStack;

/// Bind every resolvable identifier in `file` and return the symbol table.
pub fn bind(file: &SourceFile) -> SymbolTable {
    for (_, node) in file.iter() {
        if let Node::Identifier(ident) = node {
            ident.symbol.set(None);
        }
    }

    let mut binder = Binder {
        file,
        table: SymbolTable::default(),
        scopes: ScopeStack::new(),
    };
    for &decl in file.declarations() {
        binder.visit(decl);
    }

    tracing::debug!(symbols = binder.table.len(), "bound file");
    binder.table
}

struct Binder<'a> {
    file: &'a SourceFile,
    table: SymbolTable,
    scopes: ScopeStack,
}

impl Binder<'_> {
    fn visit(&mut self, id: NodeId) {
        match self.file.node(id) {
            Node::FunctionDeclaration { receiver, parameters, body, .. } => {
                self.scopes.push(ScopeKind::Function);
                if let Some(recv) = receiver {
                    self.bind_parameter(*recv);
                }
                for &param in parameters {
                    self.bind_parameter(param);
                }
                // The body block shares the function scope.
                if let Some(body) = body {
                    match self.file.node(*body) {
                        Node::Block { statements } => {
                            for &stmt in statements {
                                self.visit(stmt);
                            }
                        }
                        _ => self.visit(*body),
                    }
                }
                self.scopes.pop();
            }
            Node::Block { statements } => {
                self.scopes.push(ScopeKind::Block);
                for &stmt in statements {
                    self.visit(stmt);
                }
                self.scopes.pop();
            }
            Node::Loop { init, condition, body } => {
                self.scopes.push(ScopeKind::Block);
                if let Some(init) = init {
                    self.visit(*init);
                }
                if let Some(condition) = condition {
                    self.visit(*condition);
                }
                self.visit(*body);
                self.scopes.pop();
            }
            Node::Match { expression, cases } => {
                self.scopes.push(ScopeKind::Block);
                if let Some(expression) = expression {
                    self.visit(*expression);
                }
                for &case in cases {
                    self.visit(case);
                }
                self.scopes.pop();
            }
            Node::VariableDeclaration { names, declared_type, values } => {
                for (i, &name) in names.iter().enumerate() {
                    let value = paired(values, names.len(), i);
                    self.declare_variable(name, declared_type.as_deref(), value);
                }
                for &value in values {
                    self.visit(value);
                }
            }
            Node::Assignment { targets, values } => {
                for (i, &target) in targets.iter().enumerate() {
                    let value = paired(values, targets.len(), i);
                    self.bind_assignment_target(target, value);
                }
                for &value in values {
                    self.visit(value);
                }
            }
            Node::MemberSelect { expression, member: _ } => {
                // Only the head of a chain is a variable occurrence.
                match self.file.node(*expression) {
                    Node::Identifier(_) => self.reference(*expression),
                    _ => self.visit(*expression),
                }
            }
            Node::Identifier(_) => self.reference(id),
            _ => {
                for child in self.file.children(id) {
                    self.visit(child);
                }
            }
        }
    }

    fn bind_parameter(&mut self, id: NodeId) {
        if let Node::Parameter { name, declared_type } = self.file.node(id) {
            let declared_type = declared_type.clone();
            let name = *name;
            if let Some(ident) = self.file.ident(name) {
                let sym = self
                    .table
                    .alloc(Symbol::new(declared_type, ScopeKind::Function));
                self.scopes.declare(&ident.name, sym);
                self.table.symbol_mut(sym).add_usage(Usage {
                    occurrence: name,
                    value: None,
                    kind: UsageKind::Parameter,
                });
                ident.symbol.set(Some(sym));
            }
        }
    }

    fn declare_variable(&mut self, name: NodeId, declared_type: Option<&str>, value: Option<NodeId>) {
        let Some(ident) = self.file.ident(name) else {
            return;
        };
        // Redeclaring a name in the same scope extends the existing symbol,
        // which is what makes its value ambiguous.
        let sym = match self.scopes.lookup_local(&ident.name) {
            Some(existing) => existing,
            None => {
                let declared_type = declared_type
                    .map(str::to_string)
                    .or_else(|| value.and_then(|v| self.literal_type(v)));
                let sym = self
                    .table
                    .alloc(Symbol::new(declared_type, self.scopes.current_kind()));
                self.scopes.declare(&ident.name, sym);
                sym
            }
        };
        self.table.symbol_mut(sym).add_usage(Usage {
            occurrence: name,
            value,
            kind: UsageKind::Declaration,
        });
        ident.symbol.set(Some(sym));
    }

    fn bind_assignment_target(&mut self, target: NodeId, value: Option<NodeId>) {
        match self.file.node(target) {
            Node::Identifier(ident) => {
                if let Some(sym) = self.scopes.lookup(&ident.name) {
                    self.table.symbol_mut(sym).add_usage(Usage {
                        occurrence: target,
                        value,
                        kind: UsageKind::Assignment,
                    });
                    ident.symbol.set(Some(sym));
                }
            }
            _ => self.visit(target),
        }
    }

    fn reference(&mut self, id: NodeId) {
        let Some(ident) = self.file.ident(id) else {
            return;
        };
        if ident.symbol.get().is_some() {
            return;
        }
        if let Some(sym) = self.scopes.lookup(&ident.name) {
            self.table.symbol_mut(sym).add_usage(Usage {
                occurrence: id,
                value: None,
                kind: UsageKind::Reference,
            });
            ident.symbol.set(Some(sym));
        }
    }

    /// Default type of a literal initializer, used when the declaration
    /// carries no explicit type.
    fn literal_type(&self, value: NodeId) -> Option<String> {
        match self.file.node(value) {
            Node::Literal(lit) => match lit.kind {
                LiteralKind::String => Some("string".to_string()),
                LiteralKind::Integer => Some("int".to_string()),
                LiteralKind::Float => Some("float64".to_string()),
                LiteralKind::Boolean => Some("bool".to_string()),
                LiteralKind::Nil => None,
            },
            _ => None,
        }
    }
}

/// Element-wise initializer pairing: a mismatch in arity leaves every
/// target without a recorded value.
fn paired(values: &[NodeId], targets: usize, i: usize) -> Option<NodeId> {
    if values.len() == targets {
        values.get(i).copied()
    } else {
        None
    }
}
