//! Symbol table and usage records.
//!
//! The binder allocates one [`Symbol`] per distinct variable and appends a
//! [`Usage`] for every occurrence it resolves. Symbols live in a side table
//! keyed by [`SymbolId`]; the tree itself only carries the id in each
//! identifier's symbol slot.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use sift_core::ast::utils::tree_to_string;
use sift_core::{Ident, Node, NodeId, SourceFile, SymbolId};

/// How an occurrence relates to its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageKind {
    Declaration,
    Assignment,
    Reference,
    Parameter,
}

/// The scope a symbol was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeKind {
    Package,
    Function,
    Block,
}

/// One occurrence of a symbol. `value` is the expression assigned at this
/// occurrence, when there is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub occurrence: NodeId,
    pub value: Option<NodeId>,
    pub kind: UsageKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Declared type as spelled in source, or inferred from a literal
    /// initializer. `None` when neither is known.
    pub declared_type: Option<String>,
    pub scope: ScopeKind,
    usages: SmallVec<[Usage; 4]>,
}

impl Symbol {
    pub(crate) fn new(declared_type: Option<String>, scope: ScopeKind) -> Self {
        Self { declared_type, scope, usages: SmallVec::new() }
    }

    pub(crate) fn add_usage(&mut self, usage: Usage) {
        self.usages.push(usage);
    }

    /// All usages in source order.
    pub fn usages(&self) -> &[Usage] {
        &self.usages
    }

    /// The first declaration usage, if any.
    pub fn declaration(&self) -> Option<&Usage> {
        self.usages
            .iter()
            .find(|u| u.kind == UsageKind::Declaration)
    }

    /// The single value this symbol can hold, when that is unambiguous.
    ///
    /// A symbol redeclared or both declared-with-value and reassigned is
    /// ambiguous and yields `None`. A symbol declared without a value but
    /// assigned exactly once resolves to that assignment.
    pub fn safe_value(&self) -> Option<NodeId> {
        let declarations: SmallVec<[&Usage; 2]> = self
            .usages
            .iter()
            .filter(|u| u.kind == UsageKind::Declaration)
            .collect();
        let assignments: SmallVec<[&Usage; 2]> = self
            .usages
            .iter()
            .filter(|u| u.kind == UsageKind::Assignment)
            .collect();

        match declarations.as_slice() {
            [decl] if decl.value.is_some() => {
                if assignments.is_empty() {
                    decl.value
                } else {
                    None
                }
            }
            [] | [_] => match assignments.as_slice() {
                [assign] => assign.value,
                _ => None,
            },
            _ => None,
        }
    }

    /// The value of the latest declaration or assignment, ignoring whether
    /// earlier writes make the symbol ambiguous.
    pub fn last_assigned_value(&self) -> Option<NodeId> {
        self.usages
            .iter()
            .rev()
            .find(|u| matches!(u.kind, UsageKind::Declaration | UsageKind::Assignment))
            .and_then(|u| u.value)
    }
}

/// Dotted callee name of the method call most recently written into
/// `symbol`, e.g. `"rand.New"` for `r := rand.New(...)`.
pub fn last_assigned_method_call(file: &SourceFile, symbol: &Symbol) -> Option<String> {
    let value = symbol.last_assigned_value()?;
    match file.node(value) {
        Node::FunctionInvocation { callee, .. } => Some(tree_to_string(file, *callee)),
        _ => None,
    }
}

/// Side table of all symbols bound in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub(crate) fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// The symbol bound to an identifier occurrence, if the binder
    /// resolved it.
    pub fn symbol_of(&self, ident: &Ident) -> Option<&Symbol> {
        ident.symbol.get().map(|id| self.symbol(id))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }
}
