//! Lexical scope stack for the binding pass.

use sift_core::{FxHashMap, SymbolId};

use crate::symbols::ScopeKind;

struct Frame {
    kind: ScopeKind,
    bindings: FxHashMap<String, SymbolId>,
}

/// Innermost-out stack of name → symbol bindings. The package frame is
/// pushed on construction and never popped.
pub(super) struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub(super) fn new() -> Self {
        Self {
            frames: vec![Frame {
                kind: ScopeKind::Package,
                bindings: FxHashMap::default(),
            }],
        }
    }

    pub(super) fn push(&mut self, kind: ScopeKind) {
        self.frames.push(Frame { kind, bindings: FxHashMap::default() });
    }

    pub(super) fn pop(&mut self) {
        debug_assert!(self.frames.len() > 1);
        self.frames.pop();
    }

    pub(super) fn current_kind(&self) -> ScopeKind {
        self.frames[self.frames.len() - 1].kind
    }

    pub(super) fn declare(&mut self, name: &str, id: SymbolId) {
        let top = self.frames.len() - 1;
        self.frames[top].bindings.insert(name.to_string(), id);
    }

    /// Resolve a name through enclosing scopes, innermost first.
    pub(super) fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.bindings.get(name).copied())
    }

    /// Resolve a name in the innermost scope only. Used to detect
    /// redeclaration of an existing symbol.
    pub(super) fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.frames[self.frames.len() - 1].bindings.get(name).copied()
    }
}
