//! Newtype identifiers for arena nodes and bound symbols.

use serde::{Deserialize, Serialize};

/// Index of a node in a [`SourceFile`](crate::SourceFile) arena.
///
/// Only the builder that owns the arena hands these out, so a `NodeId` is
/// always valid for the file it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a symbol in a symbol table produced by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
