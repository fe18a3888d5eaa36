//! # sift-core
//!
//! Foundation crate for the sift semantic-analysis engine.
//! Defines the language-agnostic AST (an arena-backed tagged union), the
//! tree construction API fed by external parsers, tree utilities, shared
//! identifiers, and collection aliases. The analysis crate builds on this.

pub mod ast;
pub mod trace;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use ast::arena::SourceFile;
pub use ast::build::TreeBuilder;
pub use ast::{BinaryOp, Ident, ImportDecl, Literal, LiteralKind, Node, UnaryOp};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::identifiers::{NodeId, SymbolId};
