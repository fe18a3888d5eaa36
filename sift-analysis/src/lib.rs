//! # sift-analysis
//!
//! Semantic analysis over the sift AST. Five layers, each usable on its own:
//!
//! - `symbols` — symbol table, usages, and the single-safe-value rule
//! - `binder` — lexical binding pass that fills identifier symbol slots
//! - `folding` — depth-bounded string and integer constant resolution
//! - `matchers` — declarative structural matching of call expressions
//! - `metrics` — cognitive and cyclomatic complexity walkers
//!
//! The binder runs first; everything else reads the tree and the symbol
//! table it produced without further mutation, so the later layers can run
//! concurrently over the same file.

pub mod binder;
pub mod folding;
pub mod matchers;
pub mod metrics;
pub mod symbols;

pub use binder::bind;
pub use matchers::{FileContext, MatcherError, MethodMatcher, MethodMatcherBuilder};
pub use symbols::{ScopeKind, Symbol, SymbolTable, Usage, UsageKind};
