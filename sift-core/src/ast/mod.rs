//! The language-agnostic AST consumed by the semantic engine.
//!
//! A single tagged-union node type over a closed set of capabilities,
//! traversed by pattern matching — there is no per-node-type generated
//! dispatch. Nodes live in an arena ([`arena::SourceFile`]) and reference
//! children by [`NodeId`]; the tree is immutable after construction except
//! for the identifier symbol slot, which the binder fills in.
//!
//! - `mod.rs` — node variants and leaf payloads
//! - `arena.rs` — `SourceFile` arena and child enumeration
//! - `build.rs` — `TreeBuilder`, the construction API for parser adapters
//! - `utils.rs` — chain rendering, parenthesis skipping, identifier lookup

pub mod arena;
pub mod build;
pub mod utils;

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::types::identifiers::{NodeId, SymbolId};

/// One identifier occurrence. The `symbol` slot starts empty and is filled
/// at most once per binder run; an occurrence the binder cannot resolve
/// keeps an empty slot, which is a normal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    /// Declared type as spelled in source (e.g. `*rand.Rand`), when the
    /// parser knows it.
    pub type_hint: Option<String>,
    /// Package the identifier belongs to, when the parser knows it.
    pub package: Option<String>,
    #[serde(skip)]
    pub symbol: Cell<Option<SymbolId>>,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            package: None,
            symbol: Cell::new(None),
        }
    }
}

/// Literal kinds. For `String` the value holds the unquoted content; for
/// `Integer` it holds the raw text including any radix prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    Integer,
    Float,
    Boolean,
    Nil,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    ConditionalAnd,
    ConditionalOr,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    BitwiseAnd,
}

impl BinaryOp {
    /// `&&` or `||`.
    pub fn is_logical(self) -> bool {
        matches!(self, Self::ConditionalAnd | Self::ConditionalOr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Minus,
    Not,
}

/// One import declaration of the file under analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub path: String,
    /// Explicit local alias, mutually exclusive with `wildcard`.
    pub alias: Option<String>,
    /// A wildcard (dot) import brings the package's names into the file
    /// scope, so calls into it are unqualified.
    pub wildcard: bool,
}

impl ImportDecl {
    pub fn plain(path: impl Into<String>) -> Self {
        Self { path: path.into(), alias: None, wildcard: false }
    }

    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self { path: path.into(), alias: Some(alias.into()), wildcard: false }
    }

    pub fn wildcard(path: impl Into<String>) -> Self {
        Self { path: path.into(), alias: None, wildcard: true }
    }

    /// The qualifier a plain import is addressed by: the last path segment.
    pub fn default_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// The tagged-union node type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    TopLevel {
        imports: Vec<ImportDecl>,
        declarations: Vec<NodeId>,
    },
    Identifier(Ident),
    Literal(Literal),
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Parenthesized {
        expression: NodeId,
    },
    /// Plain assignment. Targets and values pair up element-wise when the
    /// lengths match; on a mismatch no target records a value.
    Assignment {
        targets: Vec<NodeId>,
        values: Vec<NodeId>,
    },
    /// Declaration with optional initializers, same pairing rule as
    /// `Assignment`. A multi-name declaration initialized from one call
    /// yields value-less declarations.
    VariableDeclaration {
        names: Vec<NodeId>,
        declared_type: Option<String>,
        values: Vec<NodeId>,
    },
    FunctionInvocation {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// `expression.member` — `member` is always an `Identifier` node.
    MemberSelect {
        expression: NodeId,
        member: NodeId,
    },
    /// `name` is `None` for function literals (closures); `receiver` is a
    /// `Parameter` node for methods.
    FunctionDeclaration {
        name: Option<NodeId>,
        receiver: Option<NodeId>,
        parameters: Vec<NodeId>,
        /// Declared result types as spelled in source. More than one entry
        /// means a multi-value return.
        return_types: Vec<String>,
        body: Option<NodeId>,
    },
    Parameter {
        name: NodeId,
        declared_type: Option<String>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    Loop {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        body: NodeId,
    },
    Match {
        expression: Option<NodeId>,
        cases: Vec<NodeId>,
    },
    /// `expression` is `None` for the default arm.
    MatchCase {
        expression: Option<NodeId>,
        body: NodeId,
    },
    Return {
        expressions: Vec<NodeId>,
    },
}
