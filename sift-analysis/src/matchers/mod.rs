//! Structural call matching.
//!
//! A [`MethodMatcher`] is a compiled, immutable description of the calls a
//! check is interested in: package paths, method names, and optional
//! receiver / variable-type / parameter criteria. Matching evaluates the
//! criteria in order and short-circuits on the first failure; a hit
//! returns the method-name identifier node for precise reporting.
//!
//! - `imports.rs` — qualifier → package path resolution
//! - `receiver.rs` — function index and static receiver-type tracing
//! - `builder.rs` — the fluent configuration surface
//!
//! Matchers are `Clone + Send + Sync` and safely shared across worker
//! threads; per-file state lives in [`FileContext`].

mod builder;
mod imports;
mod receiver;

use std::sync::Arc;

use smallvec::SmallVec;
use thiserror::Error;

use sift_core::ast::utils::{identifier_chain, skip_parentheses};
use sift_core::{FxHashSet, LiteralKind, Node, NodeId, SourceFile};

use crate::symbols::{last_assigned_method_call, SymbolTable};

pub use builder::MethodMatcherBuilder;
pub use imports::ImportTable;
pub use receiver::{trace_static_type, FunctionIndex};

use receiver::base_type;

/// Matcher misconfiguration. The only failure class the engine raises;
/// everything else degrades to an absent result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("matcher requires at least one package path")]
    MissingPackage,
    #[error("matcher requires a name criterion")]
    MissingName,
    #[error("only one parameter criterion may be configured")]
    ConflictingParameterCriteria,
    #[error("receiver name set on a matcher built without a receiver criterion")]
    ReceiverNotExpected,
}

#[derive(Clone)]
pub(crate) enum NameSpec {
    Set(Vec<String>),
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

#[derive(Clone)]
pub(crate) enum ParamSpec {
    Any,
    Count(usize),
    Args(Arc<dyn Fn(&SourceFile, &[NodeId]) -> bool + Send + Sync>),
    Types(Arc<dyn Fn(&[String]) -> bool + Send + Sync>),
    AtIndex(Vec<(usize, Arc<dyn Fn(&SourceFile, NodeId) -> bool + Send + Sync>)>),
}

/// Per-file matching context: the tree, its symbol table, and the import
/// and function tables derived from them. Build once per file after
/// binding and share across every matcher applied to that file.
pub struct FileContext<'a> {
    file: &'a SourceFile,
    symbols: &'a SymbolTable,
    imports: ImportTable,
    functions: FunctionIndex,
}

impl<'a> FileContext<'a> {
    pub fn new(file: &'a SourceFile, symbols: &'a SymbolTable) -> Self {
        Self {
            file,
            symbols,
            imports: ImportTable::new(file.imports()),
            functions: FunctionIndex::new(file),
        }
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    pub fn functions(&self) -> &FunctionIndex {
        &self.functions
    }
}

/// Compiled call matcher. Construct through [`MethodMatcher::builder`].
#[derive(Clone)]
pub struct MethodMatcher {
    pub(crate) packages: Vec<String>,
    pub(crate) name: NameSpec,
    pub(crate) with_receiver: bool,
    pub(crate) receiver_name: Option<String>,
    pub(crate) variable_types: Option<FxHashSet<String>>,
    pub(crate) variable_method_results: Option<FxHashSet<String>>,
    pub(crate) params: ParamSpec,
}

impl MethodMatcher {
    pub fn builder() -> MethodMatcherBuilder {
        MethodMatcherBuilder::default()
    }

    /// Supply the receiver name for the next `matches` calls. Only legal
    /// on a matcher built with
    /// [`with_receiver`](MethodMatcherBuilder::with_receiver).
    pub fn set_receiver_name(&mut self, name: Option<&str>) -> Result<(), MatcherError> {
        if !self.with_receiver {
            return Err(MatcherError::ReceiverNotExpected);
        }
        self.receiver_name = name.map(str::to_string);
        Ok(())
    }

    /// Match `call` against every configured criterion; a hit returns the
    /// method-name identifier node.
    pub fn matches(&self, ctx: &FileContext<'_>, call: NodeId) -> Option<NodeId> {
        let file = ctx.file;
        let Node::FunctionInvocation { callee, arguments } = file.node(call) else {
            return None;
        };
        let callee = skip_parentheses(file, *callee);

        let matched = if self.variable_types.is_some() || self.variable_method_results.is_some()
        {
            self.match_variable_receiver(ctx, callee)?
        } else if self.with_receiver {
            self.match_named_receiver(ctx, callee)?
        } else {
            self.match_package_call(ctx, callee)?
        };

        if !self.check_params(ctx, arguments) {
            return None;
        }
        tracing::trace!(node = matched.index(), "call matched");
        Some(matched)
    }

    /// `<var>.<name>(...)` where the variable's static type (or the method
    /// that produced its value) is in the configured set.
    fn match_variable_receiver(&self, ctx: &FileContext<'_>, callee: NodeId) -> Option<NodeId> {
        let file = ctx.file;
        let Node::MemberSelect { expression, member } = file.node(callee) else {
            return None;
        };
        file.ident(*member)?;

        let receiver_ok = if let Some(types) = &self.variable_types {
            trace_static_type(file, ctx.symbols, &ctx.functions, *expression)
                .is_some_and(|traced| self.type_in_set(ctx, types, &traced))
        } else {
            false
        };
        let producer_ok = if let Some(methods) = &self.variable_method_results {
            self.value_from_method(ctx, *expression, methods)
        } else {
            false
        };
        if !(receiver_ok || producer_ok) {
            return None;
        }

        if !self.name_matches(file, &[*member]) {
            return None;
        }
        Some(*member)
    }

    /// `<receiverName>.<rest>(...)` with the name supplied at match time.
    fn match_named_receiver(&self, ctx: &FileContext<'_>, callee: NodeId) -> Option<NodeId> {
        let file = ctx.file;
        let wanted = self.receiver_name.as_deref()?;
        let chain = identifier_chain(file, callee)?;
        if chain.len() < 2 {
            return None;
        }
        let head = file.ident(chain[0])?;
        if head.name != wanted {
            return None;
        }
        if !self.packages.iter().any(|p| ctx.imports.imports_package(p)) {
            return None;
        }
        if !self.name_matches(file, &chain[1..]) {
            return None;
        }
        chain.last().copied()
    }

    /// Qualified or wildcard-imported package call.
    fn match_package_call(&self, ctx: &FileContext<'_>, callee: NodeId) -> Option<NodeId> {
        let file = ctx.file;
        let chain = identifier_chain(file, callee)?;
        let head = file.ident(chain[0])?;

        if chain.len() == 1 {
            // Unqualified call: only a wildcard import of a configured
            // package can supply the name.
            if head.symbol.get().is_some() {
                return None;
            }
            if !self
                .packages
                .iter()
                .any(|p| ctx.imports.has_wildcard_for(p))
            {
                return None;
            }
            if !self.name_matches(file, &chain) {
                return None;
            }
            return chain.last().copied();
        }

        // A qualifier bound to a local variable is not a package name.
        if head.symbol.get().is_some() {
            return None;
        }
        let qualified = match &head.package {
            Some(pkg) => self.packages.iter().any(|p| p == pkg),
            None => ctx
                .imports
                .resolve(&head.name)
                .iter()
                .any(|pkg| self.packages.iter().any(|p| p == pkg)),
        };
        if !qualified {
            return None;
        }
        if !self.name_matches(file, &chain[1..]) {
            return None;
        }
        chain.last().copied()
    }

    /// Whether `traced` (a source type spelling such as `*rand.Rand`)
    /// denotes one of the configured fully-qualified type names.
    fn type_in_set(&self, ctx: &FileContext<'_>, types: &FxHashSet<String>, traced: &str) -> bool {
        let base = base_type(traced);
        if types.contains(base) {
            return true;
        }
        match base.rsplit_once('.') {
            Some((qualifier, name)) => ctx
                .imports
                .resolve(qualifier)
                .iter()
                .any(|pkg| types.contains(&format!("{pkg}.{name}"))),
            None => types.iter().any(|configured| {
                configured
                    .rsplit_once('.')
                    .is_some_and(|(pkg, name)| name == base && ctx.imports.has_wildcard_for(pkg))
            }),
        }
    }

    /// Whether the receiver identifier's most recent value is a call to
    /// one of the configured methods.
    fn value_from_method(
        &self,
        ctx: &FileContext<'_>,
        expression: NodeId,
        methods: &FxHashSet<String>,
    ) -> bool {
        let file = ctx.file;
        let Some(ident) = file.ident(skip_parentheses(file, expression)) else {
            return false;
        };
        let Some(symbol) = ctx.symbols.symbol_of(ident) else {
            return false;
        };
        let Some(callee) = last_assigned_method_call(file, symbol) else {
            return false;
        };
        if methods.contains(&callee) {
            return true;
        }
        match callee.split_once('.') {
            Some((qualifier, rest)) => ctx
                .imports
                .resolve(qualifier)
                .iter()
                .any(|pkg| methods.contains(&format!("{pkg}.{rest}"))),
            None => false,
        }
    }

    fn name_matches(&self, file: &SourceFile, segments: &[NodeId]) -> bool {
        let mut names: SmallVec<[&str; 4]> = SmallVec::with_capacity(segments.len());
        for &seg in segments {
            match file.ident(seg) {
                Some(ident) => names.push(ident.name.as_str()),
                None => return false,
            }
        }
        match &self.name {
            NameSpec::Set(configured) => configured.iter().any(|cfg| {
                if cfg.contains('.') {
                    // Dotted names demand the exact chain, segment for
                    // segment.
                    let mut parts = cfg.split('.');
                    let mut matched = 0;
                    for name in &names {
                        match parts.next() {
                            Some(part) if part == *name => matched += 1,
                            _ => return false,
                        }
                    }
                    matched == names.len() && parts.next().is_none()
                } else {
                    names.last() == Some(&cfg.as_str())
                }
            }),
            NameSpec::Predicate(predicate) => predicate(&names.join(".")),
        }
    }

    fn check_params(&self, ctx: &FileContext<'_>, arguments: &[NodeId]) -> bool {
        let file = ctx.file;
        match &self.params {
            ParamSpec::Any => true,
            ParamSpec::Count(n) => arguments.len() == *n,
            ParamSpec::Args(predicate) => predicate(file, arguments),
            ParamSpec::Types(predicate) => {
                let types: Vec<String> = arguments
                    .iter()
                    .map(|&arg| argument_type(ctx, arg))
                    .collect();
                predicate(&types)
            }
            ParamSpec::AtIndex(predicates) => predicates.iter().all(|(index, predicate)| {
                arguments
                    .get(*index)
                    .is_some_and(|&arg| predicate(file, arg))
            }),
        }
    }
}

/// Best-effort type name of an argument, for the parameter-types
/// criterion. Unknown shapes come back as `"UNKNOWN"`.
fn argument_type(ctx: &FileContext<'_>, arg: NodeId) -> String {
    let file = ctx.file;
    let arg = skip_parentheses(file, arg);
    match file.node(arg) {
        Node::Literal(lit) => match lit.kind {
            LiteralKind::String => "string".to_string(),
            LiteralKind::Integer => "int".to_string(),
            LiteralKind::Float => "float64".to_string(),
            LiteralKind::Boolean => "bool".to_string(),
            LiteralKind::Nil => "nil".to_string(),
        },
        Node::Identifier(ident) => ident
            .type_hint
            .clone()
            .or_else(|| {
                ctx.symbols
                    .symbol_of(ident)
                    .and_then(|s| s.declared_type.clone())
            })
            .unwrap_or_else(|| "UNKNOWN".to_string()),
        _ => "UNKNOWN".to_string(),
    }
}
