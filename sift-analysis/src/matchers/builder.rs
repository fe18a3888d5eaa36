//! Fluent builder for [`MethodMatcher`].

use std::sync::Arc;

use sift_core::{FxHashSet, NodeId, SourceFile};

use super::receiver::base_type;
use super::{MatcherError, MethodMatcher, NameSpec, ParamSpec};

/// Order-independent builder. Criteria accumulate; `build()` validates
/// that a package and a name criterion are present and that at most one
/// parameter criterion was configured.
#[derive(Default)]
pub struct MethodMatcherBuilder {
    packages: Vec<String>,
    name: Option<NameSpec>,
    with_receiver: bool,
    variable_types: Option<FxHashSet<String>>,
    variable_method_results: Option<FxHashSet<String>>,
    params: Option<ParamSpec>,
    conflicting_params: bool,
}

impl MethodMatcherBuilder {
    pub fn of_type(self, package: impl Into<String>) -> Self {
        self.of_types([package])
    }

    pub fn of_types<I>(mut self, packages: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(Into::into));
        self
    }

    /// Names to accept. A dotted name (`A.B.method`) requires the call's
    /// qualifier chain to match that exact sequence.
    pub fn with_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names = names.into_iter().map(Into::into);
        match &mut self.name {
            Some(NameSpec::Set(set)) => set.extend(names),
            _ => self.name = Some(NameSpec::Set(names.collect())),
        }
        self
    }

    /// Shorthand for dotted names sharing one qualifier prefix.
    pub fn with_prefix_and_names<I>(self, prefix: &str, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let prefix = prefix.to_string();
        self.with_names(names.into_iter().map(|n| {
            let name: String = n.into();
            format!("{prefix}.{name}")
        }))
    }

    /// Accept any call whose dotted name satisfies `predicate`.
    pub fn with_names_matching(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.name = Some(NameSpec::Predicate(Arc::new(predicate)));
        self
    }

    /// Require a `<receiver>.<name>(...)` shape, with the receiver name
    /// supplied per call site through
    /// [`MethodMatcher::set_receiver_name`](super::MethodMatcher::set_receiver_name).
    pub fn with_receiver(mut self) -> Self {
        self.with_receiver = true;
        self
    }

    /// Require the receiver expression to statically trace to one of
    /// `types` (value or pointer spelling, fully qualified).
    pub fn with_variable_type_in<I>(mut self, types: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let set = self.variable_types.get_or_insert_with(FxHashSet::default);
        set.extend(types.into_iter().map(|t| base_type(t.as_ref()).to_string()));
        self
    }

    /// Require the receiver variable's most recent value to come from one
    /// of the named methods (fully qualified, e.g. `math/rand.New`).
    pub fn with_variable_result_from_method_in<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let set = self
            .variable_method_results
            .get_or_insert_with(FxHashSet::default);
        set.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn with_any_parameters(self) -> Self {
        self.set_params(ParamSpec::Any)
    }

    pub fn with_parameter_count(self, count: usize) -> Self {
        self.set_params(ParamSpec::Count(count))
    }

    /// Predicate over the full argument list.
    pub fn with_parameters_matching(
        self,
        predicate: impl Fn(&SourceFile, &[NodeId]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.set_params(ParamSpec::Args(Arc::new(predicate)))
    }

    /// Predicate over the inferred argument type names.
    pub fn with_parameter_types_matching(
        self,
        predicate: impl Fn(&[String]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.set_params(ParamSpec::Types(Arc::new(predicate)))
    }

    /// Per-index argument predicate. May be called several times for
    /// different indexes; an index past the actual argument list fails
    /// the match.
    pub fn with_parameter_at_index(
        mut self,
        index: usize,
        predicate: impl Fn(&SourceFile, NodeId) -> bool + Send + Sync + 'static,
    ) -> Self {
        match &mut self.params {
            Some(ParamSpec::AtIndex(preds)) => {
                preds.push((index, Arc::new(predicate)));
                self
            }
            _ => self.set_params(ParamSpec::AtIndex(vec![(index, Arc::new(predicate))])),
        }
    }

    fn set_params(mut self, spec: ParamSpec) -> Self {
        if self.params.is_some() {
            self.conflicting_params = true;
        }
        self.params = Some(spec);
        self
    }

    pub fn build(self) -> Result<MethodMatcher, MatcherError> {
        if self.packages.is_empty() {
            return Err(MatcherError::MissingPackage);
        }
        let Some(name) = self.name else {
            return Err(MatcherError::MissingName);
        };
        if self.conflicting_params {
            return Err(MatcherError::ConflictingParameterCriteria);
        }
        Ok(MethodMatcher {
            packages: self.packages,
            name,
            with_receiver: self.with_receiver,
            receiver_name: None,
            variable_types: self.variable_types,
            variable_method_results: self.variable_method_results,
            params: self.params.unwrap_or(ParamSpec::Any),
        })
    }
}
