//! The function registry and variable bindings.
//!
//! These are the two mappings handed to every evaluation. Both are
//! string-keyed and read-only while an evaluation runs.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{unbound_name, unknown_function, ExprResult};
use crate::value::Value;

/// Evaluator half of a registered function: receives the bindings and
/// the evaluated arguments.
pub type EvaluatorFn = dyn Fn(&Bindings, &[Value]) -> ExprResult + Send + Sync;

/// Compiler half of a registered function: receives the compiled
/// argument fragments and returns the host source for the call.
pub type CompilerFn = dyn Fn(&[String]) -> String + Send + Sync;

/// A named function with both an evaluator and a compiler.
#[derive(Clone)]
pub struct ExpressionFunction {
    name: Arc<str>,
    compiler: Arc<CompilerFn>,
    evaluator: Arc<EvaluatorFn>,
}

impl ExpressionFunction {
    pub fn new(
        name: &str,
        compiler: impl Fn(&[String]) -> String + Send + Sync + 'static,
        evaluator: impl Fn(&Bindings, &[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        ExpressionFunction {
            name: name.into(),
            compiler: Arc::new(compiler),
            evaluator: Arc::new(evaluator),
        }
    }

    /// A function backed by the host function of the same name.
    ///
    /// Compiles to a fully-qualified host call `\name(a, b)`; evaluates by
    /// calling `func` with the arguments only.
    pub fn native(
        name: &str,
        func: impl Fn(&[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        let host_name = format!("\\{name}");
        ExpressionFunction::new(
            name,
            move |args| format!("{host_name}({})", args.join(", ")),
            move |_, args| func(args),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the host call for already-compiled arguments.
    pub fn compile(&self, args: &[String]) -> String {
        (self.compiler)(args)
    }

    pub fn evaluate(&self, bindings: &Bindings, args: &[Value]) -> ExprResult {
        (self.evaluator)(bindings, args)
    }
}

impl fmt::Debug for ExpressionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpressionFunction({})", self.name)
    }
}

/// A source of functions registered in one batch.
pub trait ExpressionFunctionProvider {
    fn functions(&self) -> Vec<ExpressionFunction>;
}

/// Name-keyed function registry.
///
/// Cheap to clone: the table is shared, and copied only when a shared
/// registry is modified.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: Arc<FxHashMap<Arc<str>, ExpressionFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous one of the same name.
    pub fn add_function(&mut self, function: ExpressionFunction) {
        tracing::trace!(name = function.name(), "registering expression function");
        Arc::make_mut(&mut self.functions).insert(Arc::clone(&function.name), function);
    }

    /// Register a function from its two halves.
    pub fn register(
        &mut self,
        name: &str,
        compiler: impl Fn(&[String]) -> String + Send + Sync + 'static,
        evaluator: impl Fn(&Bindings, &[Value]) -> ExprResult + Send + Sync + 'static,
    ) {
        self.add_function(ExpressionFunction::new(name, compiler, evaluator));
    }

    pub fn register_provider(&mut self, provider: &dyn ExpressionFunctionProvider) {
        for function in provider.functions() {
            self.add_function(function);
        }
    }

    /// Builder-style [`add_function`](Self::add_function).
    #[must_use]
    pub fn with(mut self, function: ExpressionFunction) -> Self {
        self.add_function(function);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ExpressionFunction> {
        self.functions.get(name)
    }

    /// Look up a function, failing with an unknown-function error.
    pub fn lookup(&self, name: &str) -> ExprResult<&ExpressionFunction> {
        self.get(name).ok_or_else(|| unknown_function(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Name-keyed variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: FxHashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up a variable, failing with an unbound-name error.
    pub fn lookup(&self, name: &str) -> ExprResult<&Value> {
        self.get(name).ok_or_else(|| unbound_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Bindings {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
