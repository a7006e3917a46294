//! The engine and its builder.

use exl_codegen::{CodegenContext, Compiler};
use exl_eval::Evaluator;
use exl_fmt::{to_printable, Piece, Printer};
use exl_ir::Node;
use exl_value::{
    Bindings, ExprResult, ExpressionFunction, ExpressionFunctionProvider, FunctionRegistry, Value,
};

use crate::config::EngineConfig;

/// Evaluates, compiles and prints trees against one function registry.
///
/// The registry and the configuration are fixed once built, so an engine
/// can be shared freely; every call builds its own driver.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    functions: FunctionRegistry,
    config: EngineConfig,
}

impl Engine {
    /// An engine with no functions and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Mark every `??` access chain in a tree. Idempotent.
    #[must_use]
    pub fn prepare(&self, mut node: Node) -> Node {
        node.annotate_null_coalesce();
        node
    }

    /// Evaluate a tree to a value.
    pub fn evaluate(&self, node: &Node, bindings: &Bindings) -> ExprResult {
        Evaluator::with_max_depth(&self.functions, bindings, self.config.max_depth).evaluate(node)
    }

    /// Compile a tree to one host expression.
    pub fn compile(&self, node: &Node) -> ExprResult<String> {
        let mut compiler = self.compiler();
        compiler.compile(node)?;
        Ok(compiler.into_source())
    }

    /// A compiler configured like this engine, for building source around
    /// compiled trees.
    pub fn compiler(&self) -> Compiler<'_> {
        let context = CodegenContext::new(&self.functions)
            .with_max_depth(self.config.max_depth)
            .with_syntax_error_class(self.config.host_syntax_error_class.as_str());
        Compiler::with_context(context)
    }

    /// Print a tree back to expression text.
    pub fn dump(&self, node: &Node) -> ExprResult<String> {
        Printer::with_max_depth(self.config.max_depth).dump(node)
    }

    /// The printable pieces of one node.
    pub fn to_printable<'n>(&self, node: &'n Node) -> ExprResult<Vec<Piece<'n>>> {
        to_printable(node)
    }
}

/// Builds an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    functions: FunctionRegistry,
    config: EngineConfig,
}

impl EngineBuilder {
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn syntax_error_class(mut self, class: impl Into<String>) -> Self {
        self.config.host_syntax_error_class = class.into();
        self
    }

    #[must_use]
    pub fn function(mut self, function: ExpressionFunction) -> Self {
        self.functions.add_function(function);
        self
    }

    /// Register a function from its compiler and evaluator halves.
    #[must_use]
    pub fn register(
        mut self,
        name: &str,
        compiler: impl Fn(&[String]) -> String + Send + Sync + 'static,
        evaluator: impl Fn(&Bindings, &[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        self.functions.register(name, compiler, evaluator);
        self
    }

    #[must_use]
    pub fn provider(mut self, provider: &dyn ExpressionFunctionProvider) -> Self {
        self.functions.register_provider(provider);
        self
    }

    pub fn build(self) -> Engine {
        tracing::debug!(
            functions = self.functions.len(),
            max_depth = self.config.max_depth,
            "building expression engine"
        );
        Engine {
            functions: self.functions,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests;
