//! The source-building compiler.

use exl_fmt::Emitter;
use exl_ir::Node;
use exl_value::{ExprResult, FunctionRegistry, Value};

use crate::context::CodegenContext;
use crate::literal::{repr, string_literal};

/// Accumulates host source for one expression.
///
/// `compile` appends a node's code; `raw`, `string` and `repr` append
/// hand-written fragments around it. A failed `compile` may leave a
/// partial fragment behind; `reset` clears the buffer for reuse.
#[derive(Debug)]
pub struct Compiler<'a> {
    context: CodegenContext<'a>,
    source: String,
}

impl<'a> Compiler<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Self::with_context(CodegenContext::new(functions))
    }

    pub fn with_context(context: CodegenContext<'a>) -> Self {
        Compiler {
            context,
            source: String::new(),
        }
    }

    pub fn context(&self) -> &CodegenContext<'a> {
        &self.context
    }

    /// The source accumulated so far.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    pub fn reset(&mut self) -> &mut Self {
        self.source.clear();
        self
    }

    /// Append text verbatim.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.source.emit(text);
        self
    }

    /// Append a quoted host string literal.
    pub fn string(&mut self, value: &str) -> &mut Self {
        self.source.emit(&string_literal(value));
        self
    }

    /// Append the host literal for a value.
    pub fn repr(&mut self, value: &Value) -> ExprResult<&mut Self> {
        self.source.emit(&repr(value)?);
        Ok(self)
    }

    /// Append the host code for a tree.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = node.kind_name()))]
    pub fn compile(&mut self, node: &Node) -> ExprResult<&mut Self> {
        self.context.emit_node(node, &mut self.source)?;
        Ok(self)
    }

    /// Host code for a tree, without touching the buffer.
    pub fn subcompile(&self, node: &Node) -> ExprResult<String> {
        self.context.subcompile(node)
    }
}

/// Compile a tree with the default context.
pub fn compile(node: &Node, functions: &FunctionRegistry) -> ExprResult<String> {
    let mut compiler = Compiler::new(functions);
    compiler.compile(node)?;
    Ok(compiler.into_source())
}
