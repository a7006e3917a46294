//! Code generation context.
//!
//! The `CodegenContext` holds everything the node walk reads: the function
//! registry, the host exception class thrown by compiled `matches`, and the
//! nesting limit. The output buffer lives with the caller, so the context
//! itself is only ever borrowed shared.

use exl_stack::{NestingLimit, DEFAULT_MAX_DEPTH};
use exl_value::FunctionRegistry;

/// Host exception class thrown by compiled `matches` on a bad pattern.
pub const DEFAULT_SYNTAX_ERROR_CLASS: &str = "\\InvalidArgumentException";

/// Code generation context.
#[derive(Debug)]
pub struct CodegenContext<'a> {
    /// Functions that render their own calls.
    pub functions: &'a FunctionRegistry,
    /// Fully-qualified host class for pattern errors.
    pub syntax_error_class: String,
    pub(crate) limit: NestingLimit,
}

impl<'a> CodegenContext<'a> {
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        CodegenContext {
            functions,
            syntax_error_class: DEFAULT_SYNTAX_ERROR_CLASS.to_string(),
            limit: NestingLimit::new(DEFAULT_MAX_DEPTH),
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limit = NestingLimit::new(max_depth);
        self
    }

    #[must_use]
    pub fn with_syntax_error_class(mut self, class: impl Into<String>) -> Self {
        self.syntax_error_class = class.into();
        self
    }

    /// The configured maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.limit.max()
    }
}
