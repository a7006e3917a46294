//! Engine configuration.

use exl_codegen::DEFAULT_SYNTAX_ERROR_CLASS;
use exl_stack::DEFAULT_MAX_DEPTH;

/// Settings shared by all three drivers of an engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest expression nesting any driver will walk.
    pub max_depth: usize,
    /// Host class thrown by compiled `matches` on an invalid pattern.
    pub host_syntax_error_class: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            host_syntax_error_class: DEFAULT_SYNTAX_ERROR_CLASS.to_string(),
        }
    }
}
