//! Host Code Generation for Expression Trees
//!
//! Turns a tree into one host-language (PHP-dialect) expression which,
//! executed by the host with the same variables in scope, produces what
//! the evaluator produces for the same bindings.
//!
//! # Architecture
//!
//! ```text
//!   Node tree + FunctionRegistry
//!            ↓
//!     CodegenContext   (registry, error class, depth limit)
//!            ↓
//!        emit_node     (one arm per node kind)
//!            ↓
//!   Compiler::source   (assembled host source)
//! ```
//!
//! Registry functions decide their own host code. Null-coalesce
//! suppression is left to the host's `??`, so no suppression logic is
//! emitted for access chains.

mod compiler;
mod context;
mod expr;
mod literal;

pub use compiler::{compile, Compiler};
pub use context::{CodegenContext, DEFAULT_SYNTAX_ERROR_CLASS};
pub use literal::{repr, string_literal};
