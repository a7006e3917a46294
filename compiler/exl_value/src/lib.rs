//! Exl Value - runtime values and the evaluation boundary.
//!
//! This crate holds everything the node drivers share at runtime:
//!
//! - `Value`: the dynamically-typed runtime value
//! - `ArrayValue` / `ArrayKey`: the ordered keyed collection
//! - `HostObject` / `PlainObject`: opaque objects supplied by the host
//! - `CallableValue`: callable values (host closures, anonymous functions)
//! - `ExprError` / `ExprErrorKind`: typed failures with factory constructors
//! - `FunctionRegistry` / `Bindings`: the two mappings passed to every evaluation
//!
//! Comparison and coercion rules live in [`compare`] and on `Value` itself.

pub mod compare;
pub mod errors;
mod functions;
mod value;

pub use errors::{ErrorCategory, ExprError, ExprErrorKind, ExprResult};
pub use functions::{
    Bindings, CompilerFn, EvaluatorFn, ExpressionFunction, ExpressionFunctionProvider,
    FunctionRegistry,
};
pub use value::{
    float_literal, float_to_string, parse_numeric, ArrayKey, ArrayValue, CallableValue, Heap,
    HostObject, NativeFn, Number, ObjectValue, PlainObject, Value,
};
