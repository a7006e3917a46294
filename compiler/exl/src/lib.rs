//! Exl - expression trees with three drivers.
//!
//! An [`Engine`] owns a function registry and an [`EngineConfig`]; given a
//! tree it can
//!
//! - evaluate it against a set of bindings ([`Engine::evaluate`]),
//! - compile it to host source ([`Engine::compile`]),
//! - print it back to expression text ([`Engine::dump`]).
//!
//! The tree itself comes from a parser outside this workspace. Trees whose
//! operands were assembled by hand should go through [`Engine::prepare`]
//! first so `??` suppression is in place.
//!
//! ```text
//! let engine = Engine::builder().max_depth(128).build();
//! let tree = engine.prepare(tree);
//! let value = engine.evaluate(&tree, &Bindings::new().with("a", 1))?;
//! let source = engine.compile(&tree)?;
//! ```

mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};

pub use exl_codegen::Compiler;
pub use exl_fmt::Piece;
pub use exl_ir::{ArgumentsNode, ArrayNode, BinaryOp, Node, Spelling, UnaryOp};
pub use exl_value::{
    Bindings, CallableValue, ErrorCategory, ExprError, ExprErrorKind, ExprResult,
    ExpressionFunction, ExpressionFunctionProvider, FunctionRegistry, HostObject, PlainObject,
    Value,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call does anything, and
/// only when `RUST_LOG` is set (e.g. `RUST_LOG=exl_eval=debug`). A host
/// that already installed a global subscriber keeps it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if installed.is_err() {
                tracing::debug!("global subscriber already set, keeping it");
            }
        }
    });
}
