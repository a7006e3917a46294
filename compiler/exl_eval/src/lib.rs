#![deny(clippy::arithmetic_side_effects)]
//! Exl Eval - the tree-walking evaluator.
//!
//! # Architecture
//!
//! - `Evaluator`: walks a tree against a function registry and bindings
//! - `evaluate_binary`: direct enum-based binary operator dispatch
//! - `evaluate_unary`: direct enum-based unary operator dispatch
//! - `match_pattern`: the `matches` primitive over host-dialect patterns
//!
//! Evaluation is pure over `&Node`: nothing in the tree changes while it
//! is walked. Optional-chain short-circuiting is carried by return value,
//! and `matches` reports pattern errors through `Result`, so concurrent
//! evaluations share no mutable state apart from the pattern cache.

mod access;
mod call;
mod evaluator;
mod matches;
mod operators;
mod unary_operators;

pub use evaluator::{evaluate, Evaluator};
pub use matches::{match_pattern, validate_pattern};
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::arithmetic_side_effects,
    reason = "Tests can panic"
)]
mod tests;
