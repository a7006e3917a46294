//! Exl Fmt - the printer.
//!
//! Turns a tree back into expression text. [`to_printable`] describes one
//! node as a flat run of text and child pieces; [`Printer`] walks those
//! pieces depth-first and writes the text to an [`Emitter`].
//!
//! The output is parseable and means the same thing as the tree, but it is
//! normalized: every operator is parenthesized, strings use double quotes,
//! and collection literals print as `[v, ...]` only when their keys are
//! exactly `0..n` in order, `{k: v, ...}` otherwise.

mod emitter;
mod printable;
mod printer;

pub use emitter::{Emitter, StringEmitter};
pub use printable::{to_printable, Piece};
pub use printer::{dump, Printer};
