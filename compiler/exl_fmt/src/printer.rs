//! The depth-limited printing walk.

use exl_ir::{ArgumentsNode, Node};
use exl_stack::{ensure_sufficient_stack, NestingLimit, DEFAULT_MAX_DEPTH};
use exl_value::ExprResult;

use crate::emitter::{Emitter, StringEmitter};
use crate::printable::{to_printable, Piece};

/// Prints trees through [`to_printable`].
///
/// A printer is cheap to build and tracks the nesting depth of the walk in
/// progress, so use one per thread.
pub struct Printer {
    limit: NestingLimit,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Printer {
            limit: NestingLimit::new(max_depth),
        }
    }

    /// Print a tree to a string.
    pub fn dump(&self, node: &Node) -> ExprResult<String> {
        let mut out = StringEmitter::new();
        self.dump_into(node, &mut out)?;
        Ok(out.output())
    }

    /// Print a tree into an existing emitter.
    pub fn dump_into<E: Emitter>(&self, node: &Node, out: &mut E) -> ExprResult<()> {
        let _depth = self.limit.enter()?;
        ensure_sufficient_stack(|| {
            for piece in to_printable(node)? {
                self.emit_piece(&piece, out)?;
            }
            Ok(())
        })
    }

    fn emit_piece<E: Emitter>(&self, piece: &Piece<'_>, out: &mut E) -> ExprResult<()> {
        match piece {
            Piece::Text(text) => out.emit(text),
            Piece::Node(node) => self.dump_into(node, out)?,
            Piece::Arguments(arguments) => self.dump_arguments(arguments, out)?,
        }
        Ok(())
    }

    fn dump_arguments<E: Emitter>(&self, arguments: &ArgumentsNode, out: &mut E) -> ExprResult<()> {
        for (i, value) in arguments.values().enumerate() {
            if i > 0 {
                out.emit(", ");
            }
            self.dump_into(value, out)?;
        }
        Ok(())
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a tree with the default depth limit.
pub fn dump(node: &Node) -> ExprResult<String> {
    Printer::new().dump(node)
}

#[cfg(test)]
mod tests;
