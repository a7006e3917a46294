//! Flags carried by constant nodes.

use bitflags::bitflags;

bitflags! {
    /// Rendering metadata for a [`ConstantNode`](crate::ConstantNode).
    ///
    /// Neither flag changes what the constant evaluates to.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ConstFlags: u8 {
        /// Render the value unquoted (member names, identifier-like keys).
        const IDENTIFIER = 1 << 0;
        /// The member was reached with `?.`.
        const NULL_SAFE = 1 << 1;
    }
}
