//! Leaf nodes: constants and variable references.

use exl_value::Value;

use crate::flags::ConstFlags;

/// A literal value.
#[derive(Clone, Debug)]
pub struct ConstantNode {
    pub value: Value,
    pub flags: ConstFlags,
}

impl ConstantNode {
    pub fn new(value: impl Into<Value>) -> Self {
        ConstantNode {
            value: value.into(),
            flags: ConstFlags::empty(),
        }
    }

    /// A string constant rendered unquoted: member names and
    /// identifier-like keys.
    pub fn identifier(name: &str) -> Self {
        ConstantNode {
            value: Value::string(name),
            flags: ConstFlags::IDENTIFIER,
        }
    }

    /// Mark the constant as reached through `?.`.
    #[must_use]
    pub fn null_safe(mut self) -> Self {
        self.flags |= ConstFlags::NULL_SAFE;
        self
    }

    pub fn is_identifier(&self) -> bool {
        self.flags.contains(ConstFlags::IDENTIFIER)
    }

    pub fn is_null_safe(&self) -> bool {
        self.flags.contains(ConstFlags::NULL_SAFE)
    }
}

/// A variable reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameNode {
    pub name: String,
}

impl NameNode {
    pub fn new(name: impl Into<String>) -> Self {
        NameNode { name: name.into() }
    }
}

/// A variable reference that always evaluates to `null`.
///
/// Stands in for the tail of an optional chain after rewriting; compiles
/// to a host lookup that tolerates an undefined variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullCoalescedNameNode {
    pub name: String,
}

impl NullCoalescedNameNode {
    pub fn new(name: impl Into<String>) -> Self {
        NullCoalescedNameNode { name: name.into() }
    }
}
