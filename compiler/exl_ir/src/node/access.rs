//! Access and call nodes.

use std::sync::Arc;

use smallvec::SmallVec;

use super::{ArgumentsNode, NameNode, Node};

/// What a [`GetAttrNode`] reaches for. Fixed at construction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallKind {
    /// `node.attr`
    Property,
    /// `node.attr(args)`
    Method,
    /// `node[key]`
    ArrayIndex,
}

impl CallKind {
    /// Numeric tag shown in the debug tree.
    pub const fn code(self) -> u8 {
        match self {
            CallKind::Property => 1,
            CallKind::Method => 2,
            CallKind::ArrayIndex => 3,
        }
    }
}

/// Property, method, or index access.
///
/// For `Property` and `Method` the attribute is normally an identifier
/// [`ConstantNode`](super::ConstantNode); its `NULL_SAFE` flag marks `?.`.
#[derive(Clone, Debug)]
pub struct GetAttrNode {
    pub node: Box<Node>,
    pub attribute: Box<Node>,
    pub arguments: ArgumentsNode,
    pub kind: CallKind,
    is_null_coalesce: bool,
}

impl GetAttrNode {
    pub fn new(node: Node, attribute: Node, arguments: ArgumentsNode, kind: CallKind) -> Self {
        GetAttrNode {
            node: Box::new(node),
            attribute: Box::new(attribute),
            arguments,
            kind,
            is_null_coalesce: false,
        }
    }

    /// Set when this access sits on the left of a `??`.
    pub fn is_null_coalesce(&self) -> bool {
        self.is_null_coalesce
    }

    pub(super) fn mark_null_coalesce(&mut self) {
        self.is_null_coalesce = true;
    }

    /// Whether the member was reached with `?.`.
    pub fn is_null_safe(&self) -> bool {
        matches!(&*self.attribute, Node::Constant(c) if c.is_null_safe())
    }

    /// The member name, when the attribute is a string constant.
    pub fn member_name(&self) -> Option<&str> {
        match &*self.attribute {
            Node::Constant(c) => c.value.as_str(),
            _ => None,
        }
    }
}

/// A call to a registry function.
#[derive(Clone, Debug)]
pub struct FunctionNode {
    pub name: String,
    pub arguments: ArgumentsNode,
}

/// A call through a callable bound in the variables.
#[derive(Clone, Debug)]
pub struct ClosureNode {
    pub name: String,
    pub arguments: ArgumentsNode,
}

/// An inline function literal.
///
/// The body is shared so the callable it evaluates to can outlive the
/// tree borrow.
#[derive(Clone, Debug)]
pub struct AnonFuncNode {
    pub params: SmallVec<[NameNode; 4]>,
    pub body: Option<Arc<Node>>,
}

impl AnonFuncNode {
    pub fn new<S: Into<String>>(params: impl IntoIterator<Item = S>, body: Option<Node>) -> Self {
        AnonFuncNode {
            params: params.into_iter().map(NameNode::new).collect(),
            body: body.map(Arc::new),
        }
    }

    pub fn param_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}
