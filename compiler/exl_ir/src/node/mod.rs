//! The expression tree.
//!
//! Nodes own their children exclusively; there is no sharing apart from
//! anonymous function bodies (see [`AnonFuncNode`]) and no parent links.

mod access;
mod collections;
mod display;
mod leaf;
mod ops;

use exl_stack::ensure_sufficient_stack;
use exl_value::Value;

pub use access::{AnonFuncNode, CallKind, ClosureNode, FunctionNode, GetAttrNode};
pub use collections::{ArgumentsNode, ArrayNode};
pub use leaf::{ConstantNode, NameNode, NullCoalescedNameNode};
pub use ops::{BetweenNode, BinaryNode, ConditionalNode, NullCoalesceNode, UnaryNode};

use crate::operators::{BinaryOp, UnaryOp};

/// Expression tree node.
#[derive(Clone, Debug)]
pub enum Node {
    Constant(ConstantNode),
    Name(NameNode),
    NullCoalescedName(NullCoalescedNameNode),
    Array(ArrayNode),
    Unary(UnaryNode),
    Binary(BinaryNode),
    Between(BetweenNode),
    Conditional(ConditionalNode),
    NullCoalesce(NullCoalesceNode),
    GetAttr(GetAttrNode),
    Function(FunctionNode),
    Closure(ClosureNode),
    AnonFunc(AnonFuncNode),
}

// Constructors

impl Node {
    pub fn constant(value: impl Into<Value>) -> Self {
        Node::Constant(ConstantNode::new(value))
    }

    /// Unquoted string constant (member names, identifier-like keys).
    pub fn identifier(name: &str) -> Self {
        Node::Constant(ConstantNode::identifier(name))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Node::Name(NameNode::new(name))
    }

    pub fn null_coalesced_name(name: impl Into<String>) -> Self {
        Node::NullCoalescedName(NullCoalescedNameNode::new(name))
    }

    pub fn unary(op: UnaryOp, node: Node) -> Self {
        Node::Unary(UnaryNode {
            op,
            node: Box::new(node),
        })
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary(BinaryNode {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn between(node: Node, min: Node, max: Node) -> Self {
        Node::Between(BetweenNode {
            node: Box::new(node),
            min: Box::new(min),
            max: Box::new(max),
        })
    }

    pub fn conditional(condition: Node, then: Node, otherwise: Node) -> Self {
        Node::Conditional(ConditionalNode {
            condition: Box::new(condition),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    pub fn null_coalesce(left: Node, right: Node) -> Self {
        Node::NullCoalesce(NullCoalesceNode::new(left, right))
    }

    /// `node.name`
    pub fn property(node: Node, name: &str) -> Self {
        Node::GetAttr(GetAttrNode::new(
            node,
            Node::identifier(name),
            ArgumentsNode::new(),
            CallKind::Property,
        ))
    }

    /// `node?.name`
    pub fn null_safe_property(node: Node, name: &str) -> Self {
        Node::GetAttr(GetAttrNode::new(
            node,
            Node::Constant(ConstantNode::identifier(name).null_safe()),
            ArgumentsNode::new(),
            CallKind::Property,
        ))
    }

    /// `node.name(args)`
    pub fn method(node: Node, name: &str, arguments: ArgumentsNode) -> Self {
        Node::GetAttr(GetAttrNode::new(
            node,
            Node::identifier(name),
            arguments,
            CallKind::Method,
        ))
    }

    /// `node?.name(args)`
    pub fn null_safe_method(node: Node, name: &str, arguments: ArgumentsNode) -> Self {
        Node::GetAttr(GetAttrNode::new(
            node,
            Node::Constant(ConstantNode::identifier(name).null_safe()),
            arguments,
            CallKind::Method,
        ))
    }

    /// `node[key]`
    pub fn index(node: Node, key: Node) -> Self {
        Node::GetAttr(GetAttrNode::new(
            node,
            key,
            ArgumentsNode::new(),
            CallKind::ArrayIndex,
        ))
    }

    pub fn function(name: impl Into<String>, arguments: ArgumentsNode) -> Self {
        Node::Function(FunctionNode {
            name: name.into(),
            arguments,
        })
    }

    pub fn closure(name: impl Into<String>, arguments: ArgumentsNode) -> Self {
        Node::Closure(ClosureNode {
            name: name.into(),
            arguments,
        })
    }

    pub fn anon_func<S: Into<String>>(
        params: impl IntoIterator<Item = S>,
        body: Option<Node>,
    ) -> Self {
        Node::AnonFunc(AnonFuncNode::new(params, body))
    }

    /// Kind name used in diagnostics and the debug tree.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Constant(_) => "ConstantNode",
            Node::Name(_) => "NameNode",
            Node::NullCoalescedName(_) => "NullCoalescedNameNode",
            Node::Array(_) => "ArrayNode",
            Node::Unary(_) => "UnaryNode",
            Node::Binary(_) => "BinaryNode",
            Node::Between(_) => "BetweenNode",
            Node::Conditional(_) => "ConditionalNode",
            Node::NullCoalesce(_) => "NullCoalesceNode",
            Node::GetAttr(_) => "GetAttrNode",
            Node::Function(_) => "FunctionNode",
            Node::Closure(_) => "ClosureNode",
            Node::AnonFunc(_) => "AnonFuncNode",
        }
    }
}

impl From<ArrayNode> for Node {
    fn from(array: ArrayNode) -> Self {
        Node::Array(array)
    }
}

impl From<ConstantNode> for Node {
    fn from(constant: ConstantNode) -> Self {
        Node::Constant(constant)
    }
}

// Null-coalesce annotation

impl Node {
    /// Mark the left-hand access chain of every `??` in the tree.
    ///
    /// Idempotent. Trees built through [`NullCoalesceNode::new`] are
    /// already marked; this pass exists for trees whose operands were
    /// assembled elsewhere and for re-checking a prepared tree.
    pub fn annotate_null_coalesce(&mut self) {
        ensure_sufficient_stack(|| {
            if let Node::NullCoalesce(coalesce) = self {
                annotate_chain(&mut coalesce.left);
            }
            self.for_each_child_mut(&mut Node::annotate_null_coalesce);
        });
    }

    fn for_each_child_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        match self {
            Node::Constant(_) | Node::Name(_) | Node::NullCoalescedName(_) => {}
            Node::Array(array) => {
                for (key, value) in &mut array.pairs {
                    f(key);
                    f(value);
                }
            }
            Node::Unary(unary) => f(&mut unary.node),
            Node::Binary(binary) => {
                f(&mut binary.left);
                f(&mut binary.right);
            }
            Node::Between(between) => {
                f(&mut between.node);
                f(&mut between.min);
                f(&mut between.max);
            }
            Node::Conditional(conditional) => {
                f(&mut conditional.condition);
                f(&mut conditional.then);
                f(&mut conditional.otherwise);
            }
            Node::NullCoalesce(coalesce) => {
                f(&mut coalesce.left);
                f(&mut coalesce.right);
            }
            Node::GetAttr(get_attr) => {
                f(&mut get_attr.node);
                f(&mut get_attr.attribute);
                get_attr.arguments.values_mut().for_each(&mut *f);
            }
            Node::Function(FunctionNode { arguments, .. })
            | Node::Closure(ClosureNode { arguments, .. }) => {
                arguments.values_mut().for_each(&mut *f);
            }
            Node::AnonFunc(anon) => {
                if let Some(body) = &mut anon.body {
                    f(std::sync::Arc::make_mut(body));
                }
            }
        }
    }
}

/// Mark `node` and every access reachable from it through access nodes.
///
/// Stops at the first non-access node: `a.b[c.d] ?? x` marks `a.b[...]`,
/// `a.b` and `c.d`, but not accesses nested inside call arguments.
pub(crate) fn annotate_chain(node: &mut Node) {
    if let Node::GetAttr(get_attr) = node {
        get_attr.mark_null_coalesce();
        ensure_sufficient_stack(|| {
            annotate_chain(&mut get_attr.node);
            annotate_chain(&mut get_attr.attribute);
        });
    }
}
