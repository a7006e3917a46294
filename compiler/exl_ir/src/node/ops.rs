//! Operator nodes.

use crate::operators::{BinaryOp, UnaryOp};

use super::{annotate_chain, Node};

#[derive(Clone, Debug)]
pub struct UnaryNode {
    pub op: UnaryOp,
    pub node: Box<Node>,
}

#[derive(Clone, Debug)]
pub struct BinaryNode {
    pub op: BinaryOp,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

/// `node between min and max`, both bounds inclusive.
#[derive(Clone, Debug)]
pub struct BetweenNode {
    pub node: Box<Node>,
    pub min: Box<Node>,
    pub max: Box<Node>,
}

/// `condition ? then : otherwise`.
#[derive(Clone, Debug)]
pub struct ConditionalNode {
    pub condition: Box<Node>,
    pub then: Box<Node>,
    pub otherwise: Box<Node>,
}

/// `left ?? right`.
///
/// Construction marks the access chain on the left so that evaluating it
/// yields `null` instead of failing on a missing link. The operands are
/// read-only afterwards so the marking cannot be bypassed.
#[derive(Clone, Debug)]
pub struct NullCoalesceNode {
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}

impl NullCoalesceNode {
    pub fn new(left: Node, right: Node) -> Self {
        let mut left = Box::new(left);
        annotate_chain(&mut left);
        NullCoalesceNode {
            left,
            right: Box::new(right),
        }
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }
}
