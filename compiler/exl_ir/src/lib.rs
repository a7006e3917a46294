//! Exl IR - the expression tree shared by every driver.
//!
//! A tree is built once (normally by a parser living outside this
//! workspace) and then handed to exactly one driver:
//!
//! - the evaluator (`exl_eval`), producing a `Value`
//! - the compiler (`exl_codegen`), producing host source
//! - the printer (`exl_fmt`), producing expression text
//!
//! `Node` is a closed sum type, so each driver is an exhaustive `match`
//! and adding a variant fails to compile until all three handle it.
//!
//! # Null-coalesce annotation
//!
//! The one piece of post-construction state is the `is_null_coalesce`
//! flag on [`GetAttrNode`]. [`NullCoalesceNode::new`] sets it on the
//! access chain of its left operand, and [`Node::annotate_null_coalesce`]
//! re-applies it over a whole tree. Both are idempotent.

mod flags;
mod node;
mod operators;

pub use flags::ConstFlags;
pub use node::{
    AnonFuncNode, ArgumentsNode, ArrayNode, BetweenNode, BinaryNode, CallKind, ClosureNode,
    ConditionalNode, ConstantNode, FunctionNode, GetAttrNode, NameNode, Node,
    NullCoalesceNode, NullCoalescedNameNode, UnaryNode,
};
pub use operators::{BinaryOp, Spelling, UnaryOp};
