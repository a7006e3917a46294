//! The tree-walking evaluator.
//!
//! Each node kind maps to one arm of [`Evaluator::eval_node`]. Operators
//! with short-circuit or lazy semantics (`and`, `or`, `?:`, `??`) decide
//! here which children run; everything else evaluates its operands in
//! declaration order and hands them to the operator tables.

use std::cmp::Ordering;

use exl_ir::{ArrayNode, BetweenNode, BinaryNode, BinaryOp, Node};
use exl_stack::{ensure_sufficient_stack, NestingLimit, DEFAULT_MAX_DEPTH};
use exl_value::compare::loose_compare;
use exl_value::{ArrayKey, ArrayValue, Bindings, ExprResult, FunctionRegistry, Value};

use crate::access::Reach;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

/// Evaluates trees against one function registry and one set of bindings.
///
/// Both mappings are read-only for the whole walk. The evaluator itself
/// only tracks nesting depth, so build one per evaluation (or reuse one on
/// a single thread).
pub struct Evaluator<'a> {
    pub(crate) functions: &'a FunctionRegistry,
    pub(crate) bindings: &'a Bindings,
    pub(crate) limit: NestingLimit,
}

impl<'a> Evaluator<'a> {
    pub fn new(functions: &'a FunctionRegistry, bindings: &'a Bindings) -> Self {
        Self::with_max_depth(functions, bindings, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(
        functions: &'a FunctionRegistry,
        bindings: &'a Bindings,
        max_depth: usize,
    ) -> Self {
        Self::with_limit(functions, bindings, NestingLimit::new(max_depth))
    }

    pub(crate) fn with_limit(
        functions: &'a FunctionRegistry,
        bindings: &'a Bindings,
        limit: NestingLimit,
    ) -> Self {
        Evaluator {
            functions,
            bindings,
            limit,
        }
    }

    /// Evaluate a tree to a value.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = node.kind_name()))]
    pub fn evaluate(&self, node: &Node) -> ExprResult {
        self.eval(node)
    }

    /// One recursive step: depth accounting plus stack growth.
    pub(crate) fn eval(&self, node: &Node) -> ExprResult {
        let _depth = self.limit.enter()?;
        ensure_sufficient_stack(|| self.eval_node(node))
    }

    pub(crate) fn eval_node(&self, node: &Node) -> ExprResult {
        match node {
            Node::Constant(constant) => Ok(constant.value.clone()),
            Node::Name(name) => self.bindings.lookup(&name.name).cloned(),
            Node::NullCoalescedName(name) => {
                Ok(self.bindings.get(&name.name).cloned().unwrap_or(Value::Null))
            }
            Node::Array(array) => self.eval_array(array).map(Value::array),
            Node::Unary(unary) => evaluate_unary(&self.eval(&unary.node)?, unary.op),
            Node::Binary(binary) => self.eval_binary(binary),
            Node::Between(between) => self.eval_between(between),
            Node::Conditional(conditional) => {
                if self.eval(&conditional.condition)?.is_truthy() {
                    self.eval(&conditional.then)
                } else {
                    self.eval(&conditional.otherwise)
                }
            }
            Node::NullCoalesce(coalesce) => {
                let left = self.eval(coalesce.left())?;
                if left.is_null() {
                    self.eval(coalesce.right())
                } else {
                    Ok(left)
                }
            }
            Node::GetAttr(get_attr) => match self.get_attr(get_attr)? {
                Reach::Value(value) => Ok(value),
                Reach::ShortCircuited => Ok(Value::Null),
            },
            Node::Function(call) => self.call_function(call),
            Node::Closure(call) => self.call_closure(call),
            Node::AnonFunc(anon) => Ok(self.anon_func(anon)),
        }
    }

    /// Keys then values, in declaration order; duplicate keys keep the
    /// first position and the last value.
    fn eval_array(&self, array: &ArrayNode) -> ExprResult<ArrayValue> {
        let mut out = ArrayValue::new();
        for (key, value) in array.pairs() {
            let key = ArrayKey::from_value(&self.eval(key)?)?;
            let value = self.eval(value)?;
            out.insert(key, value);
        }
        Ok(out)
    }

    fn eval_binary(&self, binary: &BinaryNode) -> ExprResult {
        match binary.op {
            BinaryOp::And(_) => {
                let left = self.eval(&binary.left)?.is_truthy();
                Ok(Value::Bool(left && self.eval(&binary.right)?.is_truthy()))
            }
            BinaryOp::Or(_) => {
                let left = self.eval(&binary.left)?.is_truthy();
                Ok(Value::Bool(left || self.eval(&binary.right)?.is_truthy()))
            }
            op => {
                let left = self.eval(&binary.left)?;
                let right = self.eval(&binary.right)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }

    /// The subject is evaluated once.
    fn eval_between(&self, between: &BetweenNode) -> ExprResult {
        let value = self.eval(&between.node)?;
        let min = self.eval(&between.min)?;
        let max = self.eval(&between.max)?;
        let above_min = matches!(
            loose_compare(&value, &min),
            Some(Ordering::Greater | Ordering::Equal)
        );
        let below_max = matches!(
            loose_compare(&value, &max),
            Some(Ordering::Less | Ordering::Equal)
        );
        Ok(Value::Bool(above_min && below_max))
    }
}

/// Evaluate a tree with the default depth limit.
pub fn evaluate(node: &Node, functions: &FunctionRegistry, bindings: &Bindings) -> ExprResult {
    Evaluator::new(functions, bindings).evaluate(node)
}
