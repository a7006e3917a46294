//! Property, method, and index access.
//!
//! An access chain is walked receiver-first. `?.` on a null receiver and
//! any null receiver inside a `??` left operand stop the chain: the rest of
//! the chain is skipped and the whole access is `null`. That stop travels
//! up as [`Reach::ShortCircuited`] rather than through node state, so a
//! tree can be evaluated concurrently.

use std::borrow::Cow;

use exl_ir::{CallKind, GetAttrNode, Node};
use exl_stack::ensure_sufficient_stack;
use exl_value::errors::{
    item_of_non_array, method_not_callable, method_of_non_object, property_of_non_object,
};
use exl_value::{ArrayKey, ExprResult, Value};

use crate::evaluator::Evaluator;

/// Outcome of one step along an access chain.
pub(crate) enum Reach {
    Value(Value),
    /// A null-safe or null-coalesced link hit `null`.
    ShortCircuited,
}

impl Evaluator<'_> {
    /// Evaluate an access receiver, keeping chain short-circuits intact.
    fn reach(&self, node: &Node) -> ExprResult<Reach> {
        let _depth = self.limit.enter()?;
        ensure_sufficient_stack(|| match node {
            Node::GetAttr(get_attr) => self.get_attr(get_attr),
            other => self.eval_node(other).map(Reach::Value),
        })
    }

    pub(crate) fn get_attr(&self, get_attr: &GetAttrNode) -> ExprResult<Reach> {
        let receiver = match self.reach(&get_attr.node)? {
            Reach::Value(value) => value,
            Reach::ShortCircuited => return Ok(Reach::ShortCircuited),
        };
        let coalesce = get_attr.is_null_coalesce();
        if receiver.is_null() && (coalesce || get_attr.is_null_safe()) {
            return Ok(Reach::ShortCircuited);
        }

        match get_attr.kind {
            CallKind::Property => {
                let name = self.member_name(get_attr)?;
                match &receiver {
                    Value::Object(object) => Ok(Reach::Value(
                        object.get().property(&name).unwrap_or(Value::Null),
                    )),
                    _ if coalesce => Ok(Reach::Value(Value::Null)),
                    _ => Err(property_of_non_object(&name, &describe(&get_attr.node))),
                }
            }
            CallKind::Method => {
                let name = self.member_name(get_attr)?;
                let object = match &receiver {
                    Value::Object(object) => object,
                    _ if coalesce => return Ok(Reach::Value(Value::Null)),
                    _ => return Err(method_of_non_object(&name, &describe(&get_attr.node))),
                };
                let Some(method) = object.get().method(&name) else {
                    return Err(method_not_callable(&name, object.get().class_name()));
                };
                let args = self.eval_arguments(&get_attr.arguments)?;
                tracing::debug!(method = %name, class = object.get().class_name(), "calling method");
                self.call_out(|| method.call(&args)).map(Reach::Value)
            }
            CallKind::ArrayIndex => {
                let indexable = match &receiver {
                    Value::Array(_) => true,
                    Value::Object(object) => object.get().is_indexable(),
                    _ => false,
                };
                if !indexable {
                    return if coalesce {
                        Ok(Reach::Value(Value::Null))
                    } else {
                        Err(item_of_non_array(&describe(&get_attr.node)))
                    };
                }
                let key = ArrayKey::from_value(&self.eval(&get_attr.attribute)?)?;
                let item = match &receiver {
                    Value::Array(array) => array.get(&key).cloned(),
                    Value::Object(object) => object.get().offset(&key),
                    _ => None,
                };
                Ok(Reach::Value(item.unwrap_or(Value::Null)))
            }
        }
    }

    /// Identifier attributes name the member directly; anything else is
    /// evaluated and converted to a string.
    fn member_name<'n>(&self, get_attr: &'n GetAttrNode) -> ExprResult<Cow<'n, str>> {
        if let Some(name) = get_attr.member_name() {
            return Ok(Cow::Borrowed(name));
        }
        let value = self.eval(&get_attr.attribute)?;
        Ok(Cow::Owned(value.to_host_string()?.into_owned()))
    }
}

/// Printed form of a receiver expression for diagnostics.
fn describe(node: &Node) -> String {
    exl_fmt::dump(node).unwrap_or_else(|_| node.kind_name().to_string())
}
