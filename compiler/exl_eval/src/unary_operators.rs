//! Unary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for unary operations. The operator
//! set is fixed, so pattern matching is preferred over trait objects.

use exl_ir::UnaryOp;
use exl_value::errors::unsupported_operand;
use exl_value::{ExprError, ExprResult, Number, Value};

/// Evaluate a unary operation using direct pattern matching.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> ExprResult {
    match op {
        UnaryOp::Not(_) => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::Pos => numeric(value, op).map(Value::from_number),
        UnaryOp::Neg => match numeric(value, op)? {
            Number::Int(n) => Ok(n
                .checked_neg()
                .map_or(Value::Float(-Number::Int(n).as_f64()), Value::Int)),
            Number::Float(f) => Ok(Value::Float(-f)),
        },
        UnaryOp::BitNot => match value {
            Value::Int(n) => Ok(Value::Int(!*n)),
            Value::Float(f) => Ok(Value::Int(!Number::Float(*f).as_i64())),
            _ => Err(invalid_unary_op(value, op)),
        },
    }
}

fn numeric(value: &Value, op: UnaryOp) -> ExprResult<Number> {
    value.to_number().ok_or_else(|| invalid_unary_op(value, op))
}

/// Create an error for invalid unary operations.
#[cold]
fn invalid_unary_op(value: &Value, op: UnaryOp) -> ExprError {
    unsupported_operand(op.as_symbol(), &value.debug_type())
}
