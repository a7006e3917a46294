//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for binary operations. The operator
//! set is fixed, so pattern matching is preferred over trait objects for
//! exhaustiveness checking.
//!
//! `and`/`or` are handled here on already-evaluated operands; the
//! evaluator short-circuits them before the right operand exists.

use std::cmp::Ordering;

use exl_ir::BinaryOp;
use exl_value::compare::{loose_compare, loose_equals, strict_equals};
use exl_value::errors::{
    division_by_zero, modulo_by_zero, negative_shift, range_too_large, unsupported_operands,
};
use exl_value::{ArrayValue, ExprError, ExprResult, Number, Value};

use crate::matches::match_pattern;

/// Longest list `..` will build.
const MAX_RANGE_LEN: u64 = 1 << 20;

// Operand coercion

#[cold]
fn operand_mismatch(left: &Value, right: &Value, op: BinaryOp) -> ExprError {
    unsupported_operands(op.as_symbol(), &left.debug_type(), &right.debug_type())
}

fn numbers(left: &Value, right: &Value, op: BinaryOp) -> ExprResult<(Number, Number)> {
    match (left.to_number(), right.to_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(operand_mismatch(left, right, op)),
    }
}

fn ints(left: &Value, right: &Value, op: BinaryOp) -> ExprResult<(i64, i64)> {
    let (a, b) = numbers(left, right, op)?;
    Ok((a.as_i64(), b.as_i64()))
}

/// Integer arithmetic that overflows into float arithmetic.
fn arith(
    a: Number,
    b: Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        if let Some(n) = int_op(x, y) {
            return Value::Int(n);
        }
    }
    Value::Float(float_op(a.as_f64(), b.as_f64()))
}

// Direct Dispatch Function

/// Evaluate a binary operation on two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> ExprResult {
    match op {
        BinaryOp::Or(_) => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        BinaryOp::And(_) => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),

        BinaryOp::BitOr => ints(left, right, op).map(|(a, b)| Value::Int(a | b)),
        BinaryOp::BitXor => ints(left, right, op).map(|(a, b)| Value::Int(a ^ b)),
        BinaryOp::BitAnd => ints(left, right, op).map(|(a, b)| Value::Int(a & b)),

        BinaryOp::Equal => Ok(Value::Bool(loose_equals(left, right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!loose_equals(left, right))),
        BinaryOp::Identical => Ok(Value::Bool(strict_equals(left, right))),
        BinaryOp::NotIdentical => Ok(Value::Bool(!strict_equals(left, right))),
        BinaryOp::Less => Ok(ordering_is(left, right, &[Ordering::Less])),
        BinaryOp::Greater => Ok(ordering_is(left, right, &[Ordering::Greater])),
        BinaryOp::LessEqual => Ok(ordering_is(
            left,
            right,
            &[Ordering::Less, Ordering::Equal],
        )),
        BinaryOp::GreaterEqual => Ok(ordering_is(
            left,
            right,
            &[Ordering::Greater, Ordering::Equal],
        )),

        BinaryOp::In => contains_value(left, right, op).map(Value::Bool),
        BinaryOp::NotIn => contains_value(left, right, op).map(|found| Value::Bool(!found)),
        BinaryOp::Contains => {
            let (haystack, needle) = (left.to_host_string()?, right.to_host_string()?);
            Ok(Value::Bool(haystack.contains(needle.as_ref())))
        }
        BinaryOp::StartsWith => {
            let (haystack, needle) = (left.to_host_string()?, right.to_host_string()?);
            Ok(Value::Bool(haystack.starts_with(needle.as_ref())))
        }
        BinaryOp::EndsWith => {
            let (haystack, needle) = (left.to_host_string()?, right.to_host_string()?);
            Ok(Value::Bool(haystack.ends_with(needle.as_ref())))
        }
        BinaryOp::Matches => {
            let (subject, pattern) = (left.to_host_string()?, right.to_host_string()?);
            match_pattern(&pattern, &subject).map(|found| Value::Int(i64::from(found)))
        }

        BinaryOp::Range => {
            let (a, b) = ints(left, right, op)?;
            range(a, b)
        }

        BinaryOp::Add => match (left, right) {
            (Value::Array(a), Value::Array(b)) => Ok(Value::array(a.union(b))),
            (Value::Array(_), _) | (_, Value::Array(_)) => Err(operand_mismatch(left, right, op)),
            _ => {
                let (a, b) = numbers(left, right, op)?;
                Ok(arith(a, b, i64::checked_add, |x, y| x + y))
            }
        },
        BinaryOp::Sub => {
            let (a, b) = numbers(left, right, op)?;
            Ok(arith(a, b, i64::checked_sub, |x, y| x - y))
        }
        BinaryOp::Mul => {
            let (a, b) = numbers(left, right, op)?;
            Ok(arith(a, b, i64::checked_mul, |x, y| x * y))
        }
        BinaryOp::Concat => {
            let mut out = left.to_host_string()?.into_owned();
            out.push_str(&right.to_host_string()?);
            Ok(Value::string(out))
        }
        BinaryOp::Div => {
            let (a, b) = numbers(left, right, op)?;
            divide(a, b)
        }
        BinaryOp::Mod => {
            let (a, b) = ints(left, right, op)?;
            if b == 0 {
                return Err(modulo_by_zero());
            }
            // i64::MIN % -1 is the only overflow, and its remainder is 0.
            Ok(Value::Int(a.checked_rem(b).unwrap_or(0)))
        }
        BinaryOp::Pow => {
            let (a, b) = numbers(left, right, op)?;
            Ok(power(a, b))
        }
        BinaryOp::Shl => {
            let (a, b) = ints(left, right, op)?;
            shift(a, b, |value, bits| value.checked_shl(bits), |_| 0)
        }
        BinaryOp::Shr => {
            let (a, b) = ints(left, right, op)?;
            shift(
                a,
                b,
                |value, bits| value.checked_shr(bits),
                |value| if value < 0 { -1 } else { 0 },
            )
        }
    }
}

fn ordering_is(left: &Value, right: &Value, accepted: &[Ordering]) -> Value {
    Value::Bool(loose_compare(left, right).is_some_and(|ord| accepted.contains(&ord)))
}

/// Strict membership over an array's values.
fn contains_value(needle: &Value, haystack: &Value, op: BinaryOp) -> ExprResult<bool> {
    match haystack {
        Value::Array(array) => Ok(array.values().any(|item| strict_equals(needle, item))),
        _ => Err(operand_mismatch(needle, haystack, op)),
    }
}

/// Exact integer quotients stay integers.
fn divide(a: Number, b: Number) -> ExprResult {
    if b.is_zero() {
        return Err(division_by_zero());
    }
    if let (Number::Int(x), Number::Int(y)) = (a, b) {
        if x.checked_rem(y) == Some(0) {
            if let Some(q) = x.checked_div(y) {
                return Ok(Value::Int(q));
            }
        }
    }
    Ok(Value::Float(a.as_f64() / b.as_f64()))
}

fn power(base: Number, exp: Number) -> Value {
    if let (Number::Int(b), Number::Int(e)) = (base, exp) {
        if let Some(n) = u32::try_from(e).ok().and_then(|e| b.checked_pow(e)) {
            return Value::Int(n);
        }
    }
    Value::Float(base.as_f64().powf(exp.as_f64()))
}

fn shift(
    value: i64,
    bits: i64,
    op: fn(i64, u32) -> Option<i64>,
    saturated: fn(i64) -> i64,
) -> ExprResult {
    if bits < 0 {
        return Err(negative_shift());
    }
    let shifted = u32::try_from(bits).ok().and_then(|bits| op(value, bits));
    Ok(Value::Int(shifted.unwrap_or_else(|| saturated(value))))
}

/// Inclusive integer range, ascending or descending.
fn range(from: i64, to: i64) -> ExprResult {
    let len = from.abs_diff(to).saturating_add(1);
    if len > MAX_RANGE_LEN {
        return Err(range_too_large(len));
    }
    let items: Vec<Value> = if from <= to {
        (from..=to).map(Value::Int).collect()
    } else {
        (to..=from).rev().map(Value::Int).collect()
    };
    Ok(Value::array(ArrayValue::from_values(items)))
}
