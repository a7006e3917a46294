//! Tests for binary operator implementations.

use exl_ir::{BinaryOp, Spelling};
use exl_value::{ErrorCategory, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::operators::evaluate_binary;

fn eval(left: impl Into<Value>, op: BinaryOp, right: impl Into<Value>) -> Value {
    evaluate_binary(&left.into(), &right.into(), op).unwrap()
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::Int).collect())
}

#[test]
fn test_int_arithmetic() {
    assert_eq!(eval(2_i64, BinaryOp::Add, 3_i64), Value::Int(5));
    assert_eq!(eval(5_i64, BinaryOp::Sub, 3_i64), Value::Int(2));
    assert_eq!(eval(2_i64, BinaryOp::Mul, 3_i64), Value::Int(6));
    assert_eq!(eval(7_i64, BinaryOp::Mod, 2_i64), Value::Int(1));
    assert_eq!(eval(-7_i64, BinaryOp::Mod, 2_i64), Value::Int(-1));
    assert_eq!(eval(2_i64, BinaryOp::Pow, 10_i64), Value::Int(1024));
}

#[test]
fn test_int_overflow_widens_to_float() {
    assert_eq!(
        eval(i64::MAX, BinaryOp::Add, 1_i64),
        Value::Float(9_223_372_036_854_775_808.0)
    );
    assert_eq!(eval(2_i64, BinaryOp::Pow, 64_i64), Value::Float(18_446_744_073_709_551_616.0));
}

#[test]
fn test_mixed_arithmetic_is_float() {
    assert_eq!(eval(1_i64, BinaryOp::Add, 0.5), Value::Float(1.5));
    assert_eq!(eval("3", BinaryOp::Mul, "1.5"), Value::Float(4.5));
    assert_eq!(eval(2_i64, BinaryOp::Pow, -1_i64), Value::Float(0.5));
}

#[test]
fn test_division() {
    assert_eq!(eval(6_i64, BinaryOp::Div, 3_i64), Value::Int(2));
    assert_eq!(eval(7_i64, BinaryOp::Div, 2_i64), Value::Float(3.5));
    assert_eq!(eval(0_i64, BinaryOp::Div, 1_i64), Value::Int(0));
    assert_eq!(
        eval(i64::MIN, BinaryOp::Div, -1_i64),
        Value::Float(9_223_372_036_854_775_808.0)
    );
}

#[test]
fn test_division_by_zero() {
    let err = evaluate_binary(&Value::Int(1), &Value::Int(0), BinaryOp::Div).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arithmetic);
    assert_eq!(err.message, "Division by zero.");

    let err = evaluate_binary(&Value::Float(1.0), &Value::Float(0.0), BinaryOp::Div).unwrap_err();
    assert_eq!(err.message, "Division by zero.");
}

#[test]
fn test_modulo_by_zero() {
    let err = evaluate_binary(&Value::Int(1), &Value::Int(0), BinaryOp::Mod).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arithmetic);
    assert_eq!(err.message, "Modulo by zero.");
    assert_eq!(eval(i64::MIN, BinaryOp::Mod, -1_i64), Value::Int(0));
}

#[test]
fn test_non_numeric_operand() {
    let err = evaluate_binary(&Value::string("abc"), &Value::Int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);
    assert_eq!(err.message, "Unsupported operand types: string + int");
}

#[test]
fn test_array_union() {
    let left = Value::map([("a", Value::Int(1))]);
    let right = Value::map([("a", Value::Int(2)), ("b", Value::Int(3))]);
    assert_eq!(
        evaluate_binary(&left, &right, BinaryOp::Add).unwrap(),
        Value::map([("a", Value::Int(1)), ("b", Value::Int(3))])
    );

    let err = evaluate_binary(&left, &Value::Int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(err.message, "Unsupported operand types: array + int");
}

#[test]
fn test_concat() {
    assert_eq!(eval("a", BinaryOp::Concat, 1_i64), Value::string("a1"));
    assert_eq!(eval(1.5, BinaryOp::Concat, true), Value::string("1.51"));
    assert_eq!(eval(Value::Null, BinaryOp::Concat, "x"), Value::string("x"));

    let err =
        evaluate_binary(&ints(&[1]), &Value::string("x"), BinaryOp::Concat).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_bitwise() {
    assert_eq!(eval(6_i64, BinaryOp::BitAnd, 3_i64), Value::Int(2));
    assert_eq!(eval(6_i64, BinaryOp::BitOr, 3_i64), Value::Int(7));
    assert_eq!(eval(6_i64, BinaryOp::BitXor, 3_i64), Value::Int(5));
    assert_eq!(eval(1_i64, BinaryOp::Shl, 4_i64), Value::Int(16));
    assert_eq!(eval(-16_i64, BinaryOp::Shr, 2_i64), Value::Int(-4));
}

#[test]
fn test_shift_edges() {
    assert_eq!(eval(1_i64, BinaryOp::Shl, 64_i64), Value::Int(0));
    assert_eq!(eval(-1_i64, BinaryOp::Shr, 100_i64), Value::Int(-1));
    assert_eq!(eval(5_i64, BinaryOp::Shr, 100_i64), Value::Int(0));

    let err = evaluate_binary(&Value::Int(1), &Value::Int(-1), BinaryOp::Shl).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arithmetic);
    assert_eq!(err.message, "Bit shift by negative number.");
}

#[test]
fn test_loose_and_strict_equality() {
    assert_eq!(eval("1", BinaryOp::Equal, 1_i64), Value::Bool(true));
    assert_eq!(eval("1", BinaryOp::Identical, 1_i64), Value::Bool(false));
    assert_eq!(eval("1", BinaryOp::NotIdentical, 1_i64), Value::Bool(true));
    assert_eq!(eval(1_i64, BinaryOp::NotEqual, 1.0), Value::Bool(false));
    assert_eq!(eval(1_i64, BinaryOp::Identical, 1.0), Value::Bool(false));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(1_i64, BinaryOp::Less, 2_i64), Value::Bool(true));
    assert_eq!(eval("10", BinaryOp::Greater, "9"), Value::Bool(true));
    assert_eq!(eval("b", BinaryOp::Greater, "a"), Value::Bool(true));
    assert_eq!(eval(2_i64, BinaryOp::LessEqual, 2.0), Value::Bool(true));
    assert_eq!(eval(2_i64, BinaryOp::GreaterEqual, 3_i64), Value::Bool(false));
    assert_eq!(eval(f64::NAN, BinaryOp::Less, 1_i64), Value::Bool(false));
    assert_eq!(eval(f64::NAN, BinaryOp::GreaterEqual, 1_i64), Value::Bool(false));
}

#[test]
fn test_membership_is_strict() {
    let haystack = Value::list(vec![Value::Int(1), Value::string("2")]);
    assert_eq!(
        evaluate_binary(&Value::Int(1), &haystack, BinaryOp::In).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(&Value::Int(2), &haystack, BinaryOp::In).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_binary(&Value::Int(2), &haystack, BinaryOp::NotIn).unwrap(),
        Value::Bool(true)
    );

    let err = evaluate_binary(&Value::Int(1), &Value::string("1"), BinaryOp::In).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_string_tests() {
    assert_eq!(eval("haystack", BinaryOp::Contains, "st"), Value::Bool(true));
    assert_eq!(eval("haystack", BinaryOp::StartsWith, "hay"), Value::Bool(true));
    assert_eq!(eval("haystack", BinaryOp::EndsWith, "hay"), Value::Bool(false));
    assert_eq!(eval(12_345_i64, BinaryOp::StartsWith, 12_i64), Value::Bool(true));
}

#[test]
fn test_matches_yields_int() {
    assert_eq!(eval("abc", BinaryOp::Matches, "/^a/"), Value::Int(1));
    assert_eq!(eval("abc", BinaryOp::Matches, "/^b/"), Value::Int(0));
}

#[test]
fn test_range() {
    assert_eq!(eval(1_i64, BinaryOp::Range, 4_i64), ints(&[1, 2, 3, 4]));
    assert_eq!(eval(3_i64, BinaryOp::Range, 1_i64), ints(&[3, 2, 1]));
    assert_eq!(eval(5_i64, BinaryOp::Range, 5_i64), ints(&[5]));
}

#[test]
fn test_range_too_large() {
    let err =
        evaluate_binary(&Value::Int(0), &Value::Int(i64::MAX), BinaryOp::Range).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);

    let err =
        evaluate_binary(&Value::Int(i64::MIN), &Value::Int(i64::MAX), BinaryOp::Range).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);
}

#[test]
fn test_logical_on_values() {
    for spelling in [Spelling::Word, Spelling::Symbol] {
        assert_eq!(eval(1_i64, BinaryOp::And(spelling), "0"), Value::Bool(false));
        assert_eq!(eval(0_i64, BinaryOp::Or(spelling), "a"), Value::Bool(true));
    }
}

proptest! {
    #[test]
    fn add_matches_checked_add(a in any::<i64>(), b in any::<i64>()) {
        let result = evaluate_binary(&Value::Int(a), &Value::Int(b), BinaryOp::Add).unwrap();
        match a.checked_add(b) {
            Some(sum) => prop_assert_eq!(result, Value::Int(sum)),
            None => prop_assert!(matches!(result, Value::Float(_))),
        }
    }

    #[test]
    fn range_length(a in -500_i64..500, b in -500_i64..500) {
        let result = evaluate_binary(&Value::Int(a), &Value::Int(b), BinaryOp::Range).unwrap();
        let len = result.as_array().map(exl_value::ArrayValue::len).unwrap();
        prop_assert_eq!(len as u64, a.abs_diff(b) + 1);
    }

    #[test]
    fn exact_division_stays_int(a in -10_000_i64..10_000, b in 1_i64..100) {
        let product = Value::Int(a * b);
        let result = evaluate_binary(&product, &Value::Int(b), BinaryOp::Div).unwrap();
        prop_assert_eq!(result, Value::Int(a));
    }
}
