//! Loose and strict comparison.
//!
//! Two equality relations coexist and must never be conflated:
//!
//! - [`strict_equals`] (`===`): same variant and same value, no coercion.
//! - [`loose_equals`] (`==`): value-coercing comparison following the host
//!   rules in [`loose_compare`].
//!
//! # Loose comparison table
//!
//! Checked top to bottom:
//!
//! | Left / Right             | Rule                                             |
//! |--------------------------|--------------------------------------------------|
//! | null / string            | null becomes `""`, then string rules             |
//! | bool or null / anything  | both sides by truthiness                         |
//! | string / string          | numeric if both numeric, else byte order         |
//! | number / number          | numeric                                          |
//! | number / string          | numeric if string is numeric, else byte order of the number's text |
//! | array / array            | shorter is smaller; same keys compared pairwise  |
//! | array / anything         | array is greater                                 |
//! | object / object          | equal only when identical                        |

use std::cmp::Ordering;

use crate::value::{float_to_string, parse_numeric, ArrayValue, Number, Value};

/// `===`.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(y) == Some(Ordering::Equal),
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => **x == **y,
        (Value::Object(x), Value::Object(y)) => x == y,
        (Value::Callable(x), Value::Callable(y)) => x == y,
        _ => false,
    }
}

/// `==`.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    loose_compare(a, b) == Some(Ordering::Equal)
}

/// Ordering under the loose comparison table.
///
/// `None` means the operands are incomparable (NaN, distinct objects,
/// arrays with disjoint keys): every relational operator is false.
pub fn loose_compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, Value::Str(s)) => Some(compare_strings("", s)),
        (Value::Str(s), Value::Null) => Some(compare_strings(s, "")),
        (Value::Bool(_) | Value::Null, _) | (_, Value::Bool(_) | Value::Null) => {
            Some(a.is_truthy().cmp(&b.is_truthy()))
        }
        (Value::Str(x), Value::Str(y)) => Some(compare_strings(x, y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            compare_numbers(a.to_number()?, b.to_number()?)
        }
        (Value::Int(_) | Value::Float(_), Value::Str(s)) => {
            let n = a.to_number()?;
            match parse_numeric(s) {
                Some(m) => compare_numbers(n, m),
                None => Some(number_text(n).as_str().cmp(s.as_str())),
            }
        }
        (Value::Str(_), Value::Int(_) | Value::Float(_)) => {
            loose_compare(b, a).map(Ordering::reverse)
        }
        (Value::Array(x), Value::Array(y)) => compare_arrays(x, y),
        (Value::Array(_), _) => Some(Ordering::Greater),
        (_, Value::Array(_)) => Some(Ordering::Less),
        (Value::Object(x), Value::Object(y)) => (x == y).then_some(Ordering::Equal),
        (Value::Callable(x), Value::Callable(y)) => (x == y).then_some(Ordering::Equal),
        _ => None,
    }
}

fn compare_strings(x: &str, y: &str) -> Ordering {
    match (parse_numeric(x), parse_numeric(y)) {
        (Some(n), Some(m)) => compare_numbers(n, m).unwrap_or_else(|| x.cmp(y)),
        _ => x.cmp(y),
    }
}

fn compare_numbers(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Some(x.cmp(&y)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

fn number_text(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::Float(f) => float_to_string(f),
    }
}

fn compare_arrays(x: &ArrayValue, y: &ArrayValue) -> Option<Ordering> {
    match x.len().cmp(&y.len()) {
        Ordering::Equal => {}
        other => return Some(other),
    }
    for (key, left) in x {
        let right = y.get(key)?;
        match loose_compare(left, right)? {
            Ordering::Equal => {}
            other => return Some(other),
        }
    }
    Some(Ordering::Equal)
}
