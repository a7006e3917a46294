//! Host literals for constant values.

use exl_stack::ensure_sufficient_stack;
use exl_value::errors::unprintable;
use exl_value::{float_literal, ArrayKey, ExprResult, Value};

/// Double-quoted host string literal.
///
/// Escapes NUL, tab, `"`, `$` and `\`, the set the host's interpolating
/// string syntax needs.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\0' => out.push_str("\\000"),
            '\t' => out.push_str("\\t"),
            '"' | '$' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Host literal for a constant value.
///
/// Arrays always spell their keys (`[0 => "a", "k" => 1]`). Objects and
/// callables have no literal form.
pub fn repr(value: &Value) -> ExprResult<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        // The host reads `-9223372036854775808` as a negated float.
        Value::Int(i64::MIN) => Ok("PHP_INT_MIN".to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(x) => Ok(float_literal(*x)),
        Value::Str(s) => Ok(string_literal(s)),
        Value::Array(array) => ensure_sufficient_stack(|| {
            let mut entries = Vec::with_capacity(array.len());
            for (key, item) in array.iter() {
                let key = match key {
                    ArrayKey::Int(n) => repr(&Value::Int(*n))?,
                    ArrayKey::Str(s) => string_literal(s),
                };
                entries.push(format!("{key} => {}", repr(item)?));
            }
            Ok(format!("[{}]", entries.join(", ")))
        }),
        Value::Object(_) | Value::Callable(_) => Err(unprintable(&value.debug_type())),
    }
}
