//! Runtime values for the expression language.
//!
//! # Heap Enforcement
//!
//! String and array payloads live behind `Heap<T>`, whose constructor is
//! private to this module. Build heap values through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");                          // OK
//! let list = Value::list(vec![Value::Int(1)]);             // OK
//! let obj = Value::object(PlainObject::new("Point"));      // OK
//! ```
//!
//! # Thread Safety
//!
//! Every heap payload is `Arc`-backed and every host hook is `Send + Sync`,
//! so values can be shared between concurrent evaluations.

mod array;
mod heap;
mod number;
mod object;

use std::borrow::Cow;
use std::fmt;

pub use array::{ArrayKey, ArrayValue};
pub use heap::Heap;
pub use number::{float_literal, float_to_string, parse_numeric, Number};
pub use object::{CallableValue, HostObject, NativeFn, ObjectValue, PlainObject};

use crate::compare::strict_equals;
use crate::errors::{not_stringable, ExprResult};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    /// Ordered keyed collection (lists included).
    Array(Heap<ArrayValue>),
    /// Opaque host object.
    Object(ObjectValue),
    /// Callable value (host closure or anonymous function).
    Callable(CallableValue),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(array: ArrayValue) -> Self {
        Value::Array(Heap::new(array))
    }

    /// A list keyed `0..n`.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::array(ArrayValue::from_values(items))
    }

    /// An array from explicit key/value pairs, in order.
    pub fn map<K: Into<ArrayKey>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::array(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[inline]
    pub fn object(object: impl HostObject + 'static) -> Self {
        Value::Object(ObjectValue::new(object))
    }

    #[inline]
    pub fn callable(
        name: &str,
        func: impl Fn(&[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        Value::Callable(CallableValue::new(name, func))
    }

    #[inline]
    pub fn from_number(n: Number) -> Self {
        match n {
            Number::Int(i) => Value::Int(i),
            Number::Float(f) => Value::Float(f),
        }
    }
}

// Value Methods

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness: `null`, `false`, `0`, `0.0`, `""`, `"0"`, and `[]` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s.as_str() == "0"),
            Value::Array(a) => !a.is_empty(),
            Value::Object(_) | Value::Callable(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&CallableValue> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Numeric coercion.
    ///
    /// Bools and null coerce to 0/1; numeric strings parse; arrays,
    /// objects, callables, and non-numeric strings do not coerce.
    pub fn to_number(&self) -> Option<Number> {
        match self {
            Value::Null => Some(Number::Int(0)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => parse_numeric(s),
            Value::Array(_) | Value::Object(_) | Value::Callable(_) => None,
        }
    }

    /// Host string conversion.
    pub fn to_host_string(&self) -> ExprResult<Cow<'_, str>> {
        match self {
            Value::Null | Value::Bool(false) => Ok(Cow::Borrowed("")),
            Value::Bool(true) => Ok(Cow::Borrowed("1")),
            Value::Int(n) => Ok(Cow::Owned(n.to_string())),
            Value::Float(f) => Ok(Cow::Owned(float_to_string(*f))),
            Value::Str(s) => Ok(Cow::Borrowed(s.as_str())),
            Value::Array(_) | Value::Object(_) | Value::Callable(_) => {
                Err(not_stringable(&self.debug_type()))
            }
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Callable(_) => "Closure",
        }
    }

    /// Type name with objects resolved to their class name.
    pub fn debug_type(&self) -> Cow<'static, str> {
        match self {
            Value::Object(o) => Cow::Owned(o.get().class_name().to_string()),
            _ => Cow::Borrowed(self.type_name()),
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    /// Identity semantics (`===`).
    fn eq(&self, other: &Self) -> bool {
        strict_equals(self, other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(a) => write!(f, "Array({a:?})"),
            Value::Object(o) => write!(f, "Object({o:?})"),
            Value::Callable(c) => write!(f, "{c:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
