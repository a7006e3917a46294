//! Ordered keyed collections.
//!
//! `ArrayValue` is the single collection type of the language: an
//! insertion-ordered map from integer-or-string keys to values. A "list"
//! is just an array whose keys are exactly `0..n` in order.

use std::fmt;

use indexmap::IndexMap;

use super::{Number, Value};
use crate::errors::{illegal_offset, ExprResult};

/// Normalized array key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    /// Normalize a string key.
    ///
    /// Canonical decimal integers (`"0"`, `"-5"`, but not `"05"`, `"+5"`,
    /// or `"-0"`) become integer keys.
    pub fn from_str_key(text: &str) -> Self {
        match canonical_int(text) {
            Some(n) => ArrayKey::Int(n),
            None => ArrayKey::Str(text.to_string()),
        }
    }

    /// Normalize an evaluated value into a key.
    ///
    /// Booleans become 0/1, null becomes `""`, floats truncate toward
    /// zero. Arrays, objects, callables, and non-finite floats are not
    /// valid keys.
    pub fn from_value(value: &Value) -> ExprResult<Self> {
        match value {
            Value::Int(n) => Ok(ArrayKey::Int(*n)),
            Value::Str(s) => Ok(ArrayKey::from_str_key(s)),
            Value::Bool(b) => Ok(ArrayKey::Int(i64::from(*b))),
            Value::Null => Ok(ArrayKey::Str(String::new())),
            Value::Float(f) if f.is_finite() => Ok(ArrayKey::Int(Number::Float(*f).as_i64())),
            _ => Err(illegal_offset(&value.debug_type())),
        }
    }

    /// The key as a runtime value.
    pub fn to_value(&self) -> Value {
        match self {
            ArrayKey::Int(n) => Value::Int(*n),
            ArrayKey::Str(s) => Value::string(s.as_str()),
        }
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(n) => write!(f, "{n}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(n: i64) -> Self {
        ArrayKey::Int(n)
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        ArrayKey::from_str_key(s)
    }
}

fn canonical_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => digits.len() == text.len(),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    if canonical {
        text.parse().ok()
    } else {
        None
    }
}

/// Insertion-ordered keyed collection.
#[derive(Clone, Default)]
pub struct ArrayValue {
    entries: IndexMap<ArrayKey, Value>,
    next_index: i64,
}

impl ArrayValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list keyed `0..n`.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut array = ArrayValue::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: ArrayKey, value: Value) {
        if let ArrayKey::Int(n) = key {
            if n >= self.next_index {
                self.next_index = n.saturating_add(1);
            }
        }
        self.entries.insert(key, value);
    }

    /// Append under the next free integer key.
    pub fn push(&mut self, value: Value) {
        let key = ArrayKey::Int(self.next_index);
        self.insert(key, value);
    }

    pub fn get(&self, key: &ArrayKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &ArrayKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, ArrayKey, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, ArrayKey, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, ArrayKey, Value> {
        self.entries.values()
    }

    /// Whether the keys are exactly the integers `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .zip(0_i64..)
            .all(|(key, expected)| *key == ArrayKey::Int(expected))
    }

    /// Union: every key of `self`, plus the keys of `other` not already present.
    pub fn union(&self, other: &ArrayValue) -> ArrayValue {
        let mut result = self.clone();
        for (key, value) in other.iter() {
            if !result.contains_key(key) {
                result.insert(key.clone(), value.clone());
            }
        }
        result
    }
}

impl PartialEq for ArrayValue {
    /// Order-sensitive, strictly-typed equality.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl fmt::Debug for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl FromIterator<(ArrayKey, Value)> for ArrayValue {
    fn from_iter<I: IntoIterator<Item = (ArrayKey, Value)>>(iter: I) -> Self {
        let mut array = ArrayValue::new();
        for (key, value) in iter {
            array.insert(key, value);
        }
        array
    }
}

impl<'a> IntoIterator for &'a ArrayValue {
    type Item = (&'a ArrayKey, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, ArrayKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
