//! Host objects and callables.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::{ArrayKey, Value};
use crate::errors::ExprResult;

/// An opaque object supplied by the host.
///
/// Property reads return `None` for a missing property; the evaluator
/// turns that into `null`. `method` resolves an invocable member; a
/// `None` there is an access error at the call site.
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Class name used in diagnostics.
    fn class_name(&self) -> &str;

    /// Read a named property.
    fn property(&self, name: &str) -> Option<Value>;

    /// Resolve an invocable member.
    fn method(&self, _name: &str) -> Option<CallableValue> {
        None
    }

    /// Whether `object[key]` is supported.
    fn is_indexable(&self) -> bool {
        false
    }

    /// Keyed read for indexable objects.
    fn offset(&self, _key: &ArrayKey) -> Option<Value> {
        None
    }
}

/// Shared handle to a host object. Equality is identity.
#[derive(Clone)]
pub struct ObjectValue(Arc<dyn HostObject>);

impl ObjectValue {
    pub fn new(object: impl HostObject + 'static) -> Self {
        ObjectValue(Arc::new(object))
    }

    pub fn from_arc(object: Arc<dyn HostObject>) -> Self {
        ObjectValue(object)
    }

    pub fn get(&self) -> &dyn HostObject {
        &*self.0
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&a.0), Arc::as_ptr(&b.0))
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        ObjectValue::ptr_eq(self, other)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Native function signature behind a [`CallableValue`].
pub type NativeFn = dyn Fn(&[Value]) -> ExprResult + Send + Sync;

/// A callable value. Equality is identity.
#[derive(Clone)]
pub struct CallableValue {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl CallableValue {
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        CallableValue {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> ExprResult {
        (self.func)(args)
    }
}

impl PartialEq for CallableValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

impl fmt::Debug for CallableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

/// A plain property bag with optional methods.
///
/// The stock `HostObject` for hosts that do not bring their own types.
pub struct PlainObject {
    class: String,
    properties: IndexMap<String, Value>,
    methods: IndexMap<String, CallableValue>,
}

impl PlainObject {
    pub fn new(class: impl Into<String>) -> Self {
        PlainObject {
            class: class.into(),
            properties: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> ExprResult + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let callable = CallableValue::new(name.as_str(), func);
        self.methods.insert(name, callable);
        self
    }
}

impl Default for PlainObject {
    fn default() -> Self {
        PlainObject::new("stdClass")
    }
}

impl HostObject for PlainObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn method(&self, name: &str) -> Option<CallableValue> {
        self.methods.get(name).cloned()
    }
}

impl fmt::Debug for PlainObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&self.class)
            .field("properties", &self.properties)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
