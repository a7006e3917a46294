//! Shared payload handle for strings and arrays.
//!
//! Only the value module can allocate a `Heap`, so every string or array
//! payload enters through a `Value` factory method.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable payload. Clones share the allocation.
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    pub(super) fn new(payload: T) -> Self {
        Heap(Arc::new(payload))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Same allocation, not merely equal contents.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

/// Compares contents.
impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
