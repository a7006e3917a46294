//! Stack safety utilities for recursive tree drivers.
//!
//! The evaluator, compiler, and printer all recurse once per level of
//! expression nesting. Two mechanisms keep that recursion safe:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand so a
//!   legitimately deep tree never overflows.
//! - [`NestingLimit`] counts the current depth and refuses to go past a
//!   configured maximum, so pathological trees fail with a typed error
//!   instead of consuming unbounded memory.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Usage
//!
//! ```text
//! fn eval(&self, node: &Node) -> ExprResult {
//!     let _depth = self.limit.enter()?;
//!     ensure_sufficient_stack(|| self.eval_node(node))
//! }
//! ```

use std::cell::Cell;
use std::fmt;

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Default maximum nesting depth shared by all drivers.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Ensure sufficient stack space is available before executing `f`.
///
/// On native targets, uses `stacker::maybe_grow` to grow the stack if the
/// remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Returned by [`NestingLimit::enter`] when the maximum depth is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    /// The configured maximum.
    pub limit: usize,
}

impl fmt::Display for DepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expression nesting exceeds the maximum depth of {}.",
            self.limit
        )
    }
}

impl std::error::Error for DepthExceeded {}

/// Per-driver nesting counter.
///
/// A driver owns one limit for the duration of a single walk. Each
/// recursive step calls [`enter`](Self::enter) and holds the returned
/// guard until the step finishes; dropping the guard restores the depth,
/// so early returns through `?` never leak a level.
///
/// Not `Sync`: a limit belongs to one walk on one thread.
#[derive(Debug)]
pub struct NestingLimit {
    max: usize,
    depth: Cell<usize>,
}

impl NestingLimit {
    /// Create a limit allowing at most `max` nested levels.
    pub fn new(max: usize) -> Self {
        NestingLimit {
            max,
            depth: Cell::new(0),
        }
    }

    /// A limit that continues a walk already `depth` levels deep.
    pub fn starting_at(max: usize, depth: usize) -> Self {
        NestingLimit {
            max,
            depth: Cell::new(depth),
        }
    }

    /// The configured maximum depth.
    pub fn max(&self) -> usize {
        self.max
    }

    /// The current depth.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Enter one more level of nesting.
    pub fn enter(&self) -> Result<DepthGuard<'_>, DepthExceeded> {
        let current = self.depth.get();
        if current >= self.max {
            return Err(DepthExceeded { limit: self.max });
        }
        self.depth.set(current + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

impl Default for NestingLimit {
    fn default() -> Self {
        NestingLimit::new(DEFAULT_MAX_DEPTH)
    }
}

/// RAII guard for one nesting level. Restores the depth on drop.
#[must_use = "the depth is released as soon as the guard is dropped"]
pub struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
