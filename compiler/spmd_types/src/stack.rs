//! Stack growth for recursive type walks.
//!
//! Types nest without a fixed bound (arrays of arrays, pointers to
//! pointers, structs of structs), and most operations here recurse
//! structurally. On native targets the stack is grown on demand via
//! `stacker`; on wasm the closure runs directly.

/// Grow the stack if less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is close to exhaustion.
#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
