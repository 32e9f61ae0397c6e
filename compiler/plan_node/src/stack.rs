//! Stack growth for recursive graph walks.
//!
//! Structural equality, convertibility and formatting recurse along child
//! links. Plans produced by rewrite passes can nest deeply enough to exhaust
//! the default thread stack, so those walks run under `ensure_sufficient_stack`.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each additional stack segment.
const GROWTH: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    let _ = (RED_ZONE, GROWTH);
    f()
}
