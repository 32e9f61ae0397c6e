//! Environment-scoped node handles.
//!
//! A [`NodeId`] is only meaningful inside the [`Environment`](crate::Environment)
//! that allocated it. Each environment draws a fresh [`EnvId`] from a
//! process-wide counter, and every handle carries it, so a handle that
//! escapes into another environment is detected instead of silently aliasing
//! an unrelated slot.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of environment identities. Zero is never handed out.
static NEXT_ENV_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of one environment (one arena generation).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct EnvId(NonZeroU32);

impl EnvId {
    /// Draw an identity distinct from every other live environment.
    ///
    /// The counter wraps after 2^32 - 1 environments, skipping zero.
    pub(crate) fn fresh() -> Self {
        loop {
            let raw = NEXT_ENV_ID.fetch_add(1, Ordering::Relaxed);
            if let Some(id) = NonZeroU32::new(raw) {
                return EnvId(id);
            }
        }
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnvId({})", self.0)
    }
}

impl fmt::Display for EnvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "env#{}", self.0)
    }
}

/// Handle to a node (type or literal) in an environment.
///
/// Copy, 8 bytes. Equality is identity: two handles are equal iff they name
/// the same slot of the same environment. Structural comparison goes through
/// [`Environment::node_equals`](crate::Environment::node_equals) and
/// [`Environment::is_same_type`](crate::Environment::is_same_type).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId {
    env: EnvId,
    index: u32,
}

impl NodeId {
    #[inline]
    pub(crate) const fn new(env: EnvId, index: u32) -> Self {
        Self { env, index }
    }

    /// The environment that allocated this node.
    #[inline]
    pub const fn env(self) -> EnvId {
        self.env
    }

    /// Slot index within the owning environment.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}:{})", self.env.raw(), self.index)
    }
}

/// A reference to a node as seen by a consumer in the plan.
///
/// *Immediate* references point at a directly usable value. *Deferred*
/// references point at a callable literal and stand for that callable's
/// eventual result; they are resolved by walking the callable chain
/// (see [`Environment::freeze_runtime`](crate::Environment::freeze_runtime)).
///
/// The derived `PartialEq` compares handles, not structure.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RuntimeNode {
    node: NodeId,
    immediate: bool,
}

impl RuntimeNode {
    #[inline]
    pub const fn new(node: NodeId, immediate: bool) -> Self {
        Self { node, immediate }
    }

    /// Reference a directly usable value.
    #[inline]
    pub const fn immediate(node: NodeId) -> Self {
        Self::new(node, true)
    }

    /// Reference the future result of a callable.
    #[inline]
    pub const fn deferred(callable: NodeId) -> Self {
        Self::new(callable, false)
    }

    #[inline]
    pub const fn node(self) -> NodeId {
        self.node
    }

    #[inline]
    pub const fn is_immediate(self) -> bool {
        self.immediate
    }

    /// Same immediacy, different target.
    #[inline]
    pub(crate) const fn retarget(self, node: NodeId) -> Self {
        Self::new(node, self.immediate)
    }
}
