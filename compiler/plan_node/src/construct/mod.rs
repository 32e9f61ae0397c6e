//! Node factories.
//!
//! Every factory validates its arguments before allocating, so a node that
//! exists in an [`Environment`] is well formed. Literal factories also
//! freeze the runtime children they store.

mod literals;
mod types;

use crate::env::Environment;
use crate::error::NodeError;
use crate::id::{NodeId, RuntimeNode};
use crate::node::{LiteralData, NodeData};

/// Description of a callable type, consumed by
/// [`Environment::callable_type`].
///
/// ```ignore
/// let sig = CallableSignature::new("Add", i32_ty)
///     .arg(i32_ty)
///     .arg(opt_i32_ty)
///     .optional_args(1);
/// let add = env.callable_type(&sig)?;
/// ```
#[derive(Clone, Debug)]
pub struct CallableSignature {
    pub(crate) name: String,
    pub(crate) return_type: NodeId,
    pub(crate) arguments: Vec<NodeId>,
    pub(crate) optional_args: u32,
    pub(crate) payload: Option<NodeId>,
    pub(crate) merge_disabled: bool,
}

impl CallableSignature {
    pub fn new(name: impl Into<String>, return_type: NodeId) -> Self {
        Self {
            name: name.into(),
            return_type,
            arguments: Vec::new(),
            optional_args: 0,
            payload: None,
            merge_disabled: false,
        }
    }

    #[must_use]
    pub fn arg(mut self, ty: NodeId) -> Self {
        self.arguments.push(ty);
        self
    }

    #[must_use]
    pub fn args(mut self, tys: impl IntoIterator<Item = NodeId>) -> Self {
        self.arguments.extend(tys);
        self
    }

    /// Mark the last `count` arguments as omissible.
    #[must_use]
    pub fn optional_args(mut self, count: u32) -> Self {
        self.optional_args = count;
        self
    }

    #[must_use]
    pub fn payload(mut self, node: NodeId) -> Self {
        self.payload = Some(node);
        self
    }

    /// Never merge two instances of this callable.
    #[must_use]
    pub fn merge_disabled(mut self) -> Self {
        self.merge_disabled = true;
        self
    }
}

impl Environment {
    /// Ensure `node` is a type of this environment.
    fn check_type(&self, node: NodeId, context: &'static str) -> Result<(), NodeError> {
        self.expect_type(node, context).map(|_| ())
    }

    /// Ensure a literal child has exactly type `expected`, and freeze it.
    fn check_child(
        &self,
        child: RuntimeNode,
        expected: NodeId,
        context: &'static str,
        index: usize,
    ) -> Result<RuntimeNode, NodeError> {
        let found = self.static_type(child)?;
        if !self.is_same_type(found, expected) {
            return Err(NodeError::ChildTypeMismatch {
                context,
                index,
                expected: self.format_node(expected),
                found: self.format_node(found),
            });
        }
        self.freeze_runtime(child)
    }

    /// Allocate a literal and freeze it.
    pub(crate) fn alloc_literal(
        &mut self,
        data: LiteralData,
        ty: NodeId,
    ) -> Result<NodeId, NodeError> {
        let node = self.alloc(NodeData::Literal(data), ty)?;
        self.freeze(node)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests;
