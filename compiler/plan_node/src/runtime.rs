//! Runtime-node resolution and freezing.
//!
//! A deferred [`RuntimeNode`] stands for the result of a callable literal.
//! Resolution follows `Resolved` callables until it reaches an immediate
//! reference or a callable that is still `Pending`.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::env::Environment;
use crate::error::NodeError;
use crate::id::{NodeId, RuntimeNode};
use crate::kind::Kind;
use crate::node::{CallableLiteral, CallableState, LiteralData, NodeData, TypeData};

impl Environment {
    /// The callable literal behind a deferred reference.
    fn deferred_callable(&self, node: NodeId) -> Result<&CallableLiteral, NodeError> {
        self.ensure_owned(node)?;
        match self.data(node) {
            NodeData::Literal(LiteralData::Callable(c)) => Ok(c),
            _ => Err(NodeError::NotCallable {
                node,
                found: self.kind_of(node).name(),
            }),
        }
    }

    /// Type of the value a runtime node stands for, known before resolution.
    ///
    /// Immediate references have their node's type; deferred references have
    /// the return type of the callable they point at.
    pub fn static_type(&self, rn: RuntimeNode) -> Result<NodeId, NodeError> {
        let node = rn.node();
        self.ensure_owned(node)?;
        if rn.is_immediate() {
            return Ok(self.type_of(node));
        }
        self.deferred_callable(node)?;
        self.return_type(self.type_of(node))
    }

    /// Walk the callable chain to its first immediate or pending link.
    ///
    /// The returned reference is immediate iff the chain is resolved.
    /// Idempotent: freezing a frozen node returns it unchanged.
    pub fn freeze_runtime(&self, rn: RuntimeNode) -> Result<RuntimeNode, NodeError> {
        let mut current = rn;
        while !current.is_immediate() {
            match self.deferred_callable(current.node())?.result() {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(current)
    }

    /// Whether the chain ends in an immediate value.
    pub fn has_value(&self, rn: RuntimeNode) -> Result<bool, NodeError> {
        Ok(self.freeze_runtime(rn)?.is_immediate())
    }

    /// The value at the end of the chain.
    pub fn value(&self, rn: RuntimeNode) -> Result<NodeId, NodeError> {
        let frozen = self.freeze_runtime(rn)?;
        if frozen.is_immediate() {
            Ok(frozen.node())
        } else {
            Err(NodeError::Unresolved {
                node: frozen.node(),
            })
        }
    }

    /// Give a pending callable its result.
    ///
    /// The result must have exactly the callable's return type. The inputs
    /// are dropped and the stored result is frozen; the frozen reference is
    /// returned.
    pub fn set_result(
        &mut self,
        callable: NodeId,
        result: RuntimeNode,
    ) -> Result<RuntimeNode, NodeError> {
        if self.deferred_callable(callable)?.result().is_some() {
            return Err(NodeError::ResultAlreadySet { node: callable });
        }
        self.ensure_owned(result.node())?;

        let expected = self.return_type(self.type_of(callable))?;
        let found = self.static_type(result)?;
        if !self.is_same_type(found, expected) {
            return Err(NodeError::WrongResultType {
                expected: self.format_node(expected),
                found: self.format_node(found),
            });
        }

        let frozen = self.freeze_runtime(result)?;
        if self.reaches(frozen.node(), callable) {
            return Err(NodeError::SelfReferentialResult { node: callable });
        }

        if let NodeData::Literal(LiteralData::Callable(c)) = self.data_mut(callable) {
            c.state = CallableState::Resolved { result: frozen };
        }
        trace!(?callable, result = ?frozen, "callable resolved");
        Ok(frozen)
    }

    /// Caller-assigned identity of a callable literal.
    pub fn unique_id(&self, callable: NodeId) -> Result<u32, NodeError> {
        Ok(self.deferred_callable(callable)?.unique_id)
    }

    /// Assign a callable's identity. Set once; zero means unset.
    pub fn set_unique_id(&mut self, callable: NodeId, id: u32) -> Result<(), NodeError> {
        let current = self.deferred_callable(callable)?.unique_id;
        if current != 0 {
            return Err(NodeError::UniqueIdAlreadySet {
                node: callable,
                current,
            });
        }
        if let NodeData::Literal(LiteralData::Callable(c)) = self.data_mut(callable) {
            c.unique_id = id;
        }
        Ok(())
    }

    /// Fill an empty `Any` literal. Set once.
    pub fn set_any_item(&mut self, any: NodeId, item: RuntimeNode) -> Result<(), NodeError> {
        self.ensure_owned(any)?;
        self.ensure_owned(item.node())?;
        let frozen = self.freeze_runtime(item)?;
        match self.as_literal(any) {
            Some(LiteralData::Any(None)) if self.reaches(frozen.node(), any) => {
                return Err(NodeError::SelfReferentialItem { node: any });
            }
            Some(LiteralData::Any(None)) => {}
            Some(LiteralData::Any(Some(_))) => {
                return Err(NodeError::AnyItemAlreadySet { node: any });
            }
            _ => {
                return Err(NodeError::KindMismatch {
                    context: "set any item",
                    expected: "Any literal",
                    found: self.kind_of(any).name(),
                });
            }
        }
        if let NodeData::Literal(LiteralData::Any(slot)) = self.data_mut(any) {
            *slot = Some(frozen);
        }
        Ok(())
    }

    /// Whether `target` is `from` or reachable from it through node links.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut seen = FxHashSet::default();
        let mut stack = vec![from];
        while let Some(node) = stack.pop() {
            if node == target {
                return true;
            }
            if seen.insert(node) {
                stack.extend(self.links(node));
            }
        }
        false
    }

    /// Freeze every runtime child of a literal in place.
    ///
    /// List literals also drop resolved items whose value is of `Void` type.
    /// Type nodes have nothing to freeze.
    pub fn freeze(&mut self, node: NodeId) -> Result<(), NodeError> {
        self.ensure_owned(node)?;
        let Some(literal) = self.as_literal(node) else {
            return Ok(());
        };

        let frozen = literal
            .children()
            .into_iter()
            .map(|child| self.freeze_runtime(child))
            .collect::<Result<Vec<_>, _>>()?;
        let mut next = frozen.iter().copied();
        let mut updated = literal.map_children(|child| next.next().unwrap_or(child));

        if let LiteralData::List(items) = &mut updated {
            let before = items.len();
            items.retain(|item| !self.is_void_value(*item));
            if items.len() != before {
                trace!(?node, dropped = before - items.len(), "void items compacted");
            }
        }

        *self.data_mut(node) = NodeData::Literal(updated);
        Ok(())
    }

    /// A frozen item that resolved to a value of `Void` type.
    fn is_void_value(&self, item: RuntimeNode) -> bool {
        item.is_immediate() && self.kind_of(self.type_of(item.node())) == Kind::Void
    }

    /// Whether equal instances of `node` may be merged into one.
    ///
    /// False only for callable literals whose type disables merging.
    pub fn is_mergeable(&self, node: NodeId) -> bool {
        match self.data(node) {
            NodeData::Literal(LiteralData::Callable(_)) => !matches!(
                self.as_type(self.type_of(node)),
                Some(TypeData::Callable(c)) if c.merge_disabled
            ),
            _ => true,
        }
    }
}
