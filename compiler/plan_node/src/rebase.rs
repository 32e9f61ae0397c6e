//! Clone-on-write rebasing and link rewriting.
//!
//! A [`RebaseMap`] records which nodes have been replaced. Cloning a node
//! looks only at its direct links (child types, runtime children, and a
//! literal's own type): with none replaced the node itself is returned, else
//! a copy pointing at the replacements is allocated. [`Environment::rebase`]
//! drives this bottom-up so replacements propagate to every ancestor.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::env::Environment;
use crate::error::NodeError;
use crate::id::{NodeId, RuntimeNode};
use crate::node::NodeData;

/// Side table from replaced nodes to their replacements.
///
/// One map describes one rebasing pass. Reuse it for an unrelated pass only
/// after [`RebaseMap::clear`].
#[derive(Clone, Debug, Default)]
pub struct RebaseMap {
    map: FxHashMap<NodeId, NodeId>,
}

impl RebaseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `old` is replaced by `new`.
    pub fn stamp(&mut self, old: NodeId, new: NodeId) {
        self.map.insert(old, new);
    }

    pub fn get(&self, old: NodeId) -> Option<NodeId> {
        self.map.get(&old).copied()
    }

    pub fn contains(&self, old: NodeId) -> bool {
        self.map.contains_key(&old)
    }

    /// Forget every replacement.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn resolve(&self, node: NodeId) -> NodeId {
        self.get(node).unwrap_or(node)
    }

    fn resolve_runtime(&self, rn: RuntimeNode) -> RuntimeNode {
        self.get(rn.node()).map_or(rn, |new| rn.retarget(new))
    }
}

impl Environment {
    /// Direct links of a node: child types, plus a literal's type and the
    /// nodes its runtime children point at.
    pub(crate) fn links(&self, node: NodeId) -> SmallVec<[NodeId; 4]> {
        match self.data(node) {
            NodeData::Type(t) => t.children(),
            NodeData::Literal(l) => {
                let mut out = SmallVec::new();
                out.push(self.type_of(node));
                out.extend(l.children().into_iter().map(RuntimeNode::node));
                out
            }
        }
    }

    fn check_replacements(&self, node: NodeId, map: &RebaseMap) -> Result<bool, NodeError> {
        let mut dirty = false;
        for link in self.links(node) {
            if let Some(new) = map.get(link) {
                self.ensure_owned(new)?;
                dirty = true;
            }
        }
        Ok(dirty)
    }

    /// Copy `node` with its replaced links substituted, or return it as is
    /// when none of its direct links is in `map`.
    ///
    /// Copies are not re-validated. Literal copies are frozen and keep the
    /// callable unique id.
    pub fn clone_on_write(&mut self, node: NodeId, map: &RebaseMap) -> Result<NodeId, NodeError> {
        self.ensure_owned(node)?;
        if !self.check_replacements(node, map)? {
            return Ok(node);
        }
        match self.data(node) {
            NodeData::Type(t) => {
                let data = t.map_children(|c| map.resolve(c));
                let ty = self.type_of(node);
                self.alloc(NodeData::Type(data), ty)
            }
            NodeData::Literal(l) => {
                let data = l.map_children(|c| map.resolve_runtime(c));
                let ty = map.resolve(self.type_of(node));
                self.alloc_literal(data, ty)
            }
        }
    }

    /// Rewrite the links of `node` in place.
    ///
    /// Each replacement must be structurally equal to the node it replaces;
    /// debug builds assert this.
    pub fn update_links(&mut self, node: NodeId, map: &RebaseMap) -> Result<(), NodeError> {
        self.ensure_owned(node)?;
        if !self.check_replacements(node, map)? {
            return Ok(());
        }
        if cfg!(debug_assertions) {
            for link in self.links(node) {
                if let Some(new) = map.get(link) {
                    debug_assert!(
                        self.node_equals(link, new),
                        "link {link:?} of {node:?} replaced by unequal {new:?}"
                    );
                }
            }
        }

        let updated = match self.data(node) {
            NodeData::Type(t) => NodeData::Type(t.map_children(|c| map.resolve(c))),
            NodeData::Literal(l) => NodeData::Literal(l.map_children(|c| map.resolve_runtime(c))),
        };
        if !updated.is_type() {
            let ty = map.resolve(self.type_of(node));
            self.set_type_of(node, ty);
        }
        *self.data_mut(node) = updated;
        tracing::trace!(?node, "links updated");
        Ok(())
    }

    /// Rebase every node reachable from `roots` against `map`.
    ///
    /// Nodes are visited children first. Each is cloned with
    /// [`Environment::clone_on_write`], and every copy is recorded in `map`
    /// so its parents see it. Nodes already in `map` are treated as
    /// replaced and not descended into. Returns the rebased roots in order.
    #[tracing::instrument(level = "trace", skip_all, fields(roots = roots.len()))]
    pub fn rebase(
        &mut self,
        roots: &[NodeId],
        map: &mut RebaseMap,
    ) -> Result<Vec<NodeId>, NodeError> {
        for &root in roots {
            self.ensure_owned(root)?;
        }

        let mut visited = FxHashSet::default();
        let mut stack: Vec<(NodeId, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
        let mut order = Vec::new();
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            if map.contains(node) || !visited.insert(node) {
                continue;
            }
            stack.push((node, true));
            for link in self.links(node).into_iter().rev() {
                if !visited.contains(&link) {
                    stack.push((link, false));
                }
            }
        }

        let mut cloned = 0usize;
        for &node in &order {
            let new = self.clone_on_write(node, map)?;
            if new != node {
                map.stamp(node, new);
                cloned += 1;
            }
        }
        tracing::debug!(visited = order.len(), cloned, "rebase complete");

        Ok(roots.iter().map(|&r| map.resolve(r)).collect())
    }
}
