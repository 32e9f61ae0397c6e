//! Double dispatch over node kinds.

use rustc_hash::FxHashSet;

use crate::data::DataValue;
use crate::env::Environment;
use crate::id::{NodeId, RuntimeNode};
use crate::node::{CallableLiteral, LiteralData, NodeData, TypeData};

/// Callbacks for each node kind. Every method defaults to doing nothing.
///
/// Types go to [`NodeVisitor::visit_type`]; literals go to the method named
/// after their kind.
#[allow(unused_variables)]
pub trait NodeVisitor {
    fn visit_type(&mut self, env: &Environment, node: NodeId, ty: &TypeData) {}

    fn visit_void(&mut self, env: &Environment, node: NodeId) {}

    fn visit_null(&mut self, env: &Environment, node: NodeId) {}

    fn visit_empty_list(&mut self, env: &Environment, node: NodeId) {}

    fn visit_empty_dict(&mut self, env: &Environment, node: NodeId) {}

    fn visit_data(&mut self, env: &Environment, node: NodeId, value: &DataValue) {}

    fn visit_struct(&mut self, env: &Environment, node: NodeId, items: &[RuntimeNode]) {}

    fn visit_list(&mut self, env: &Environment, node: NodeId, items: &[RuntimeNode]) {}

    fn visit_optional(&mut self, env: &Environment, node: NodeId, item: Option<RuntimeNode>) {}

    fn visit_dict(
        &mut self,
        env: &Environment,
        node: NodeId,
        entries: &[(RuntimeNode, RuntimeNode)],
    ) {
    }

    fn visit_callable(&mut self, env: &Environment, node: NodeId, callable: &CallableLiteral) {}

    fn visit_any(&mut self, env: &Environment, node: NodeId, item: Option<RuntimeNode>) {}

    fn visit_tuple(&mut self, env: &Environment, node: NodeId, items: &[RuntimeNode]) {}

    fn visit_variant(&mut self, env: &Environment, node: NodeId, item: RuntimeNode, index: u32) {}
}

impl Environment {
    /// Dispatch `node` to the matching visitor method.
    ///
    /// # Panics
    /// Panics if `node` belongs to another environment.
    pub fn accept<V: NodeVisitor + ?Sized>(&self, node: NodeId, visitor: &mut V) {
        match self.data(node) {
            NodeData::Type(ty) => visitor.visit_type(self, node, ty),
            NodeData::Literal(literal) => match literal {
                LiteralData::Void => visitor.visit_void(self, node),
                LiteralData::Null => visitor.visit_null(self, node),
                LiteralData::EmptyList => visitor.visit_empty_list(self, node),
                LiteralData::EmptyDict => visitor.visit_empty_dict(self, node),
                LiteralData::Data(value) => visitor.visit_data(self, node, value),
                LiteralData::Struct(items) => visitor.visit_struct(self, node, items),
                LiteralData::List(items) => visitor.visit_list(self, node, items),
                LiteralData::Optional(item) => visitor.visit_optional(self, node, *item),
                LiteralData::Dict(entries) => visitor.visit_dict(self, node, entries),
                LiteralData::Callable(callable) => visitor.visit_callable(self, node, callable),
                LiteralData::Any(item) => visitor.visit_any(self, node, *item),
                LiteralData::Tuple(items) => visitor.visit_tuple(self, node, items),
                LiteralData::Variant { item, index } => {
                    visitor.visit_variant(self, node, *item, *index);
                }
            },
        }
    }

    /// Visit every node reachable from `roots` once, parents before children.
    ///
    /// Links followed are the same as for rebasing: child types, a literal's
    /// type, and runtime children.
    pub fn visit_reachable<V: NodeVisitor + ?Sized>(&self, roots: &[NodeId], visitor: &mut V) {
        let mut seen = FxHashSet::default();
        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if !self.owns(node) || !seen.insert(node) {
                continue;
            }
            self.accept(node, visitor);
            stack.extend(self.links(node).into_iter().rev());
        }
    }
}
