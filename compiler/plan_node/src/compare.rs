//! Structural equality and convertibility.
//!
//! All three relations short-circuit on identity and recurse through
//! [`ensure_sufficient_stack`], so deep type graphs cannot overflow the
//! stack. Nodes from another environment are never equal to anything.

use crate::env::Environment;
use crate::id::{NodeId, RuntimeNode};
use crate::node::{CallableState, CallableType, LiteralData, NodeData, TypeData};
use crate::stack::ensure_sufficient_stack;

impl Environment {
    /// Exact structural equality of two types.
    ///
    /// Symmetric and reflexive. Struct member names, tags, callable names and
    /// decimal parameters must all match.
    pub fn is_same_type(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        if !self.owns(a) || !self.owns(b) {
            return false;
        }
        ensure_sufficient_stack(|| self.same_type(a, b))
    }

    fn same_type(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(left), Some(right)) = (self.as_type(a), self.as_type(b)) else {
            return false;
        };
        let same = |x: NodeId, y: NodeId| self.is_same_type(x, y);
        let all_same = |xs: &[NodeId], ys: &[NodeId]| {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(&x, &y)| same(x, y))
        };

        match left {
            TypeData::TypeOfType
            | TypeData::Void
            | TypeData::Null
            | TypeData::EmptyList
            | TypeData::EmptyDict
            | TypeData::Any => left == right,
            TypeData::Data(l) => matches!(right, TypeData::Data(r) if l == r),
            TypeData::Struct(l) => {
                let TypeData::Struct(r) = right else {
                    return false;
                };
                l.len() == r.len()
                    && l.iter()
                        .zip(r.iter())
                        .all(|(x, y)| x.name == y.name && same(x.ty, y.ty))
            }
            TypeData::List(l) => matches!(right, TypeData::List(r) if same(*l, *r)),
            TypeData::Stream(l) => matches!(right, TypeData::Stream(r) if same(*l, *r)),
            TypeData::Flow(l) => matches!(right, TypeData::Flow(r) if same(*l, *r)),
            TypeData::Optional(l) => matches!(right, TypeData::Optional(r) if same(*l, *r)),
            TypeData::Variant(l) => matches!(right, TypeData::Variant(r) if same(*l, *r)),
            TypeData::Tagged { base, tag } => matches!(
                right,
                TypeData::Tagged { base: rb, tag: rt } if tag == rt && same(*base, *rb)
            ),
            TypeData::Block { item, shape } => matches!(
                right,
                TypeData::Block { item: ri, shape: rs } if shape == rs && same(*item, *ri)
            ),
            TypeData::Dict { key, payload } => matches!(
                right,
                TypeData::Dict { key: rk, payload: rp } if same(*key, *rk) && same(*payload, *rp)
            ),
            TypeData::Callable(l) => {
                let TypeData::Callable(r) = right else {
                    return false;
                };
                l.name == r.name
                    && l.merge_disabled == r.merge_disabled
                    && l.optional_args == r.optional_args
                    && all_same(&l.arguments, &r.arguments)
                    && same(l.return_type, r.return_type)
                    && match (l.payload, r.payload) {
                        (None, None) => true,
                        (Some(x), Some(y)) => self.node_equals(x, y),
                        _ => false,
                    }
            }
            TypeData::Tuple(l) => matches!(right, TypeData::Tuple(r) if all_same(l, r)),
            TypeData::Resource { tag } => matches!(right, TypeData::Resource { tag: rt } if tag == rt),
        }
    }

    /// Whether a value of type `from` may be used where `to` is expected.
    ///
    /// Directed and looser than [`Environment::is_same_type`]: callable
    /// names are ignored, and a callable with at least as many optional
    /// arguments converts to one with fewer. With `ignore_tagged`, `Tagged`
    /// wrappers are peeled off both sides at every level.
    pub fn is_convertible_to(&self, from: NodeId, to: NodeId, ignore_tagged: bool) -> bool {
        if !self.owns(from) || !self.owns(to) {
            return false;
        }
        let (from, to) = if ignore_tagged {
            (self.strip_tagged(from), self.strip_tagged(to))
        } else {
            (from, to)
        };
        if from == to {
            return true;
        }
        ensure_sufficient_stack(|| self.convertible(from, to, ignore_tagged))
    }

    fn strip_tagged(&self, mut ty: NodeId) -> NodeId {
        while let Some(TypeData::Tagged { base, .. }) = self.as_type(ty) {
            ty = *base;
        }
        ty
    }

    fn convertible(&self, from: NodeId, to: NodeId, ignore_tagged: bool) -> bool {
        let (Some(left), Some(right)) = (self.as_type(from), self.as_type(to)) else {
            return false;
        };
        let conv = |x: NodeId, y: NodeId| self.is_convertible_to(x, y, ignore_tagged);
        let all_conv = |xs: &[NodeId], ys: &[NodeId]| {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(&x, &y)| conv(x, y))
        };

        match left {
            TypeData::TypeOfType
            | TypeData::Void
            | TypeData::Null
            | TypeData::EmptyList
            | TypeData::EmptyDict
            | TypeData::Any
            | TypeData::Data(_)
            | TypeData::Resource { .. } => left == right,
            TypeData::Struct(l) => {
                let TypeData::Struct(r) = right else {
                    return false;
                };
                l.len() == r.len()
                    && l.iter()
                        .zip(r.iter())
                        .all(|(x, y)| x.name == y.name && conv(x.ty, y.ty))
            }
            TypeData::List(l) => matches!(right, TypeData::List(r) if conv(*l, *r)),
            TypeData::Stream(l) => matches!(right, TypeData::Stream(r) if conv(*l, *r)),
            TypeData::Flow(l) => matches!(right, TypeData::Flow(r) if conv(*l, *r)),
            TypeData::Optional(l) => matches!(right, TypeData::Optional(r) if conv(*l, *r)),
            TypeData::Variant(l) => matches!(right, TypeData::Variant(r) if conv(*l, *r)),
            TypeData::Tagged { base, tag } => matches!(
                right,
                TypeData::Tagged { base: rb, tag: rt } if tag == rt && conv(*base, *rb)
            ),
            TypeData::Block { item, shape } => matches!(
                right,
                TypeData::Block { item: ri, shape: rs } if shape == rs && conv(*item, *ri)
            ),
            TypeData::Dict { key, payload } => matches!(
                right,
                TypeData::Dict { key: rk, payload: rp } if conv(*key, *rk) && conv(*payload, *rp)
            ),
            TypeData::Callable(l) => {
                let TypeData::Callable(r) = right else {
                    return false;
                };
                l.merge_disabled == r.merge_disabled
                    && l.optional_args >= r.optional_args
                    && all_conv(&l.arguments, &r.arguments)
                    && conv(l.return_type, r.return_type)
                    && self.payload_convertible(l, r)
            }
            TypeData::Tuple(l) => matches!(right, TypeData::Tuple(r) if all_conv(l, r)),
        }
    }

    /// A callable without payload converts to any payload; otherwise the
    /// target must carry an equal payload.
    fn payload_convertible(&self, from: &CallableType, to: &CallableType) -> bool {
        match (from.payload, to.payload) {
            (None, _) => true,
            (Some(x), Some(y)) => self.node_equals(x, y),
            (Some(_), None) => false,
        }
    }

    /// Deep structural equality of two nodes.
    ///
    /// Types compare with [`Environment::is_same_type`]. Literals must have
    /// the same type and equal children. Callable literals whose type
    /// disables merging are only equal to themselves.
    pub fn node_equals(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return true;
        }
        if !self.owns(a) || !self.owns(b) {
            return false;
        }
        ensure_sufficient_stack(|| self.equals(a, b))
    }

    /// Same immediacy and equal nodes.
    pub fn runtime_equals(&self, a: RuntimeNode, b: RuntimeNode) -> bool {
        a.is_immediate() == b.is_immediate() && self.node_equals(a.node(), b.node())
    }

    fn equals(&self, a: NodeId, b: NodeId) -> bool {
        let (left, right) = match (self.data(a), self.data(b)) {
            (NodeData::Type(_), NodeData::Type(_)) => return self.same_type(a, b),
            (NodeData::Literal(l), NodeData::Literal(r)) => (l, r),
            _ => return false,
        };
        if !self.is_same_type(self.type_of(a), self.type_of(b)) {
            return false;
        }
        let eq = |x: RuntimeNode, y: RuntimeNode| self.runtime_equals(x, y);
        let all_eq = |xs: &[RuntimeNode], ys: &[RuntimeNode]| {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(&x, &y)| eq(x, y))
        };

        match left {
            LiteralData::Void | LiteralData::Null | LiteralData::EmptyList | LiteralData::EmptyDict => {
                std::mem::discriminant(left) == std::mem::discriminant(right)
            }
            LiteralData::Data(l) => matches!(right, LiteralData::Data(r) if l == r),
            LiteralData::Struct(l) => matches!(right, LiteralData::Struct(r) if all_eq(l, r)),
            LiteralData::Tuple(l) => matches!(right, LiteralData::Tuple(r) if all_eq(l, r)),
            LiteralData::List(l) => matches!(right, LiteralData::List(r) if all_eq(l, r)),
            LiteralData::Optional(l) => match (l, right) {
                (None, LiteralData::Optional(None)) => true,
                (Some(x), LiteralData::Optional(Some(y))) => eq(*x, *y),
                _ => false,
            },
            LiteralData::Any(l) => match (l, right) {
                (Some(x), LiteralData::Any(Some(y))) => eq(*x, *y),
                _ => false,
            },
            LiteralData::Dict(l) => {
                let LiteralData::Dict(r) = right else {
                    return false;
                };
                l.len() == r.len()
                    && l.iter()
                        .zip(r.iter())
                        .all(|(&(lk, lv), &(rk, rv))| eq(lk, rk) && eq(lv, rv))
            }
            LiteralData::Callable(l) => {
                let LiteralData::Callable(r) = right else {
                    return false;
                };
                if !self.is_mergeable(a) {
                    return false;
                }
                match (&l.state, &r.state) {
                    (CallableState::Pending { inputs: li }, CallableState::Pending { inputs: ri }) => {
                        all_eq(li, ri)
                    }
                    (
                        CallableState::Resolved { result: lr },
                        CallableState::Resolved { result: rr },
                    ) => eq(*lr, *rr),
                    _ => false,
                }
            }
            LiteralData::Variant { item, index } => matches!(
                right,
                LiteralData::Variant { item: ri, index: rx } if index == rx && eq(*item, *ri)
            ),
        }
    }
}

#[cfg(test)]
mod tests;
