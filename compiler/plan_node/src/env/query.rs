//! Typed accessors over type nodes.
//!
//! Each accessor checks the node's kind and reports a
//! [`NodeError::KindMismatch`] naming the accessor when it does not fit.

use super::Environment;
use crate::error::NodeError;
use crate::id::NodeId;
use crate::node::{CallableType, StructMember, TypeData};

fn mismatch(context: &'static str, expected: &'static str, found: &TypeData) -> NodeError {
    NodeError::KindMismatch {
        context,
        expected,
        found: found.kind().name(),
    }
}

fn at<T: Copy>(items: &[T], index: usize, context: &'static str) -> Result<T, NodeError> {
    items.get(index).copied().ok_or(NodeError::IndexOutOfRange {
        context,
        index,
        len: items.len(),
    })
}

impl Environment {
    // === Struct ===

    pub fn struct_members(&self, ty: NodeId) -> Result<&[StructMember], NodeError> {
        match self.expect_type(ty, "struct members")? {
            TypeData::Struct(members) => Ok(members),
            other => Err(mismatch("struct members", "Struct", other)),
        }
    }

    pub fn member_name(&self, ty: NodeId, index: usize) -> Result<&str, NodeError> {
        let member = at(self.struct_members(ty)?, index, "member name")?;
        Ok(self.name_str(member.name))
    }

    pub fn member_type(&self, ty: NodeId, index: usize) -> Result<NodeId, NodeError> {
        Ok(at(self.struct_members(ty)?, index, "member type")?.ty)
    }

    /// Position of the member called `name`, if there is one.
    pub fn find_member_index(&self, ty: NodeId, name: &str) -> Result<Option<usize>, NodeError> {
        let members = self.struct_members(ty)?;
        let Some(name) = self.find_name(name) else {
            return Ok(None);
        };
        Ok(members.iter().position(|m| m.name == name))
    }

    /// Position of the member called `name`, which must exist.
    ///
    /// The error lists every member of the struct.
    pub fn member_index(&self, ty: NodeId, name: &str) -> Result<usize, NodeError> {
        if let Some(index) = self.find_member_index(ty, name)? {
            return Ok(index);
        }
        let known = self
            .struct_members(ty)?
            .iter()
            .map(|m| self.name_str(m.name))
            .collect::<Vec<_>>()
            .join(", ");
        Err(NodeError::MemberNotFound {
            name: name.to_owned(),
            known,
        })
    }

    // === Tuple ===

    pub fn tuple_elements(&self, ty: NodeId) -> Result<&[NodeId], NodeError> {
        match self.expect_type(ty, "tuple elements")? {
            TypeData::Tuple(elements) => Ok(elements),
            other => Err(mismatch("tuple elements", "Tuple", other)),
        }
    }

    pub fn element_type(&self, ty: NodeId, index: usize) -> Result<NodeId, NodeError> {
        at(self.tuple_elements(ty)?, index, "element type")
    }

    // === Callable ===

    pub fn callable_signature(&self, ty: NodeId) -> Result<&CallableType, NodeError> {
        match self.expect_type(ty, "callable signature")? {
            TypeData::Callable(c) => Ok(c),
            other => Err(mismatch("callable signature", "Callable", other)),
        }
    }

    pub fn callable_name(&self, ty: NodeId) -> Result<&str, NodeError> {
        Ok(self.name_str(self.callable_signature(ty)?.name))
    }

    pub fn argument_type(&self, ty: NodeId, index: usize) -> Result<NodeId, NodeError> {
        at(&self.callable_signature(ty)?.arguments, index, "argument type")
    }

    pub fn return_type(&self, ty: NodeId) -> Result<NodeId, NodeError> {
        Ok(self.callable_signature(ty)?.return_type)
    }

    /// Number of trailing arguments a caller may omit.
    pub fn optional_args_count(&self, ty: NodeId) -> Result<u32, NodeError> {
        Ok(self.callable_signature(ty)?.optional_args)
    }

    pub fn callable_payload(&self, ty: NodeId) -> Result<Option<NodeId>, NodeError> {
        Ok(self.callable_signature(ty)?.payload)
    }

    // === Single-child wrappers ===

    /// Item type of a `List`, `Stream`, `Flow`, `Optional` or `Block`.
    pub fn item_type(&self, ty: NodeId) -> Result<NodeId, NodeError> {
        match self.expect_type(ty, "item type")? {
            TypeData::List(item)
            | TypeData::Stream(item)
            | TypeData::Flow(item)
            | TypeData::Optional(item)
            | TypeData::Block { item, .. } => Ok(*item),
            other => Err(mismatch("item type", "List, Stream, Flow, Optional or Block", other)),
        }
    }

    /// Base type and tag text of a `Tagged` type.
    pub fn tagged_base(&self, ty: NodeId) -> Result<(NodeId, &str), NodeError> {
        match self.expect_type(ty, "tagged base")? {
            TypeData::Tagged { base, tag } => Ok((*base, self.name_str(*tag))),
            other => Err(mismatch("tagged base", "Tagged", other)),
        }
    }

    /// Key and payload types of a `Dict`.
    pub fn dict_types(&self, ty: NodeId) -> Result<(NodeId, NodeId), NodeError> {
        match self.expect_type(ty, "dict types")? {
            TypeData::Dict { key, payload } => Ok((*key, *payload)),
            other => Err(mismatch("dict types", "Dict", other)),
        }
    }

    // === Variant ===

    /// The struct or tuple a `Variant` chooses from.
    pub fn variant_underlying(&self, ty: NodeId) -> Result<NodeId, NodeError> {
        match self.expect_type(ty, "variant underlying")? {
            TypeData::Variant(underlying) => Ok(*underlying),
            other => Err(mismatch("variant underlying", "Variant", other)),
        }
    }

    pub fn variant_alternatives_count(&self, ty: NodeId) -> Result<usize, NodeError> {
        let underlying = self.variant_underlying(ty)?;
        match self.expect_type(underlying, "variant alternatives")? {
            TypeData::Struct(members) => Ok(members.len()),
            TypeData::Tuple(elements) => Ok(elements.len()),
            other => Err(mismatch("variant alternatives", "Struct or Tuple", other)),
        }
    }

    /// Types of the alternatives of a `Variant`, in order.
    pub fn variant_alternatives(&self, ty: NodeId) -> Result<Vec<NodeId>, NodeError> {
        let underlying = self.variant_underlying(ty)?;
        match self.expect_type(underlying, "variant alternatives")? {
            TypeData::Struct(members) => Ok(members.iter().map(|m| m.ty).collect()),
            TypeData::Tuple(elements) => Ok(elements.to_vec()),
            other => Err(mismatch("variant alternatives", "Struct or Tuple", other)),
        }
    }
}
