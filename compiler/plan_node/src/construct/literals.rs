//! Literal factories.
//!
//! Children are checked with exact type equality, not convertibility.

use crate::data::DataValue;
use crate::env::Environment;
use crate::error::NodeError;
use crate::id::{NodeId, RuntimeNode};
use crate::kind::Kind;
use crate::node::{CallableLiteral, CallableState, LiteralData, TypeData};

fn wrong_kind(context: &'static str, expected: Kind, found: &TypeData) -> NodeError {
    NodeError::KindMismatch {
        context,
        expected: expected.name(),
        found: found.kind().name(),
    }
}

fn check_count(context: &'static str, expected: usize, found: usize) -> Result<(), NodeError> {
    if expected == found {
        Ok(())
    } else {
        Err(NodeError::WrongChildCount {
            context,
            expected,
            found,
        })
    }
}

impl Environment {
    /// A data literal of type `ty`, which must be a data type whose slot
    /// matches the value.
    pub fn data_literal(&mut self, ty: NodeId, value: DataValue) -> Result<NodeId, NodeError> {
        let expected = match self.expect_type(ty, "data literal")? {
            TypeData::Data(data) => data.slot(),
            other => return Err(wrong_kind("data literal", Kind::Data, other)),
        };
        let found = value.slot();
        if expected != found {
            return Err(NodeError::DataValueMismatch { expected, found });
        }
        if matches!(value, DataValue::Bytes { .. }) && found.is_inline() {
            return Err(NodeError::BytesForInlineSlot { slot: found });
        }
        self.alloc_literal(LiteralData::Data(value), ty)
    }

    /// A data literal with a fresh type for the value's slot.
    pub fn data_value(&mut self, value: DataValue) -> Result<NodeId, NodeError> {
        let ty = self.data_type(value.slot())?;
        self.data_literal(ty, value)
    }

    /// A struct literal with one item per member, in member order.
    ///
    /// No items yields [`Environment::empty_struct`].
    pub fn struct_literal(
        &mut self,
        ty: NodeId,
        items: &[RuntimeNode],
    ) -> Result<NodeId, NodeError> {
        let member_types: Vec<NodeId> = match self.expect_type(ty, "struct literal")? {
            TypeData::Struct(members) => members.iter().map(|m| m.ty).collect(),
            other => return Err(wrong_kind("struct literal", Kind::Struct, other)),
        };
        check_count("struct literal", member_types.len(), items.len())?;
        if items.is_empty() {
            return Ok(self.empty_struct());
        }
        let items = self.check_children("struct literal", items, &member_types)?;
        self.alloc_literal(LiteralData::Struct(items.into()), ty)
    }

    /// A tuple literal. No items yields [`Environment::empty_tuple`].
    pub fn tuple_literal(&mut self, ty: NodeId, items: &[RuntimeNode]) -> Result<NodeId, NodeError> {
        let element_types = match self.expect_type(ty, "tuple literal")? {
            TypeData::Tuple(elements) => elements.to_vec(),
            other => return Err(wrong_kind("tuple literal", Kind::Tuple, other)),
        };
        check_count("tuple literal", element_types.len(), items.len())?;
        if items.is_empty() {
            return Ok(self.empty_tuple());
        }
        let items = self.check_children("tuple literal", items, &element_types)?;
        self.alloc_literal(LiteralData::Tuple(items.into()), ty)
    }

    /// A list literal of list type `ty`.
    ///
    /// Items of `Void` type are accepted in any list and stand for filtered
    /// entries: once resolved they are dropped by freezing.
    pub fn list_literal(&mut self, ty: NodeId, items: &[RuntimeNode]) -> Result<NodeId, NodeError> {
        let item_type = match self.expect_type(ty, "list literal")? {
            TypeData::List(item) => *item,
            other => return Err(wrong_kind("list literal", Kind::List, other)),
        };
        let mut checked = Vec::with_capacity(items.len());
        for (index, &item) in items.iter().enumerate() {
            let found = self.static_type(item)?;
            let item = if self.kind_of(found) == Kind::Void {
                self.freeze_runtime(item)?
            } else {
                self.check_child(item, item_type, "list literal", index)?
            };
            checked.push(item);
        }
        self.alloc_literal(LiteralData::List(checked), ty)
    }

    /// An optional literal: `Some(item)` or empty.
    pub fn optional_literal(
        &mut self,
        ty: NodeId,
        item: Option<RuntimeNode>,
    ) -> Result<NodeId, NodeError> {
        let item_type = match self.expect_type(ty, "optional literal")? {
            TypeData::Optional(item) => *item,
            other => return Err(wrong_kind("optional literal", Kind::Optional, other)),
        };
        let item = item
            .map(|item| self.check_child(item, item_type, "optional literal", 0))
            .transpose()?;
        self.alloc_literal(LiteralData::Optional(item), ty)
    }

    /// A dict literal from (key, payload) pairs.
    pub fn dict_literal(
        &mut self,
        ty: NodeId,
        entries: &[(RuntimeNode, RuntimeNode)],
    ) -> Result<NodeId, NodeError> {
        let (key_type, payload_type) = match self.expect_type(ty, "dict literal")? {
            TypeData::Dict { key, payload } => (*key, *payload),
            other => return Err(wrong_kind("dict literal", Kind::Dict, other)),
        };
        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, &(key, payload))| {
                Ok((
                    self.check_child(key, key_type, "dict key", index)?,
                    self.check_child(payload, payload_type, "dict payload", index)?,
                ))
            })
            .collect::<Result<Box<[_]>, NodeError>>()?;
        self.alloc_literal(LiteralData::Dict(entries), ty)
    }

    /// A pending callable applied to one input per argument.
    pub fn callable(&mut self, ty: NodeId, inputs: &[RuntimeNode]) -> Result<NodeId, NodeError> {
        let arguments = self.callable_signature(ty)?.arguments.to_vec();
        check_count("callable inputs", arguments.len(), inputs.len())?;
        let inputs = self.check_children("callable input", inputs, &arguments)?;
        self.alloc_literal(
            LiteralData::Callable(CallableLiteral {
                state: CallableState::Pending {
                    inputs: inputs.into(),
                },
                unique_id: 0,
            }),
            ty,
        )
    }

    /// A callable that is already resolved to `result`.
    pub fn callable_with_result(
        &mut self,
        ty: NodeId,
        result: RuntimeNode,
    ) -> Result<NodeId, NodeError> {
        let return_type = self.return_type(ty)?;
        let result = self.check_child(result, return_type, "callable result", 0)?;
        self.alloc_literal(
            LiteralData::Callable(CallableLiteral {
                state: CallableState::Resolved { result },
                unique_id: 0,
            }),
            ty,
        )
    }

    /// An `Any` literal, optionally filled later by
    /// [`Environment::set_any_item`].
    pub fn any_literal(&mut self, item: Option<RuntimeNode>) -> Result<NodeId, NodeError> {
        let item = match item {
            Some(item) => {
                self.ensure_owned(item.node())?;
                Some(self.freeze_runtime(item)?)
            }
            None => None,
        };
        let ty = self.any_type();
        self.alloc_literal(LiteralData::Any(item), ty)
    }

    /// Alternative `index` of variant type `ty`, holding `item`.
    pub fn variant_literal(
        &mut self,
        ty: NodeId,
        item: RuntimeNode,
        index: u32,
    ) -> Result<NodeId, NodeError> {
        let alternatives = self.variant_alternatives(ty)?;
        let expected = alternatives.get(index as usize).copied().ok_or(
            NodeError::VariantIndexOutOfRange {
                index,
                count: alternatives.len(),
            },
        )?;
        let item = self.check_child(item, expected, "variant literal", index as usize)?;
        self.alloc_literal(LiteralData::Variant { item, index }, ty)
    }

    fn check_children(
        &self,
        context: &'static str,
        items: &[RuntimeNode],
        expected: &[NodeId],
    ) -> Result<Vec<RuntimeNode>, NodeError> {
        items
            .iter()
            .zip(expected)
            .enumerate()
            .map(|(index, (&item, &ty))| self.check_child(item, ty, context, index))
            .collect()
    }
}
