//! Type factories.

use super::CallableSignature;
use crate::data::DataSlot;
use crate::env::Environment;
use crate::error::NodeError;
use crate::id::NodeId;
use crate::kind::Kind;
use crate::node::{BlockShape, CallableType, DataType, NodeData, StructMember, TypeData};

impl Environment {
    fn alloc_type(&mut self, data: TypeData) -> Result<NodeId, NodeError> {
        let ty = self.type_of_type();
        self.alloc(NodeData::Type(data), ty)
    }

    // === Data ===

    /// `Data<slot>`. Decimals need [`Environment::decimal_type`].
    pub fn data_type(&mut self, slot: DataSlot) -> Result<NodeId, NodeError> {
        if slot == DataSlot::Decimal {
            return Err(NodeError::DecimalViaDataType);
        }
        self.alloc_type(TypeData::Data(DataType::Plain(slot)))
    }

    /// `Decimal(precision, scale)` with `0 < precision` and `scale <= precision`.
    pub fn decimal_type(&mut self, precision: u8, scale: u8) -> Result<NodeId, NodeError> {
        if precision == 0 || scale > precision {
            return Err(NodeError::InvalidDecimal { precision, scale });
        }
        self.alloc_type(TypeData::Data(DataType::Decimal { precision, scale }))
    }

    // === Struct and tuple ===

    /// A struct type. Members must be listed in strictly increasing name
    /// order (byte order of the text), with no empty names.
    ///
    /// No members yields [`Environment::empty_struct_type`].
    pub fn struct_type(&mut self, members: &[(&str, NodeId)]) -> Result<NodeId, NodeError> {
        if members.is_empty() {
            return Ok(self.empty_struct_type());
        }
        for (i, &(name, ty)) in members.iter().enumerate() {
            if name.is_empty() {
                return Err(NodeError::EmptyMemberName);
            }
            if let Some(&(prev, _)) = i.checked_sub(1).and_then(|p| members.get(p)) {
                if prev >= name {
                    return Err(NodeError::UnsortedMembers {
                        prev: prev.to_owned(),
                        next: name.to_owned(),
                    });
                }
            }
            self.check_type(ty, "struct member")?;
        }
        let members = members
            .iter()
            .map(|&(name, ty)| Ok(StructMember { name: self.intern(name)?, ty }))
            .collect::<Result<Box<[_]>, NodeError>>()?;
        self.alloc_type(TypeData::Struct(members))
    }

    /// A tuple type. No elements yields [`Environment::empty_tuple_type`].
    pub fn tuple_type(&mut self, elements: &[NodeId]) -> Result<NodeId, NodeError> {
        if elements.is_empty() {
            return Ok(self.empty_tuple_type());
        }
        for &ty in elements {
            self.check_type(ty, "tuple element")?;
        }
        self.alloc_type(TypeData::Tuple(elements.into()))
    }

    // === Single-child wrappers ===

    pub fn list_type(&mut self, item: NodeId) -> Result<NodeId, NodeError> {
        self.check_type(item, "list item")?;
        self.alloc_type(TypeData::List(item))
    }

    pub fn stream_type(&mut self, item: NodeId) -> Result<NodeId, NodeError> {
        self.check_type(item, "stream item")?;
        self.alloc_type(TypeData::Stream(item))
    }

    pub fn flow_type(&mut self, item: NodeId) -> Result<NodeId, NodeError> {
        self.check_type(item, "flow item")?;
        self.alloc_type(TypeData::Flow(item))
    }

    pub fn optional_type(&mut self, item: NodeId) -> Result<NodeId, NodeError> {
        self.check_type(item, "optional item")?;
        self.alloc_type(TypeData::Optional(item))
    }

    pub fn tagged_type(&mut self, base: NodeId, tag: &str) -> Result<NodeId, NodeError> {
        self.check_type(base, "tagged base")?;
        let tag = self.intern(tag)?;
        self.alloc_type(TypeData::Tagged { base, tag })
    }

    pub fn block_type(&mut self, item: NodeId, shape: BlockShape) -> Result<NodeId, NodeError> {
        self.check_type(item, "block item")?;
        self.alloc_type(TypeData::Block { item, shape })
    }

    /// A choice over the members of `underlying`, which must be a non-empty
    /// struct or tuple.
    pub fn variant_type(&mut self, underlying: NodeId) -> Result<NodeId, NodeError> {
        let valid = match self.expect_type(underlying, "variant underlying")? {
            TypeData::Struct(members) => !members.is_empty(),
            TypeData::Tuple(elements) => !elements.is_empty(),
            _ => false,
        };
        if !valid {
            return Err(NodeError::InvalidVariantUnderlying {
                found: self.format_node(underlying),
            });
        }
        self.alloc_type(TypeData::Variant(underlying))
    }

    // === Others ===

    /// A dict type. Any type is accepted as key.
    pub fn dict_type(&mut self, key: NodeId, payload: NodeId) -> Result<NodeId, NodeError> {
        self.check_type(key, "dict key")?;
        self.check_type(payload, "dict payload")?;
        self.alloc_type(TypeData::Dict { key, payload })
    }

    pub fn resource_type(&mut self, tag: &str) -> Result<NodeId, NodeError> {
        let tag = self.intern(tag)?;
        self.alloc_type(TypeData::Resource { tag })
    }

    /// A callable type.
    ///
    /// At most all arguments may be optional, and each optional one must be
    /// of `Optional` kind. The payload, if any, may be any node.
    pub fn callable_type(&mut self, sig: &CallableSignature) -> Result<NodeId, NodeError> {
        self.check_type(sig.return_type, "callable return")?;
        for &arg in &sig.arguments {
            self.check_type(arg, "callable argument")?;
        }
        if sig.optional_args as usize > sig.arguments.len() {
            return Err(NodeError::TooManyOptionalArgs {
                optional: sig.optional_args,
                total: sig.arguments.len(),
            });
        }
        let first_optional = sig.arguments.len() - sig.optional_args as usize;
        for (index, &arg) in sig.arguments.iter().enumerate().skip(first_optional) {
            let found = self.kind_of(arg);
            if found != Kind::Optional {
                return Err(NodeError::OptionalArgNotOptional { index, found });
            }
        }
        if let Some(payload) = sig.payload {
            self.ensure_owned(payload)?;
        }

        let name = self.intern(&sig.name)?;
        self.alloc_type(TypeData::Callable(CallableType {
            name,
            return_type: sig.return_type,
            arguments: sig.arguments.as_slice().into(),
            optional_args: sig.optional_args,
            payload: sig.payload,
            merge_disabled: sig.merge_disabled,
        }))
    }
}
