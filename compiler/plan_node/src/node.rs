//! Node payloads.
//!
//! Every slot in an [`Environment`](crate::Environment) holds one
//! [`NodeData`]: either a [`TypeData`] or a [`LiteralData`]. The node's own
//! type lives in a parallel column, so it is not repeated here.

use smallvec::SmallVec;

use crate::data::{DataSlot, DataValue};
use crate::id::{NodeId, RuntimeNode};
use crate::kind::Kind;
use crate::Name;

/// Inline child list. Most nodes have at most four direct children.
pub(crate) type Children = SmallVec<[NodeId; 4]>;

/// Payload of a node: a type description or a value.
#[derive(Clone, Debug)]
pub enum NodeData {
    Type(TypeData),
    Literal(LiteralData),
}

impl NodeData {
    #[inline]
    pub fn is_type(&self) -> bool {
        matches!(self, NodeData::Type(_))
    }
}

/// Layout of a block type's values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BlockShape {
    /// One value broadcast across the block.
    Scalar,
    /// One value per row.
    Many,
}

/// Key of a data type: a scheme slot, or the decimal specialization.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DataType {
    Plain(DataSlot),
    Decimal { precision: u8, scale: u8 },
}

impl DataType {
    #[inline]
    pub fn slot(self) -> DataSlot {
        match self {
            DataType::Plain(slot) => slot,
            DataType::Decimal { .. } => DataSlot::Decimal,
        }
    }
}

/// One named member of a struct type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructMember {
    pub name: Name,
    pub ty: NodeId,
}

/// Signature of a callable.
///
/// The last `optional_args` arguments may be omitted by a caller; each of
/// them is an `Optional` type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallableType {
    pub name: Name,
    pub return_type: NodeId,
    pub arguments: Box<[NodeId]>,
    pub optional_args: u32,
    /// Opaque extra node compared by equality.
    pub payload: Option<NodeId>,
    /// Instances of this callable are never merged with each other.
    pub merge_disabled: bool,
}

impl CallableType {
    /// Number of arguments a caller must provide.
    #[inline]
    pub fn required_args(&self) -> usize {
        self.arguments.len() - self.optional_args as usize
    }
}

/// Structural description of a value shape.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    /// The type of every type, including itself.
    TypeOfType,
    Void,
    Null,
    EmptyList,
    EmptyDict,
    Any,
    Data(DataType),
    /// Members sorted by name text, strictly increasing.
    Struct(Box<[StructMember]>),
    List(NodeId),
    Stream(NodeId),
    Flow(NodeId),
    Optional(NodeId),
    Tagged { base: NodeId, tag: Name },
    Dict { key: NodeId, payload: NodeId },
    Callable(CallableType),
    Tuple(Box<[NodeId]>),
    Resource { tag: Name },
    /// A choice between the members of a non-empty struct or tuple.
    Variant(NodeId),
    Block { item: NodeId, shape: BlockShape },
}

impl TypeData {
    pub fn kind(&self) -> Kind {
        match self {
            TypeData::TypeOfType => Kind::Type,
            TypeData::Void => Kind::Void,
            TypeData::Null => Kind::Null,
            TypeData::EmptyList => Kind::EmptyList,
            TypeData::EmptyDict => Kind::EmptyDict,
            TypeData::Any => Kind::Any,
            TypeData::Data(_) => Kind::Data,
            TypeData::Struct(_) => Kind::Struct,
            TypeData::List(_) => Kind::List,
            TypeData::Stream(_) => Kind::Stream,
            TypeData::Flow(_) => Kind::Flow,
            TypeData::Optional(_) => Kind::Optional,
            TypeData::Tagged { .. } => Kind::Tagged,
            TypeData::Dict { .. } => Kind::Dict,
            TypeData::Callable(_) => Kind::Callable,
            TypeData::Tuple(_) => Kind::Tuple,
            TypeData::Resource { .. } => Kind::Resource,
            TypeData::Variant(_) => Kind::Variant,
            TypeData::Block { .. } => Kind::Block,
        }
    }

    /// Direct child type references, in declaration order.
    pub(crate) fn children(&self) -> Children {
        match self {
            TypeData::TypeOfType
            | TypeData::Void
            | TypeData::Null
            | TypeData::EmptyList
            | TypeData::EmptyDict
            | TypeData::Any
            | TypeData::Data(_)
            | TypeData::Resource { .. } => Children::new(),
            TypeData::Struct(members) => members.iter().map(|m| m.ty).collect(),
            TypeData::List(item)
            | TypeData::Stream(item)
            | TypeData::Flow(item)
            | TypeData::Optional(item)
            | TypeData::Variant(item)
            | TypeData::Tagged { base: item, .. }
            | TypeData::Block { item, .. } => smallvec::smallvec![*item],
            TypeData::Dict { key, payload } => smallvec::smallvec![*key, *payload],
            TypeData::Callable(c) => {
                let mut out: Children = c.arguments.iter().copied().collect();
                out.push(c.return_type);
                out.extend(c.payload);
                out
            }
            TypeData::Tuple(elems) => elems.iter().copied().collect(),
        }
    }

    /// Replace each child `c` with `f(c)`.
    pub(crate) fn map_children(&self, mut f: impl FnMut(NodeId) -> NodeId) -> TypeData {
        match self {
            TypeData::TypeOfType
            | TypeData::Void
            | TypeData::Null
            | TypeData::EmptyList
            | TypeData::EmptyDict
            | TypeData::Any
            | TypeData::Data(_)
            | TypeData::Resource { .. } => self.clone(),
            TypeData::Struct(members) => TypeData::Struct(
                members
                    .iter()
                    .map(|m| StructMember {
                        name: m.name,
                        ty: f(m.ty),
                    })
                    .collect(),
            ),
            TypeData::List(item) => TypeData::List(f(*item)),
            TypeData::Stream(item) => TypeData::Stream(f(*item)),
            TypeData::Flow(item) => TypeData::Flow(f(*item)),
            TypeData::Optional(item) => TypeData::Optional(f(*item)),
            TypeData::Variant(item) => TypeData::Variant(f(*item)),
            TypeData::Tagged { base, tag } => TypeData::Tagged {
                base: f(*base),
                tag: *tag,
            },
            TypeData::Block { item, shape } => TypeData::Block {
                item: f(*item),
                shape: *shape,
            },
            TypeData::Dict { key, payload } => TypeData::Dict {
                key: f(*key),
                payload: f(*payload),
            },
            TypeData::Callable(c) => {
                let arguments = c.arguments.iter().map(|&a| f(a)).collect();
                let return_type = f(c.return_type);
                let payload = c.payload.map(&mut f);
                TypeData::Callable(CallableType {
                    name: c.name,
                    return_type,
                    arguments,
                    optional_args: c.optional_args,
                    payload,
                    merge_disabled: c.merge_disabled,
                })
            }
            TypeData::Tuple(elems) => TypeData::Tuple(elems.iter().map(|&e| f(e)).collect()),
        }
    }
}

/// Application state of a callable literal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallableState {
    /// Not yet computed; holds the bound inputs (possibly none).
    Pending { inputs: Box<[RuntimeNode]> },
    /// Computed. The inputs are gone.
    Resolved { result: RuntimeNode },
}

/// Payload of a callable literal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallableLiteral {
    pub state: CallableState,
    /// Caller-assigned identity, `0` when unset.
    pub unique_id: u32,
}

impl CallableLiteral {
    #[inline]
    pub fn result(&self) -> Option<RuntimeNode> {
        match self.state {
            CallableState::Resolved { result } => Some(result),
            CallableState::Pending { .. } => None,
        }
    }

    #[inline]
    pub fn inputs(&self) -> &[RuntimeNode] {
        match &self.state {
            CallableState::Pending { inputs } => inputs,
            CallableState::Resolved { .. } => &[],
        }
    }
}

/// A concrete or partially resolved value.
#[derive(Clone, Debug)]
pub enum LiteralData {
    Void,
    Null,
    EmptyList,
    EmptyDict,
    Data(DataValue),
    /// One item per member of the struct type, in member order.
    Struct(Box<[RuntimeNode]>),
    List(Vec<RuntimeNode>),
    Optional(Option<RuntimeNode>),
    Dict(Box<[(RuntimeNode, RuntimeNode)]>),
    Callable(CallableLiteral),
    Any(Option<RuntimeNode>),
    Tuple(Box<[RuntimeNode]>),
    Variant { item: RuntimeNode, index: u32 },
}

impl LiteralData {
    /// Direct runtime children, in declaration order. Dict entries are
    /// flattened as key, payload.
    pub(crate) fn children(&self) -> SmallVec<[RuntimeNode; 4]> {
        match self {
            LiteralData::Void
            | LiteralData::Null
            | LiteralData::EmptyList
            | LiteralData::EmptyDict
            | LiteralData::Data(_) => SmallVec::new(),
            LiteralData::Struct(items) | LiteralData::Tuple(items) => {
                items.iter().copied().collect()
            }
            LiteralData::List(items) => items.iter().copied().collect(),
            LiteralData::Optional(item) | LiteralData::Any(item) => item.iter().copied().collect(),
            LiteralData::Dict(entries) => entries.iter().flat_map(|&(k, v)| [k, v]).collect(),
            LiteralData::Callable(c) => match &c.state {
                CallableState::Pending { inputs } => inputs.iter().copied().collect(),
                CallableState::Resolved { result } => smallvec::smallvec![*result],
            },
            LiteralData::Variant { item, .. } => smallvec::smallvec![*item],
        }
    }

    /// Replace each runtime child `c` with `f(c)`.
    pub(crate) fn map_children(&self, mut f: impl FnMut(RuntimeNode) -> RuntimeNode) -> Self {
        match self {
            LiteralData::Void
            | LiteralData::Null
            | LiteralData::EmptyList
            | LiteralData::EmptyDict
            | LiteralData::Data(_) => self.clone(),
            LiteralData::Struct(items) => {
                LiteralData::Struct(items.iter().map(|&i| f(i)).collect())
            }
            LiteralData::Tuple(items) => LiteralData::Tuple(items.iter().map(|&i| f(i)).collect()),
            LiteralData::List(items) => LiteralData::List(items.iter().map(|&i| f(i)).collect()),
            LiteralData::Optional(item) => LiteralData::Optional(item.map(f)),
            LiteralData::Any(item) => LiteralData::Any(item.map(f)),
            LiteralData::Dict(entries) => {
                LiteralData::Dict(entries.iter().map(|&(k, v)| (f(k), f(v))).collect())
            }
            LiteralData::Callable(c) => {
                let state = match &c.state {
                    CallableState::Pending { inputs } => CallableState::Pending {
                        inputs: inputs.iter().map(|&i| f(i)).collect(),
                    },
                    CallableState::Resolved { result } => {
                        CallableState::Resolved { result: f(*result) }
                    }
                };
                LiteralData::Callable(CallableLiteral {
                    state,
                    unique_id: c.unique_id,
                })
            }
            LiteralData::Variant { item, index } => LiteralData::Variant {
                item: f(*item),
                index: *index,
            },
        }
    }
}
