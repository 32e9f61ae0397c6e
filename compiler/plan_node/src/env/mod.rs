//! The node arena.
//!
//! An [`Environment`] owns one generation of nodes in two parallel columns
//! (payload and type) plus a name table. Nodes are never freed one by one:
//! dropping the environment releases all of them at once, and every
//! [`NodeId`] it handed out becomes dead with it.
//!
//! # Singletons
//!
//! The first [`FIRST_DYNAMIC`] slots are created by [`Environment::new`] at
//! fixed indices, so the degenerate nodes every plan needs (void, null, empty
//! containers, the type of types) are a field read rather than an allocation.

mod query;
mod shared;

pub use shared::SharedEnvironment;

use tracing::debug;

use plan_ir::NameTable;

use crate::config::EnvConfig;
use crate::data::DataSlot;
use crate::error::NodeError;
use crate::id::{EnvId, NodeId};
use crate::kind::Kind;
use crate::node::{DataType, LiteralData, NodeData, TypeData};
use crate::Name;

// === Singleton layout ===

const TYPE_OF_TYPE: u32 = 0;
const VOID_TYPE: u32 = 1;
const VOID: u32 = 2;
const NULL_TYPE: u32 = 3;
const NULL: u32 = 4;
const EMPTY_LIST_TYPE: u32 = 5;
const EMPTY_LIST: u32 = 6;
const EMPTY_DICT_TYPE: u32 = 7;
const EMPTY_DICT: u32 = 8;
const UI32_TYPE: u32 = 9;
const UI64_TYPE: u32 = 10;
const ANY_TYPE: u32 = 11;
const EMPTY_STRUCT_TYPE: u32 = 12;
const EMPTY_STRUCT: u32 = 13;
const EMPTY_TUPLE_TYPE: u32 = 14;
const EMPTY_TUPLE: u32 = 15;
const LIST_OF_VOID_TYPE: u32 = 16;
const LIST_OF_VOID: u32 = 17;

/// Index of the first node not created at environment startup.
pub(crate) const FIRST_DYNAMIC: u32 = 18;

/// Arena owning a generation of type and literal nodes.
///
/// Mutation goes through `&mut self`, so one environment has one writer at a
/// time. Share it across threads through [`SharedEnvironment`].
pub struct Environment {
    id: EnvId,
    config: EnvConfig,
    /// Payload of each node.
    nodes: Vec<NodeData>,
    /// Type of each node, parallel to `nodes`.
    types: Vec<NodeId>,
    names: NameTable,
}

impl Environment {
    /// Create an environment with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EnvConfig::default())
    }

    pub fn with_config(config: EnvConfig) -> Self {
        let id = EnvId::fresh();
        let mut env = Environment {
            id,
            config,
            nodes: Vec::with_capacity(FIRST_DYNAMIC as usize * 2),
            types: Vec::with_capacity(FIRST_DYNAMIC as usize * 2),
            names: NameTable::with_capacity(config.name_capacity),
        };
        env.init_singletons();
        debug!(env = %id, node_limit = ?config.node_limit, "environment created");
        env
    }

    fn init_singletons(&mut self) {
        let id = self.id;
        let t = move |i| NodeId::new(id, i);
        let singletons = [
            (NodeData::Type(TypeData::TypeOfType), TYPE_OF_TYPE),
            (NodeData::Type(TypeData::Void), TYPE_OF_TYPE),
            (NodeData::Literal(LiteralData::Void), VOID_TYPE),
            (NodeData::Type(TypeData::Null), TYPE_OF_TYPE),
            (NodeData::Literal(LiteralData::Null), NULL_TYPE),
            (NodeData::Type(TypeData::EmptyList), TYPE_OF_TYPE),
            (NodeData::Literal(LiteralData::EmptyList), EMPTY_LIST_TYPE),
            (NodeData::Type(TypeData::EmptyDict), TYPE_OF_TYPE),
            (NodeData::Literal(LiteralData::EmptyDict), EMPTY_DICT_TYPE),
            (
                NodeData::Type(TypeData::Data(DataType::Plain(DataSlot::Uint32))),
                TYPE_OF_TYPE,
            ),
            (
                NodeData::Type(TypeData::Data(DataType::Plain(DataSlot::Uint64))),
                TYPE_OF_TYPE,
            ),
            (NodeData::Type(TypeData::Any), TYPE_OF_TYPE),
            (NodeData::Type(TypeData::Struct(Box::new([]))), TYPE_OF_TYPE),
            (
                NodeData::Literal(LiteralData::Struct(Box::new([]))),
                EMPTY_STRUCT_TYPE,
            ),
            (NodeData::Type(TypeData::Tuple(Box::new([]))), TYPE_OF_TYPE),
            (
                NodeData::Literal(LiteralData::Tuple(Box::new([]))),
                EMPTY_TUPLE_TYPE,
            ),
            (NodeData::Type(TypeData::List(t(VOID_TYPE))), TYPE_OF_TYPE),
            (
                NodeData::Literal(LiteralData::List(Vec::new())),
                LIST_OF_VOID_TYPE,
            ),
        ];
        for (data, ty) in singletons {
            self.nodes.push(data);
            self.types.push(t(ty));
        }
        debug_assert_eq!(self.nodes.len(), FIRST_DYNAMIC as usize);
    }

    // === Identity ===

    #[inline]
    pub fn id(&self) -> EnvId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Number of nodes, singletons included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `node` was allocated by this environment.
    #[inline]
    pub fn owns(&self, node: NodeId) -> bool {
        node.env() == self.id && node.index() < self.nodes.len()
    }

    #[inline]
    fn singleton(&self, index: u32) -> NodeId {
        NodeId::new(self.id, index)
    }

    // === Singletons ===

    /// The type of every type, typed by itself.
    pub fn type_of_type(&self) -> NodeId {
        self.singleton(TYPE_OF_TYPE)
    }

    pub fn void_type(&self) -> NodeId {
        self.singleton(VOID_TYPE)
    }

    pub fn void(&self) -> NodeId {
        self.singleton(VOID)
    }

    pub fn null_type(&self) -> NodeId {
        self.singleton(NULL_TYPE)
    }

    pub fn null(&self) -> NodeId {
        self.singleton(NULL)
    }

    pub fn empty_list_type(&self) -> NodeId {
        self.singleton(EMPTY_LIST_TYPE)
    }

    pub fn empty_list(&self) -> NodeId {
        self.singleton(EMPTY_LIST)
    }

    pub fn empty_dict_type(&self) -> NodeId {
        self.singleton(EMPTY_DICT_TYPE)
    }

    pub fn empty_dict(&self) -> NodeId {
        self.singleton(EMPTY_DICT)
    }

    /// `Data<Uint32>`.
    pub fn ui32_type(&self) -> NodeId {
        self.singleton(UI32_TYPE)
    }

    /// `Data<Uint64>`.
    pub fn ui64_type(&self) -> NodeId {
        self.singleton(UI64_TYPE)
    }

    pub fn any_type(&self) -> NodeId {
        self.singleton(ANY_TYPE)
    }

    pub fn empty_struct_type(&self) -> NodeId {
        self.singleton(EMPTY_STRUCT_TYPE)
    }

    /// The struct literal with no members.
    pub fn empty_struct(&self) -> NodeId {
        self.singleton(EMPTY_STRUCT)
    }

    pub fn empty_tuple_type(&self) -> NodeId {
        self.singleton(EMPTY_TUPLE_TYPE)
    }

    /// The tuple literal with no elements.
    pub fn empty_tuple(&self) -> NodeId {
        self.singleton(EMPTY_TUPLE)
    }

    /// `List<Void>`.
    pub fn list_of_void_type(&self) -> NodeId {
        self.singleton(LIST_OF_VOID_TYPE)
    }

    /// The empty list literal of type `List<Void>`.
    pub fn list_of_void(&self) -> NodeId {
        self.singleton(LIST_OF_VOID)
    }

    // === Names ===

    /// Intern `text` in this environment's name table.
    pub fn intern(&mut self, text: &str) -> Result<Name, NodeError> {
        Ok(self.names.try_intern(text)?)
    }

    /// Look up `text` without interning it.
    pub fn find_name(&self, text: &str) -> Option<Name> {
        self.names.get(text)
    }

    /// Text of an interned name.
    ///
    /// # Panics
    /// Panics if `name` was not interned by this environment.
    pub fn name_str(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    // === Allocation ===

    /// Append a node, enforcing the configured limit.
    pub(crate) fn alloc(&mut self, data: NodeData, ty: NodeId) -> Result<NodeId, NodeError> {
        let len = self.nodes.len();
        let exhausted = || NodeError::ArenaExhausted { env: self.id, len };
        let index = u32::try_from(len).map_err(|_| exhausted())?;
        if self.config.node_limit.is_some_and(|limit| index >= limit) {
            return Err(exhausted());
        }
        debug_assert!(self.owns(ty));
        self.nodes.push(data);
        self.types.push(ty);
        Ok(NodeId::new(self.id, index))
    }

    /// Reject handles allocated elsewhere.
    pub(crate) fn ensure_owned(&self, node: NodeId) -> Result<(), NodeError> {
        if self.owns(node) {
            Ok(())
        } else {
            Err(NodeError::ForeignNode {
                node,
                owner: node.env(),
                env: self.id,
            })
        }
    }

    #[inline]
    #[track_caller]
    fn slot(&self, node: NodeId) -> usize {
        assert!(
            node.env() == self.id,
            "node {node:?} belongs to {}, not to {}",
            node.env(),
            self.id
        );
        node.index()
    }

    // === Raw access ===

    /// Payload of a node.
    ///
    /// # Panics
    /// Panics if `node` belongs to another environment.
    #[inline]
    #[track_caller]
    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[self.slot(node)]
    }

    #[inline]
    #[track_caller]
    pub(crate) fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        let slot = self.slot(node);
        &mut self.nodes[slot]
    }

    /// The type of a node. For a type node this is [`Environment::type_of_type`].
    ///
    /// # Panics
    /// Panics if `node` belongs to another environment.
    #[inline]
    #[track_caller]
    pub fn type_of(&self, node: NodeId) -> NodeId {
        self.types[self.slot(node)]
    }

    #[inline]
    pub(crate) fn set_type_of(&mut self, node: NodeId, ty: NodeId) {
        let slot = self.slot(node);
        self.types[slot] = ty;
    }

    #[inline]
    #[track_caller]
    pub fn as_type(&self, node: NodeId) -> Option<&TypeData> {
        match self.data(node) {
            NodeData::Type(t) => Some(t),
            NodeData::Literal(_) => None,
        }
    }

    #[inline]
    #[track_caller]
    pub fn as_literal(&self, node: NodeId) -> Option<&LiteralData> {
        match self.data(node) {
            NodeData::Literal(l) => Some(l),
            NodeData::Type(_) => None,
        }
    }

    #[inline]
    pub fn is_type(&self, node: NodeId) -> bool {
        self.data(node).is_type()
    }

    /// Kind of a type node, or of a literal's type.
    #[track_caller]
    pub fn kind_of(&self, node: NodeId) -> Kind {
        match self.data(node) {
            NodeData::Type(t) => t.kind(),
            NodeData::Literal(_) => self.kind_of(self.type_of(node)),
        }
    }

    /// Type payload of `node`, or a kind error naming `context`.
    pub(crate) fn expect_type(
        &self,
        node: NodeId,
        context: &'static str,
    ) -> Result<&TypeData, NodeError> {
        self.ensure_owned(node)?;
        self.as_type(node).ok_or(NodeError::KindMismatch {
            context,
            expected: "type",
            found: "literal",
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        debug!(
            env = %self.id,
            nodes = self.nodes.len(),
            names = self.names.len(),
            "environment released"
        );
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
