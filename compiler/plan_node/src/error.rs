//! Errors raised while building or mutating a node graph.
//!
//! Almost every variant marks a malformed graph, which is a bug in the code
//! building it rather than a condition to retry. Expected absence (a member
//! name that may not exist) is reported through `Option` instead, and only
//! becomes [`NodeError::MemberNotFound`] when the caller asserts presence.

use plan_ir::InternError;

use crate::data::DataSlot;
use crate::id::{EnvId, NodeId};
use crate::kind::Kind;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum NodeError {
    /// The environment reached its node limit or ran out of indices.
    #[error("environment {env} exhausted: {len} nodes allocated")]
    ArenaExhausted { env: EnvId, len: usize },

    /// A handle allocated by another environment was passed in.
    #[error("node {node:?} belongs to {owner}, not to {env}")]
    ForeignNode {
        node: NodeId,
        owner: EnvId,
        env: EnvId,
    },

    #[error(transparent)]
    Intern(#[from] InternError),

    /// A node of the wrong kind was supplied.
    #[error("{context}: expected {expected}, found {found}")]
    KindMismatch {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A literal child does not have exactly the declared type.
    #[error("{context}: child {index} has type {found}, expected {expected}")]
    ChildTypeMismatch {
        context: &'static str,
        index: usize,
        expected: String,
        found: String,
    },

    /// A literal was given the wrong number of children.
    #[error("{context}: expected {expected} children, found {found}")]
    WrongChildCount {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Positional access past the end of a struct, tuple or callable.
    #[error("{context}: index {index} out of range, length is {len}")]
    IndexOutOfRange {
        context: &'static str,
        index: usize,
        len: usize,
    },

    /// Decimal precision is zero or smaller than the scale.
    #[error("invalid decimal parameters: precision {precision}, scale {scale}")]
    InvalidDecimal { precision: u8, scale: u8 },

    /// `Decimal` requested through the plain data-type factory.
    #[error("decimal types need precision and scale")]
    DecimalViaDataType,

    /// A data literal's value does not belong to its type's slot.
    #[error("data value of slot {found} does not fit type of slot {expected}")]
    DataValueMismatch { expected: DataSlot, found: DataSlot },

    /// A byte payload was given for a slot whose values are stored inline.
    #[error("slot {slot} holds inline values, not bytes")]
    BytesForInlineSlot { slot: DataSlot },

    #[error("struct member name must not be empty")]
    EmptyMemberName,

    /// Struct members out of order, or a duplicate name.
    #[error("struct members must be strictly increasing: {prev:?} then {next:?}")]
    UnsortedMembers { prev: String, next: String },

    #[error("member {name:?} not found, known members: {known}")]
    MemberNotFound { name: String, known: String },

    #[error("callable has {optional} optional arguments but only {total} arguments")]
    TooManyOptionalArgs { optional: u32, total: usize },

    /// One of the trailing optional arguments is not an `Optional` type.
    #[error("optional argument {index} must be of optional type, found {found}")]
    OptionalArgNotOptional { index: usize, found: Kind },

    /// A variant over something other than a non-empty struct or tuple.
    #[error("variant underlying type must be a non-empty struct or tuple, found {found}")]
    InvalidVariantUnderlying { found: String },

    #[error("variant index {index} out of range, {count} alternatives")]
    VariantIndexOutOfRange { index: u32, count: usize },

    /// A deferred reference points at something other than a callable.
    #[error("deferred reference to non-callable node {node:?} ({found})")]
    NotCallable { node: NodeId, found: &'static str },

    /// The value of a callable whose result is not set yet was requested.
    #[error("callable {node:?} has no result yet")]
    Unresolved { node: NodeId },

    #[error("callable {node:?} already has a result")]
    ResultAlreadySet { node: NodeId },

    #[error("callable result has type {found}, expected {expected}")]
    WrongResultType { expected: String, found: String },

    /// The result, or a node reachable from it, is the callable being
    /// resolved.
    #[error("callable {node:?} cannot resolve to itself")]
    SelfReferentialResult { node: NodeId },

    /// The item's links lead back to the `Any` literal being filled.
    #[error("any literal {node:?} cannot contain itself")]
    SelfReferentialItem { node: NodeId },

    #[error("any literal {node:?} already has an item")]
    AnyItemAlreadySet { node: NodeId },

    #[error("callable {node:?} already has unique id {current}")]
    UniqueIdAlreadySet { node: NodeId, current: u32 },
}
