//! Runtime value representation of plan types.
//!
//! The execution runtime stores every value in one of four layouts, chosen
//! from the value's static type alone:
//!
//! - [`Embedded`](ValueRepr::Embedded): a fixed-width scalar stored inline
//! - [`Boxed`](ValueRepr::Boxed): a reference-counted heap object
//! - [`String`](ValueRepr::String): a separately allocated byte buffer
//! - [`Any`](ValueRepr::Any): an open value whose layout is known only at
//!   run time
//!
//! `Optional` and `Flow` take the layout of their item: an optional scalar
//! stays inline and marks absence out of band rather than boxing.
//!
//! # Crate Dependencies
//!
//! Within the workspace `plan_repr` depends only on `plan_node` (for
//! `Environment`, `NodeId` and `TypeData`). The classification is a pure
//! function of the type graph.

mod classify;

pub use classify::{data_repr, ReprClassifier};

use plan_node::{Kind, NodeId};

/// Storage layout of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueRepr {
    /// Inline fixed-width scalar.
    ///
    /// Examples: `Int32`, `Double`, `Date`, `Decimal(10,2)`, `TzDate`,
    /// `Null`, `Optional<Int64>`.
    Embedded,

    /// Reference-counted heap object.
    ///
    /// Examples: `Struct<..>`, `List<..>`, `Dict<..>`, callables, streams.
    Boxed,

    /// Variable-length buffer.
    ///
    /// Examples: `String`, `Utf8`, `Json`, `Uuid`.
    String,

    /// Layout decided per value.
    ///
    /// Examples: `Variant<..>`, `Void`.
    Any,
}

/// Error from classifying a node.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReprError {
    /// The type kind has no runtime layout (`Type`, `Any`, `Tagged`).
    #[error("type kind {kind} has no value representation")]
    Unsupported { kind: Kind },

    /// The node is a literal, or belongs to another environment.
    #[error("node {node:?} is not a type of this environment")]
    NotAType { node: NodeId },
}

/// Classification trait for value layouts.
///
/// Provides the core `value_repr` query plus convenience predicates. The
/// predicates treat unsupported types as not matching.
pub trait ReprClassification {
    /// Classify a type node.
    fn value_repr(&self, ty: NodeId) -> Result<ValueRepr, ReprError>;

    /// Returns `true` if values of this type are stored inline.
    fn is_embedded(&self, ty: NodeId) -> bool {
        self.value_repr(ty) == Ok(ValueRepr::Embedded)
    }

    /// Returns `true` if values of this type may own heap memory.
    ///
    /// This is `true` for `Boxed`, `String` and `Any`.
    fn needs_ref_count(&self, ty: NodeId) -> bool {
        matches!(
            self.value_repr(ty),
            Ok(ValueRepr::Boxed | ValueRepr::String | ValueRepr::Any)
        )
    }
}
