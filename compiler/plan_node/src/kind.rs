//! Node kind tags.
//!
//! Every type carries exactly one `Kind`. A literal's kind is the kind of its
//! type, and a type's own node kind is [`Kind::Type`], since every type's
//! type is the environment's type-of-type singleton.

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Kind {
    /// The type of all types.
    Type = 0,
    /// Unit-like marker for absent values.
    Void = 1,
    /// Scalar scheme data (including decimals).
    Data = 2,
    /// Record with name-sorted members.
    Struct = 3,
    /// Homogeneous list.
    List = 4,
    /// Optional value.
    Optional = 5,
    /// Key/payload dictionary.
    Dict = 6,
    /// Callable operation.
    Callable = 7,
    /// Dynamically typed value.
    Any = 8,
    /// Positional product.
    Tuple = 9,
    /// Opaque tagged resource.
    Resource = 10,
    /// Sum over a struct or tuple's alternatives.
    Variant = 11,
    /// Lazily pulled sequence.
    Stream = 12,
    /// The null marker.
    Null = 13,
    /// Pushed sequence inside a computation graph.
    Flow = 14,
    /// Literal empty list.
    EmptyList = 15,
    /// Literal empty dictionary.
    EmptyDict = 16,
    /// Nominal wrapper around another type.
    Tagged = 17,
    /// Columnar block of items.
    Block = 18,
}

impl Kind {
    /// All kinds, in discriminant order.
    pub const ALL: [Kind; 19] = [
        Kind::Type,
        Kind::Void,
        Kind::Data,
        Kind::Struct,
        Kind::List,
        Kind::Optional,
        Kind::Dict,
        Kind::Callable,
        Kind::Any,
        Kind::Tuple,
        Kind::Resource,
        Kind::Variant,
        Kind::Stream,
        Kind::Null,
        Kind::Flow,
        Kind::EmptyList,
        Kind::EmptyDict,
        Kind::Tagged,
        Kind::Block,
    ];

    /// Canonical kind name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Void => "Void",
            Self::Data => "Data",
            Self::Struct => "Struct",
            Self::List => "List",
            Self::Optional => "Optional",
            Self::Dict => "Dict",
            Self::Callable => "Callable",
            Self::Any => "Any",
            Self::Tuple => "Tuple",
            Self::Resource => "Resource",
            Self::Variant => "Variant",
            Self::Stream => "Stream",
            Self::Null => "Null",
            Self::Flow => "Flow",
            Self::EmptyList => "EmptyList",
            Self::EmptyDict => "EmptyDict",
            Self::Tagged => "Tagged",
            Self::Block => "Block",
        }
    }

    /// Whether values of this kind can be represented as a literal node.
    #[inline]
    pub const fn has_literals(self) -> bool {
        matches!(
            self,
            Self::Void
                | Self::Null
                | Self::EmptyList
                | Self::EmptyDict
                | Self::Data
                | Self::Struct
                | Self::List
                | Self::Optional
                | Self::Dict
                | Self::Callable
                | Self::Any
                | Self::Tuple
                | Self::Variant
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
