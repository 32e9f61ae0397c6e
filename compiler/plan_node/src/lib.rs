//! Typed node graph for execution plans.
//!
//! Every computation node in a query plan is described here by a structural
//! **type** and, where it carries a value, a **literal**. Both live in an
//! [`Environment`]: an arena that owns one generation of nodes, interns their
//! names, and is reclaimed in bulk when dropped.
//!
//! # Handles
//!
//! Nodes are addressed by [`NodeId`], a copyable index tagged with the
//! [`EnvId`] of the environment that allocated it. Factories reject handles
//! from another environment with [`NodeError::ForeignNode`], so a graph can
//! never reach across arenas.
//!
//! # Kinds
//!
//! The node set is closed. [`TypeData`] and [`LiteralData`] are plain enums and
//! every operation (equality, convertibility, clone-on-write, link rewriting,
//! freezing, formatting, visiting) is an exhaustive `match` over them.
//!
//! # Pending computations
//!
//! A [`RuntimeNode`] is either an immediate value or a deferred reference to a
//! callable literal whose result may arrive later through
//! [`Environment::set_result`]. Resolution walks the callable chain.
//!
//! # Rebasing
//!
//! [`RebaseMap`] is the explicit old→new side table that drives
//! clone-on-write: only nodes with a replaced child are copied, everything
//! else stays shared.

mod compare;
mod config;
mod construct;
mod data;
mod env;
mod error;
mod format;
mod id;
mod kind;
mod node;
mod rebase;
mod runtime;
mod stack;
mod visitor;

#[cfg(test)]
mod test_helpers;

pub use config::{EnvConfig, NODE_LIMIT_VAR};
pub use construct::CallableSignature;
pub use data::{DataFeatures, DataSlot, DataValue};
pub use env::{Environment, SharedEnvironment};
pub use error::NodeError;
pub use id::{EnvId, NodeId, RuntimeNode};
pub use kind::Kind;
pub use node::{
    BlockShape, CallableLiteral, CallableState, CallableType, DataType, LiteralData, NodeData,
    StructMember, TypeData,
};
pub use plan_ir::Name;
pub use rebase::RebaseMap;
pub use visitor::NodeVisitor;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{NodeId, RuntimeNode};
    // env (4) + index (4)
    plan_ir::static_assert_size!(NodeId, 8);
    // NodeId (8) + immediate flag, padded
    plan_ir::static_assert_size!(RuntimeNode, 12);
}
