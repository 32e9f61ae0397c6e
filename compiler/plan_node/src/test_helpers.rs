//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use crate::{DataSlot, DataValue, Environment, NodeId, RuntimeNode};

pub(crate) fn i32_type(env: &mut Environment) -> NodeId {
    env.data_type(DataSlot::Int32).unwrap()
}

pub(crate) fn int32(env: &mut Environment, value: i32) -> RuntimeNode {
    RuntimeNode::immediate(env.data_value(DataValue::Int32(value)).unwrap())
}

pub(crate) fn utf8(env: &mut Environment, text: &str) -> RuntimeNode {
    RuntimeNode::immediate(env.data_value(DataValue::utf8(text)).unwrap())
}

/// `Callable<name() -> ret>` with no arguments.
pub(crate) fn nullary_callable_type(env: &mut Environment, name: &str, ret: NodeId) -> NodeId {
    env.callable_type(&crate::CallableSignature::new(name, ret))
        .unwrap()
}

/// A pending nullary callable returning `ret`.
pub(crate) fn pending(env: &mut Environment, ret: NodeId) -> NodeId {
    let ty = nullary_callable_type(env, "Pending", ret);
    env.callable(ty, &[]).unwrap()
}
