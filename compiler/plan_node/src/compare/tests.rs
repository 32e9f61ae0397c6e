#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use crate::test_helpers::{i32_type, int32, nullary_callable_type, pending};
use crate::{CallableSignature, DataSlot, Environment, NodeId, RuntimeNode};

fn callable_with_optional(env: &mut Environment, name: &str, optional: u32) -> NodeId {
    let i32_ty = i32_type(env);
    let opt = env.optional_type(i32_ty).unwrap();
    let sig = CallableSignature::new(name, i32_ty)
        .arg(i32_ty)
        .arg(opt)
        .optional_args(optional);
    env.callable_type(&sig).unwrap()
}

// ── Same type ──────────────────────────────────────────────────────

#[test]
fn structurally_equal_types_are_same() {
    let mut env = Environment::new();
    let a = i32_type(&mut env);
    let b = i32_type(&mut env);
    assert_ne!(a, b);
    assert!(env.is_same_type(a, b));

    let la = env.list_type(a).unwrap();
    let lb = env.list_type(b).unwrap();
    assert!(env.is_same_type(la, lb));
    assert!(!env.is_same_type(la, a));
}

#[test]
fn struct_member_names_matter() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let ab = env.struct_type(&[("a", i32_ty), ("b", i32_ty)]).unwrap();
    let ac = env.struct_type(&[("a", i32_ty), ("c", i32_ty)]).unwrap();
    let ab2 = env.struct_type(&[("a", i32_ty), ("b", i32_ty)]).unwrap();
    assert!(!env.is_same_type(ab, ac));
    assert!(env.is_same_type(ab, ab2));
}

#[test]
fn decimal_parameters_matter() {
    let mut env = Environment::new();
    let d1 = env.decimal_type(10, 2).unwrap();
    let d2 = env.decimal_type(10, 2).unwrap();
    let d3 = env.decimal_type(10, 3).unwrap();
    assert!(env.is_same_type(d1, d2));
    assert!(!env.is_same_type(d1, d3));
    assert!(!env.is_convertible_to(d1, d3, true));
}

#[test]
fn callable_same_type_compares_name_and_payload() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let f = nullary_callable_type(&mut env, "F", i32_ty);
    let g = nullary_callable_type(&mut env, "G", i32_ty);
    assert!(!env.is_same_type(f, g));
    assert!(env.is_convertible_to(f, g, false));

    let one = int32(&mut env, 1).node();
    let other_one = int32(&mut env, 1).node();
    let two = int32(&mut env, 2).node();
    let with = |env: &mut Environment, payload: NodeId| {
        let sig = CallableSignature::new("F", i32_ty).payload(payload);
        env.callable_type(&sig).unwrap()
    };
    let p1 = with(&mut env, one);
    let p1b = with(&mut env, other_one);
    let p2 = with(&mut env, two);
    assert!(env.is_same_type(p1, p1b));
    assert!(!env.is_same_type(p1, p2));
    assert!(!env.is_same_type(p1, f));

    // No payload converts to any payload, not the other way round.
    assert!(env.is_convertible_to(f, p1, false));
    assert!(!env.is_convertible_to(p1, f, false));
}

#[test]
fn merge_flag_matters() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let plain = nullary_callable_type(&mut env, "F", i32_ty);
    let sig = CallableSignature::new("F", i32_ty).merge_disabled();
    let unmerged = env.callable_type(&sig).unwrap();
    assert!(!env.is_same_type(plain, unmerged));
    assert!(!env.is_convertible_to(plain, unmerged, false));
}

// ── Convertibility ─────────────────────────────────────────────────

#[test]
fn more_optional_arguments_convert_to_fewer() {
    let mut env = Environment::new();
    let one_optional = callable_with_optional(&mut env, "F", 1);
    let none_optional = callable_with_optional(&mut env, "G", 0);

    assert!(env.is_convertible_to(one_optional, none_optional, false));
    assert!(!env.is_convertible_to(none_optional, one_optional, false));
}

#[test]
fn tagged_types_unwrap_only_when_asked() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let inner = env.tagged_type(i32_ty, "Inner").unwrap();
    let outer = env.tagged_type(inner, "Outer").unwrap();
    let list_tagged = env.list_type(outer).unwrap();
    let list_plain = env.list_type(i32_ty).unwrap();

    assert!(!env.is_convertible_to(outer, i32_ty, false));
    assert!(env.is_convertible_to(outer, i32_ty, true));
    assert!(env.is_convertible_to(i32_ty, outer, true));
    assert!(env.is_convertible_to(list_tagged, list_plain, true));
    assert!(!env.is_convertible_to(list_tagged, list_plain, false));

    let other = env.tagged_type(i32_ty, "Other").unwrap();
    assert!(!env.is_convertible_to(inner, other, false));
    assert!(!env.is_same_type(inner, other));
}

#[test]
fn kinds_never_cross() {
    let env = Environment::new();
    assert!(!env.is_same_type(env.void_type(), env.null_type()));
    assert!(!env.is_convertible_to(env.empty_list_type(), env.list_of_void_type(), true));
    assert!(!env.is_same_type(env.empty_struct_type(), env.empty_tuple_type()));
    assert!(!env.node_equals(env.void(), env.null()));
}

#[test]
fn foreign_nodes_never_compare() {
    let a = Environment::new();
    let b = Environment::new();
    assert!(!a.is_same_type(a.void_type(), b.void_type()));
    assert!(!a.node_equals(a.void(), b.void()));
}

// ── Literal equality ───────────────────────────────────────────────

#[test]
fn data_literals_compare_by_value() {
    let mut env = Environment::new();
    let a = int32(&mut env, 5);
    let b = int32(&mut env, 5);
    let c = int32(&mut env, 6);
    assert!(env.runtime_equals(a, b));
    assert!(!env.runtime_equals(a, c));
    assert!(!env.runtime_equals(a, RuntimeNode::new(b.node(), false)));

    let nan_ty = env.data_type(DataSlot::Double).unwrap();
    let nan = env
        .data_literal(nan_ty, crate::DataValue::Double(f64::NAN))
        .unwrap();
    let nan2 = env
        .data_literal(nan_ty, crate::DataValue::Double(f64::NAN))
        .unwrap();
    assert!(!env.node_equals(nan, nan2));
    assert!(env.node_equals(nan, nan));
}

#[test]
fn merge_disabled_callables_are_identity_equal() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let sig = CallableSignature::new("Random", i32_ty).merge_disabled();
    let ty = env.callable_type(&sig).unwrap();
    let a = env.callable(ty, &[]).unwrap();
    let b = env.callable(ty, &[]).unwrap();
    assert!(env.node_equals(a, a));
    assert!(!env.node_equals(a, b));
    assert!(!env.is_mergeable(a));

    let x = pending(&mut env, i32_ty);
    let y = pending(&mut env, i32_ty);
    assert!(env.node_equals(x, y));
    assert!(env.is_mergeable(x));
}

#[test]
fn any_literals_need_items() {
    let mut env = Environment::new();
    let one = int32(&mut env, 1);
    let other = int32(&mut env, 1);
    let empty_a = env.any_literal(None).unwrap();
    let empty_b = env.any_literal(None).unwrap();
    let full_a = env.any_literal(Some(one)).unwrap();
    let full_b = env.any_literal(Some(other)).unwrap();

    assert!(!env.node_equals(empty_a, empty_b));
    assert!(env.node_equals(full_a, full_b));
    assert!(!env.node_equals(full_a, empty_a));
}

#[test]
fn literals_of_different_types_differ() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let list_a = env.list_type(i32_ty).unwrap();
    let opt = env.optional_type(i32_ty).unwrap();
    let list_b = env.list_type(opt).unwrap();
    let a = env.list_literal(list_a, &[]).unwrap();
    let b = env.list_literal(list_b, &[]).unwrap();
    assert!(!env.node_equals(a, b));
    let a2 = env.list_literal(list_a, &[]).unwrap();
    assert!(env.node_equals(a, a2));
}

// ── Properties ─────────────────────────────────────────────────────

#[allow(
    clippy::needless_pass_by_value,
    reason = "proptest macros generate code with these patterns"
)]
mod proptest_shapes {
    use proptest::prelude::*;

    use crate::{DataSlot, Environment, NodeId};

    /// Blueprint of a type, buildable any number of times.
    #[derive(Clone, Debug)]
    enum Shape {
        Data(DataSlot),
        List(Box<Shape>),
        Optional(Box<Shape>),
        Tagged(Box<Shape>, bool),
        Dict(Box<Shape>, Box<Shape>),
        Tuple(Vec<Shape>),
        Struct(Vec<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            Just(DataSlot::Int32),
            Just(DataSlot::Utf8),
            Just(DataSlot::Bool),
        ]
        .prop_map(Shape::Data);
        leaf.prop_recursive(4, 24, 4, |inner| {
            prop_oneof![
                inner.clone().prop_map(|s| Shape::List(Box::new(s))),
                inner.clone().prop_map(|s| Shape::Optional(Box::new(s))),
                (inner.clone(), any::<bool>()).prop_map(|(s, t)| Shape::Tagged(Box::new(s), t)),
                (inner.clone(), inner.clone())
                    .prop_map(|(k, v)| Shape::Dict(Box::new(k), Box::new(v))),
                proptest::collection::vec(inner.clone(), 1..4).prop_map(Shape::Tuple),
                proptest::collection::vec(inner, 1..4).prop_map(Shape::Struct),
            ]
        })
    }

    fn build(env: &mut Environment, shape: &Shape) -> NodeId {
        match shape {
            Shape::Data(slot) => env.data_type(*slot).unwrap(),
            Shape::List(item) => {
                let item = build(env, item);
                env.list_type(item).unwrap()
            }
            Shape::Optional(item) => {
                let item = build(env, item);
                env.optional_type(item).unwrap()
            }
            Shape::Tagged(base, first) => {
                let base = build(env, base);
                env.tagged_type(base, if *first { "a" } else { "b" })
                    .unwrap()
            }
            Shape::Dict(key, payload) => {
                let key = build(env, key);
                let payload = build(env, payload);
                env.dict_type(key, payload).unwrap()
            }
            Shape::Tuple(elements) => {
                let elements: Vec<_> = elements.iter().map(|e| build(env, e)).collect();
                env.tuple_type(&elements).unwrap()
            }
            Shape::Struct(members) => {
                let types: Vec<_> = members.iter().map(|m| build(env, m)).collect();
                let names: Vec<String> = (0..types.len()).map(|i| format!("m{i}")).collect();
                let members: Vec<(&str, NodeId)> = names
                    .iter()
                    .map(String::as_str)
                    .zip(types)
                    .collect();
                env.struct_type(&members).unwrap()
            }
        }
    }

    proptest! {
        #[test]
        fn same_type_is_reflexive(s in shape()) {
            let mut env = Environment::new();
            let a = build(&mut env, &s);
            let b = build(&mut env, &s);
            prop_assert!(env.is_same_type(a, a));
            prop_assert!(env.is_same_type(a, b));
            prop_assert!(env.is_convertible_to(a, b, false));
            prop_assert!(env.node_equals(a, b));
        }

        #[test]
        fn same_type_is_symmetric(x in shape(), y in shape()) {
            let mut env = Environment::new();
            let a = build(&mut env, &x);
            let b = build(&mut env, &y);
            prop_assert_eq!(env.is_same_type(a, b), env.is_same_type(b, a));
        }

        #[test]
        fn same_type_implies_convertible(x in shape(), y in shape()) {
            let mut env = Environment::new();
            let a = build(&mut env, &x);
            let b = build(&mut env, &y);
            if env.is_same_type(a, b) {
                prop_assert!(env.is_convertible_to(a, b, false));
                prop_assert!(env.is_convertible_to(a, b, true));
            }
        }
    }
}
