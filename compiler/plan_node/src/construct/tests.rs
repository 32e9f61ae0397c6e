#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use crate::test_helpers::{i32_type, int32, utf8};
use crate::{
    BlockShape, CallableSignature, DataSlot, DataValue, Environment, Kind, LiteralData, NodeError,
    RuntimeNode,
};

// ── Types ──────────────────────────────────────────────────────────

#[test]
fn decimal_parameters() {
    let mut env = Environment::new();
    assert_eq!(
        env.decimal_type(0, 0).unwrap_err(),
        NodeError::InvalidDecimal {
            precision: 0,
            scale: 0
        }
    );
    assert!(env.decimal_type(5, 5).is_ok());
    assert_eq!(
        env.decimal_type(5, 6).unwrap_err(),
        NodeError::InvalidDecimal {
            precision: 5,
            scale: 6
        }
    );
}

#[test]
fn decimal_slot_needs_parameters() {
    let mut env = Environment::new();
    assert_eq!(
        env.data_type(DataSlot::Decimal).unwrap_err(),
        NodeError::DecimalViaDataType
    );
}

#[test]
fn struct_members_must_be_sorted() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);

    assert!(env.struct_type(&[("a", i32_ty), ("b", i32_ty)]).is_ok());
    assert_eq!(
        env.struct_type(&[("b", i32_ty), ("a", i32_ty)]).unwrap_err(),
        NodeError::UnsortedMembers {
            prev: "b".to_owned(),
            next: "a".to_owned(),
        }
    );
    assert!(matches!(
        env.struct_type(&[("a", i32_ty), ("a", i32_ty)]),
        Err(NodeError::UnsortedMembers { .. })
    ));
    assert_eq!(
        env.struct_type(&[("", i32_ty)]).unwrap_err(),
        NodeError::EmptyMemberName
    );
}

#[test]
fn empty_struct_and_tuple_are_singletons() {
    let mut env = Environment::new();
    assert_eq!(env.struct_type(&[]).unwrap(), env.empty_struct_type());
    assert_eq!(env.tuple_type(&[]).unwrap(), env.empty_tuple_type());
    let ty = env.empty_struct_type();
    assert_eq!(env.struct_literal(ty, &[]).unwrap(), env.empty_struct());
    let ty = env.empty_tuple_type();
    assert_eq!(env.tuple_literal(ty, &[]).unwrap(), env.empty_tuple());
}

#[test]
fn child_types_must_be_types() {
    let mut env = Environment::new();
    let one = int32(&mut env, 1).node();
    assert!(matches!(
        env.list_type(one),
        Err(NodeError::KindMismatch {
            expected: "type",
            ..
        })
    ));
}

#[test]
fn callable_optional_arguments() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let opt = env.optional_type(i32_ty).unwrap();

    let ok = CallableSignature::new("F", i32_ty).arg(i32_ty).arg(opt).optional_args(1);
    let f = env.callable_type(&ok).unwrap();
    assert_eq!(env.callable_signature(f).unwrap().required_args(), 1);
    assert_eq!(env.callable_name(f).unwrap(), "F");
    assert_eq!(env.argument_type(f, 1).unwrap(), opt);
    assert_eq!(env.return_type(f).unwrap(), i32_ty);

    let too_many = CallableSignature::new("F", i32_ty).arg(opt).optional_args(2);
    assert_eq!(
        env.callable_type(&too_many).unwrap_err(),
        NodeError::TooManyOptionalArgs {
            optional: 2,
            total: 1
        }
    );

    let not_optional = CallableSignature::new("F", i32_ty).arg(opt).arg(i32_ty).optional_args(1);
    assert_eq!(
        env.callable_type(&not_optional).unwrap_err(),
        NodeError::OptionalArgNotOptional {
            index: 1,
            found: Kind::Data
        }
    );
}

#[test]
fn variant_needs_nonempty_struct_or_tuple() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);

    let empty = env.empty_tuple_type();
    assert!(matches!(
        env.variant_type(empty),
        Err(NodeError::InvalidVariantUnderlying { .. })
    ));
    assert!(matches!(
        env.variant_type(i32_ty),
        Err(NodeError::InvalidVariantUnderlying { .. })
    ));

    let tuple = env.tuple_type(&[i32_ty, env.void_type()]).unwrap();
    let variant = env.variant_type(tuple).unwrap();
    assert_eq!(
        env.variant_alternatives(variant).unwrap(),
        vec![i32_ty, env.void_type()]
    );
}

#[test]
fn wrappers_record_their_parts() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);

    let tagged = env.tagged_type(i32_ty, "UserId").unwrap();
    assert_eq!(env.tagged_base(tagged).unwrap(), (i32_ty, "UserId"));

    let dict = env.dict_type(i32_ty, env.void_type()).unwrap();
    assert_eq!(env.dict_types(dict).unwrap(), (i32_ty, env.void_type()));

    let block = env.block_type(i32_ty, BlockShape::Many).unwrap();
    assert_eq!(env.item_type(block).unwrap(), i32_ty);

    let resource = env.resource_type("Handle").unwrap();
    assert_eq!(env.kind_of(resource), Kind::Resource);
}

// ── Literals ───────────────────────────────────────────────────────

#[test]
fn data_literal_checks_slot() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    assert!(env.data_literal(i32_ty, DataValue::Int32(7)).is_ok());
    assert_eq!(
        env.data_literal(i32_ty, DataValue::Int64(7)).unwrap_err(),
        NodeError::DataValueMismatch {
            expected: DataSlot::Int32,
            found: DataSlot::Int64
        }
    );

    let dec = env.decimal_type(10, 2).unwrap();
    assert!(env.data_literal(dec, DataValue::Decimal(12345)).is_ok());
}

#[test]
fn byte_payload_needs_variable_length_slot() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let bytes = |slot| DataValue::Bytes {
        slot,
        bytes: vec![1, 2, 3].into_boxed_slice(),
    };
    assert_eq!(
        env.data_literal(i32_ty, bytes(DataSlot::Int32)).unwrap_err(),
        NodeError::BytesForInlineSlot {
            slot: DataSlot::Int32
        }
    );

    let dec = env.decimal_type(10, 2).unwrap();
    assert_eq!(
        env.data_literal(dec, bytes(DataSlot::Decimal)).unwrap_err(),
        NodeError::BytesForInlineSlot {
            slot: DataSlot::Decimal
        }
    );
    assert!(matches!(
        env.data_value(bytes(DataSlot::TzDate)),
        Err(NodeError::BytesForInlineSlot { .. })
    ));

    let uuid = env.data_type(DataSlot::Uuid).unwrap();
    let lit = env.data_literal(uuid, bytes(DataSlot::Uuid)).unwrap();
    assert_eq!(env.format_node(lit), "Data : Uuid");
}

#[test]
fn struct_literal_checks_member_types() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let utf8_ty = env.data_type(DataSlot::Utf8).unwrap();
    let ty = env.struct_type(&[("id", i32_ty), ("name", utf8_ty)]).unwrap();

    let id = int32(&mut env, 1);
    let name = utf8(&mut env, "x");
    assert!(env.struct_literal(ty, &[id, name]).is_ok());

    let err = env.struct_literal(ty, &[name, id]).unwrap_err();
    assert_eq!(
        err,
        NodeError::ChildTypeMismatch {
            context: "struct literal",
            index: 0,
            expected: "Int32".to_owned(),
            found: "Utf8".to_owned(),
        }
    );
    assert_eq!(
        env.struct_literal(ty, &[id]).unwrap_err(),
        NodeError::WrongChildCount {
            context: "struct literal",
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn literal_children_need_exact_types() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let tagged = env.tagged_type(i32_ty, "Tag").unwrap();
    let list = env.list_type(tagged).unwrap();
    let one = int32(&mut env, 1);

    // Convertible with tags ignored, but not the same type.
    assert!(matches!(
        env.list_literal(list, &[one]),
        Err(NodeError::ChildTypeMismatch { .. })
    ));
}

#[test]
fn list_literal_compacts_void_items() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let list_ty = env.list_type(i32_ty).unwrap();
    let a = int32(&mut env, 42);
    let b = int32(&mut env, 7);
    let void = RuntimeNode::immediate(env.void());

    let list = env.list_literal(list_ty, &[a, void, b]).unwrap();
    let Some(LiteralData::List(items)) = env.as_literal(list) else {
        panic!("expected a list literal");
    };
    assert_eq!(items.as_slice(), &[a, b]);
    assert_eq!(env.format_node_verbose(list), "[42, 7] : List<Int32>");
}

#[test]
fn optional_and_dict_literals() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let opt_ty = env.optional_type(i32_ty).unwrap();
    let one = int32(&mut env, 1);

    let some = env.optional_literal(opt_ty, Some(one)).unwrap();
    let none = env.optional_literal(opt_ty, None).unwrap();
    assert!(!env.node_equals(some, none));

    let dict_ty = env.dict_type(i32_ty, opt_ty).unwrap();
    let entry = (one, RuntimeNode::immediate(some));
    let dict = env.dict_literal(dict_ty, &[entry]).unwrap();
    assert_eq!(env.kind_of(dict), Kind::Dict);

    let wrong = (RuntimeNode::immediate(some), one);
    assert!(matches!(
        env.dict_literal(dict_ty, &[wrong]),
        Err(NodeError::ChildTypeMismatch {
            context: "dict key",
            ..
        })
    ));
}

#[test]
fn callable_input_count_must_match() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let sig = CallableSignature::new("Inc", i32_ty).arg(i32_ty);
    let ty = env.callable_type(&sig).unwrap();
    let one = int32(&mut env, 1);

    assert!(env.callable(ty, &[one]).is_ok());
    assert_eq!(
        env.callable(ty, &[]).unwrap_err(),
        NodeError::WrongChildCount {
            context: "callable inputs",
            expected: 1,
            found: 0
        }
    );
}

#[test]
fn callable_with_result_checks_return_type() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let ty = env.callable_type(&CallableSignature::new("C", i32_ty)).unwrap();
    let one = int32(&mut env, 1);
    let text = utf8(&mut env, "no");

    let resolved = env.callable_with_result(ty, one).unwrap();
    assert_eq!(env.value(RuntimeNode::deferred(resolved)).unwrap(), one.node());
    assert!(matches!(
        env.callable_with_result(ty, text),
        Err(NodeError::ChildTypeMismatch { .. })
    ));
}

#[test]
fn variant_literal_index_and_type() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let utf8_ty = env.data_type(DataSlot::Utf8).unwrap();
    let tuple = env.tuple_type(&[i32_ty, utf8_ty]).unwrap();
    let variant = env.variant_type(tuple).unwrap();
    let text = utf8(&mut env, "x");

    assert!(env.variant_literal(variant, text, 1).is_ok());
    assert!(matches!(
        env.variant_literal(variant, text, 0),
        Err(NodeError::ChildTypeMismatch { .. })
    ));
    assert_eq!(
        env.variant_literal(variant, text, 2).unwrap_err(),
        NodeError::VariantIndexOutOfRange { index: 2, count: 2 }
    );
}

#[test]
fn literal_children_are_frozen() {
    let mut env = Environment::new();
    let i32_ty = i32_type(&mut env);
    let ty = env.callable_type(&CallableSignature::new("C", i32_ty)).unwrap();
    let one = int32(&mut env, 1);
    let call = env.callable_with_result(ty, one).unwrap();

    let opt_ty = env.optional_type(i32_ty).unwrap();
    let opt = env
        .optional_literal(opt_ty, Some(RuntimeNode::deferred(call)))
        .unwrap();
    let Some(LiteralData::Optional(Some(item))) = env.as_literal(opt) else {
        panic!("expected a filled optional");
    };
    assert_eq!(*item, one);
}
