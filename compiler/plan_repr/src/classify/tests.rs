#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use plan_node::{BlockShape, CallableSignature, DataSlot, DataValue, Environment, Kind, NodeId};

use super::*;

fn classify(env: &Environment, ty: NodeId) -> Result<ValueRepr, ReprError> {
    ReprClassifier::new(env).value_repr(ty)
}

// === Data slots ===

#[test]
fn fixed_size_scalars_are_embedded() {
    let mut env = Environment::new();
    for slot in [
        DataSlot::Bool,
        DataSlot::Int8,
        DataSlot::Uint64,
        DataSlot::Double,
        DataSlot::Date,
        DataSlot::Interval,
    ] {
        let ty = env.data_type(slot).unwrap();
        assert_eq!(classify(&env, ty), Ok(ValueRepr::Embedded), "{slot}");
    }
}

#[test]
fn decimal_and_tz_are_embedded() {
    let mut env = Environment::new();
    let dec = env.decimal_type(10, 2).unwrap();
    let tz = env.data_type(DataSlot::TzTimestamp).unwrap();
    assert_eq!(classify(&env, dec), Ok(ValueRepr::Embedded));
    assert_eq!(classify(&env, tz), Ok(ValueRepr::Embedded));
}

#[test]
fn strings_are_string() {
    let mut env = Environment::new();
    for slot in [DataSlot::String, DataSlot::Utf8, DataSlot::Json, DataSlot::Uuid] {
        let ty = env.data_type(slot).unwrap();
        assert_eq!(classify(&env, ty), Ok(ValueRepr::String), "{slot}");
    }
}

#[test]
fn data_repr_covers_every_slot() {
    for slot in DataSlot::ALL {
        let expected = if slot.is_fixed_size() || slot.is_tz_date() || slot == DataSlot::Decimal {
            ValueRepr::Embedded
        } else {
            ValueRepr::String
        };
        assert_eq!(data_repr(slot), expected, "{slot}");
    }
}

// === Containers ===

#[test]
fn containers_are_boxed() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let list = env.list_type(i32_ty).unwrap();
    let stream = env.stream_type(i32_ty).unwrap();
    let strukt = env.struct_type(&[("a", i32_ty)]).unwrap();
    let tuple = env.tuple_type(&[i32_ty, i32_ty]).unwrap();
    let dict = env.dict_type(i32_ty, i32_ty).unwrap();
    let resource = env.resource_type("File").unwrap();
    let block = env.block_type(i32_ty, BlockShape::Many).unwrap();
    let callable = env
        .callable_type(&CallableSignature::new("F", i32_ty))
        .unwrap();

    for ty in [
        list,
        stream,
        strukt,
        tuple,
        dict,
        resource,
        block,
        callable,
        env.empty_list_type(),
        env.empty_dict_type(),
        env.empty_struct_type(),
    ] {
        assert_eq!(classify(&env, ty), Ok(ValueRepr::Boxed));
    }
}

// === Wrappers ===

#[test]
fn optional_of_scalar_is_embedded() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let opt = env.optional_type(i32_ty).unwrap();
    assert_eq!(classify(&env, opt), Ok(ValueRepr::Embedded));
}

#[test]
fn nested_wrappers_follow_innermost_item() {
    let mut env = Environment::new();
    let utf8 = env.data_type(DataSlot::Utf8).unwrap();
    let opt = env.optional_type(utf8).unwrap();
    let opt2 = env.optional_type(opt).unwrap();
    let flow = env.flow_type(opt2).unwrap();
    assert_eq!(classify(&env, flow), Ok(ValueRepr::String));

    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let list = env.list_type(i32_ty).unwrap();
    let opt_list = env.optional_type(list).unwrap();
    assert_eq!(classify(&env, opt_list), Ok(ValueRepr::Boxed));
}

#[test]
fn variant_and_void_are_any() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let tuple = env.tuple_type(&[i32_ty, i32_ty]).unwrap();
    let variant = env.variant_type(tuple).unwrap();
    assert_eq!(classify(&env, variant), Ok(ValueRepr::Any));
    assert_eq!(classify(&env, env.void_type()), Ok(ValueRepr::Any));
}

#[test]
fn null_is_embedded() {
    let env = Environment::new();
    assert_eq!(classify(&env, env.null_type()), Ok(ValueRepr::Embedded));
}

// === Errors ===

#[test]
fn unsupported_kinds() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let tagged = env.tagged_type(i32_ty, "Id").unwrap();
    let opt_tagged = env.optional_type(tagged).unwrap();

    assert_eq!(
        classify(&env, env.type_of_type()),
        Err(ReprError::Unsupported { kind: Kind::Type })
    );
    assert_eq!(
        classify(&env, env.any_type()),
        Err(ReprError::Unsupported { kind: Kind::Any })
    );
    assert_eq!(
        classify(&env, tagged),
        Err(ReprError::Unsupported { kind: Kind::Tagged })
    );
    assert_eq!(
        classify(&env, opt_tagged),
        Err(ReprError::Unsupported { kind: Kind::Tagged })
    );
}

#[test]
fn literal_is_not_a_type() {
    let mut env = Environment::new();
    let lit = env.data_value(DataValue::Int32(1)).unwrap();
    assert_eq!(classify(&env, lit), Err(ReprError::NotAType { node: lit }));
}

#[test]
fn foreign_node_is_not_a_type() {
    let mut other = Environment::new();
    let foreign = other.data_type(DataSlot::Int32).unwrap();
    let env = Environment::new();
    assert_eq!(
        classify(&env, foreign),
        Err(ReprError::NotAType { node: foreign })
    );
}

// === Cache ===

#[test]
fn cache_records_peeled_wrappers() {
    let mut env = Environment::new();
    let i64_ty = env.data_type(DataSlot::Int64).unwrap();
    let opt = env.optional_type(i64_ty).unwrap();
    let flow = env.flow_type(opt).unwrap();

    let classifier = ReprClassifier::new(&env);
    assert_eq!(classifier.value_repr(flow), Ok(ValueRepr::Embedded));
    {
        let cache = classifier.cache.borrow();
        assert_eq!(cache.get(&flow), Some(&ValueRepr::Embedded));
        assert_eq!(cache.get(&opt), Some(&ValueRepr::Embedded));
        assert_eq!(cache.get(&i64_ty), Some(&ValueRepr::Embedded));
    }
    // Served from the cache on the second call.
    assert_eq!(classifier.value_repr(opt), Ok(ValueRepr::Embedded));
}

#[test]
fn errors_are_not_cached() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let tagged = env.tagged_type(i32_ty, "Id").unwrap();
    let classifier = ReprClassifier::new(&env);
    assert!(classifier.value_repr(tagged).is_err());
    assert!(classifier.cache.borrow().is_empty());
}

// === Predicates ===

#[test]
fn predicates() {
    let mut env = Environment::new();
    let i32_ty = env.data_type(DataSlot::Int32).unwrap();
    let utf8 = env.data_type(DataSlot::Utf8).unwrap();
    let list = env.list_type(i32_ty).unwrap();
    let tagged = env.tagged_type(i32_ty, "Id").unwrap();
    let classifier = ReprClassifier::new(&env);

    assert!(classifier.is_embedded(i32_ty));
    assert!(!classifier.needs_ref_count(i32_ty));
    assert!(classifier.needs_ref_count(utf8));
    assert!(classifier.needs_ref_count(list));
    assert!(classifier.needs_ref_count(env.void_type()));
    assert!(!classifier.is_embedded(tagged));
    assert!(!classifier.needs_ref_count(tagged));
}
