use super::*;
use crate::types::{AbstractOrigin as A, AnnotatedForm, ConcreteOrigin as C, Origin};
use crate::value::{MapKind, Value};
use serde_json::json;

fn check<V: RuntimeValue>(value: &V, expr: &TypeExpr) -> bool {
    RuntimeValidator::new(ClassHierarchy::empty())
        .conforms(value, expr)
        .unwrap()
}

fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Value> {
    values.into_iter().map(Value::Int).collect()
}

#[test]
fn test_scalars() {
    assert!(check(&Value::Int(1), &TypeExpr::int()));
    assert!(check(&Value::Bool(true), &TypeExpr::int()));
    assert!(!check(&Value::Int(1), &TypeExpr::bool()));
    assert!(!check(&Value::Int(1), &TypeExpr::str()));
    assert!(!check(&Value::Int(1), &TypeExpr::float()));
    assert!(check(&Value::Float(1.5), &TypeExpr::float()));
    assert!(check(&Value::str("x"), &TypeExpr::object()));
    assert!(check(&Value::None, &TypeExpr::none()));
    assert!(!check(&Value::None, &TypeExpr::object()));
}

#[test]
fn test_any_accepts_everything() {
    for value in [Value::None, Value::Int(3), Value::Function, Value::list(ints([1]))] {
        assert!(check(&value, &TypeExpr::any()));
    }
}

#[test]
fn test_optional() {
    let opt = TypeExpr::optional(TypeExpr::int());
    assert!(check(&Value::None, &opt));
    assert!(check(&Value::Int(5), &opt));
    assert!(!check(&Value::str("five"), &opt));
}

#[test]
fn test_union_any_member() {
    let u = TypeExpr::union([TypeExpr::int(), TypeExpr::list(TypeExpr::str())]);
    assert!(check(&Value::Int(1), &u));
    assert!(check(&Value::list([Value::str("a")]), &u));
    assert!(!check(&Value::list([Value::Int(1)]), &u));
    assert!(!check(&Value::None, &u));

    let with_none = TypeExpr::union([TypeExpr::int(), TypeExpr::str(), TypeExpr::none()]);
    assert!(check(&Value::None, &with_none));
}

#[test]
fn test_sequence_elements() {
    let list_int = TypeExpr::list(TypeExpr::int());
    assert!(check(&Value::list(ints([1, 2, 3])), &list_int));
    assert!(!check(&Value::list([Value::Int(1), Value::str("a")]), &list_int));
    assert!(check(&Value::List(Vec::new()), &list_int));
    assert!(check(
        &Value::list([Value::Int(1), Value::str("a")]),
        &TypeExpr::list(TypeExpr::any())
    ));
    assert!(!check(&Value::Int(1), &list_int));
}

#[test]
fn test_sequence_shapes_are_undirected() {
    let seq = TypeExpr::sequence(TypeExpr::int());
    assert!(check(&Value::list(ints([1])), &seq));
    assert!(check(&Value::Deque(ints([1, 2])), &seq));
    assert!(check(&Value::Deque(ints([1, 2])), &TypeExpr::list(TypeExpr::int())));
    assert!(!check(&Value::Set(ints([1])), &TypeExpr::list(TypeExpr::int())));
}

#[test]
fn test_sampling_bound() {
    let mut items = ints(0..10);
    items.extend((10..1000).map(|i| Value::str(i.to_string())));
    let value = Value::List(items);
    let expr = TypeExpr::list(TypeExpr::int());

    assert!(check(&value, &expr));

    let exhaustive = RelationPolicy::validation().with_sample_limit(usize::MAX);
    let mut validator = RuntimeValidator::with_policy(ClassHierarchy::empty(), exhaustive);
    assert!(!validator.conforms(&value, &expr).unwrap());
}

#[test]
fn test_sampling_limit_is_configurable() {
    let value = Value::list([Value::Int(1), Value::str("x")]);
    let expr = TypeExpr::list(TypeExpr::int());
    let policy = RelationPolicy::validation().with_sample_limit(1);
    let mut validator = RuntimeValidator::with_policy(ClassHierarchy::empty(), policy);
    assert_eq!(validator.sample_limit(), 1);
    assert!(validator.conforms(&value, &expr).unwrap());
}

#[test]
fn test_set_elements() {
    let expr = TypeExpr::set(TypeExpr::str());
    assert!(check(&Value::Set(vec![Value::str("a")]), &expr));
    assert!(!check(&Value::Set(vec![Value::Int(1)]), &expr));

    let frozen = TypeExpr::concrete(C::FrozenSet, vec![TypeExpr::int()]);
    assert!(check(&Value::FrozenSet(ints([1, 2])), &frozen));

    let abstract_set = TypeExpr::abstract_(A::AbstractSet, vec![TypeExpr::int()]);
    assert!(check(&Value::FrozenSet(ints([1])), &abstract_set));
}

#[test]
fn test_tuple_positional() {
    let pair = TypeExpr::concrete(C::Tuple, vec![TypeExpr::int(), TypeExpr::str()]);
    assert!(check(&Value::tuple([Value::Int(1), Value::str("a")]), &pair));
    assert!(!check(&Value::tuple([Value::str("a"), Value::Int(1)]), &pair));
    assert!(!check(&Value::tuple([Value::Int(1)]), &pair));
    assert!(!check(
        &Value::tuple([Value::Int(1), Value::str("a"), Value::Int(2)]),
        &pair
    ));
}

#[test]
fn test_tuple_single_argument_is_homogeneous() {
    let homogeneous = TypeExpr::concrete(C::Tuple, vec![TypeExpr::int()]);
    assert!(check(&Value::Tuple(ints([1, 2, 3])), &homogeneous));
    assert!(!check(&Value::tuple([Value::Int(1), Value::str("x")]), &homogeneous));
}

#[test]
fn test_mapping_entries() {
    let expr = TypeExpr::mapping(TypeExpr::str(), TypeExpr::int());
    let good = Value::dict([(Value::str("a"), Value::Int(1))]);
    let bad_value = Value::dict([(Value::str("a"), Value::str("x"))]);
    let bad_key = Value::dict([(Value::Int(1), Value::Int(1))]);

    assert!(check(&good, &expr));
    assert!(!check(&bad_value, &expr));
    assert!(!check(&bad_key, &expr));
    assert!(check(&Value::Map(MapKind::Plain, Vec::new()), &expr));
    assert!(!check(&Value::list(ints([1])), &expr));
}

#[test]
fn test_mapping_any_sides_are_skipped() {
    let value = Value::dict([(Value::Int(1), Value::str("x"))]);
    assert!(check(&value, &TypeExpr::dict(TypeExpr::any(), TypeExpr::str())));
    assert!(check(&value, &TypeExpr::dict(TypeExpr::int(), TypeExpr::any())));
    assert!(check(&value, &TypeExpr::dict(TypeExpr::any(), TypeExpr::any())));
    assert!(!check(&value, &TypeExpr::dict(TypeExpr::any(), TypeExpr::int())));

    let one_arg = TypeExpr::abstract_(A::Mapping, vec![TypeExpr::str()]);
    assert!(check(&value, &one_arg));
}

#[test]
fn test_mapping_specializations() {
    let value = Value::mapping(MapKind::Ordered, [(Value::str("a"), Value::Int(1))]);
    let expr = TypeExpr::dict(TypeExpr::str(), TypeExpr::int());
    assert!(check(&value, &expr));

    let counter = Value::mapping(MapKind::Counter, [(Value::str("a"), Value::Int(3))]);
    assert!(check(&counter, &TypeExpr::mapping(TypeExpr::str(), TypeExpr::int())));
}

#[test]
fn test_mapping_of_optional_end_to_end() {
    let expr = TypeExpr::mapping(TypeExpr::str(), TypeExpr::optional(TypeExpr::int()));

    let ok = Value::dict([
        (Value::str("a"), Value::Int(1)),
        (Value::str("b"), Value::None),
    ]);
    let wrong_value = Value::dict([(Value::str("a"), Value::str("x"))]);
    let wrong_key = Value::dict([(Value::Int(1), Value::Int(1))]);

    assert!(check(&ok, &expr));
    assert!(!check(&wrong_value, &expr));
    assert!(!check(&wrong_key, &expr));
}

#[test]
fn test_unknown_generic_origin_checks_shape_only() {
    let callable = TypeExpr::abstract_(A::Callable, vec![TypeExpr::int(), TypeExpr::str()]);
    assert!(check(&Value::Function, &callable));
    assert!(!check(&Value::Int(1), &callable));

    let generator = TypeExpr::abstract_(A::Iterator, vec![TypeExpr::int()]);
    assert!(check(&Value::Generator, &generator));
}

#[test]
fn test_text_is_a_sequence_of_text() {
    let seq_str = TypeExpr::sequence(TypeExpr::str());
    assert!(check(&Value::str("abc"), &seq_str));
    assert!(!check(&Value::str("abc"), &TypeExpr::sequence(TypeExpr::int())));
    assert!(check(&Value::Bytes(b"ab".to_vec()), &TypeExpr::sequence(TypeExpr::int())));
    assert!(!check(&Value::str("abc"), &TypeExpr::list(TypeExpr::str())));
}

#[test]
fn test_class_instances() {
    let mut builder = ClassHierarchy::builder();
    let base = builder.class("Base", &[]).unwrap();
    let derived = builder.class("Derived", &[Origin::Class(base)]).unwrap();
    let hierarchy = builder.build();
    let mut validator = RuntimeValidator::new(&hierarchy);

    let instance = Value::Instance(derived);
    assert!(validator.conforms(&instance, &TypeExpr::class(base)).unwrap());
    assert!(validator.conforms(&instance, &TypeExpr::object()).unwrap());
    assert!(
        !validator
            .conforms(&Value::Instance(base), &TypeExpr::class(derived))
            .unwrap()
    );

    let list = Value::list([Value::Instance(derived), Value::Instance(base)]);
    assert!(validator.conforms(&list, &TypeExpr::list(TypeExpr::class(base))).unwrap());
    assert!(!validator.conforms(&list, &TypeExpr::list(TypeExpr::class(derived))).unwrap());
}

#[test]
fn test_metadata_is_transparent() {
    let expr = TypeExpr::annotated(
        AnnotatedForm::Standard,
        TypeExpr::list(TypeExpr::int()),
        vec![json!({"max_len": 3})],
    );
    assert!(check(&Value::list(ints([1, 2])), &expr));
    assert!(!check(&Value::list([Value::str("a")]), &expr));

    let element = TypeExpr::annotated(AnnotatedForm::Extension, TypeExpr::any(), vec![]);
    assert!(check(&Value::list([Value::str("a")]), &TypeExpr::list(element)));
}

#[test]
fn test_json_values() {
    let expr = TypeExpr::mapping(TypeExpr::str(), TypeExpr::optional(TypeExpr::int()));
    assert!(check(&json!({"a": 1, "b": null}), &expr));
    assert!(!check(&json!({"a": "x"}), &expr));
    assert!(!check(&json!([1, 2]), &expr));

    let floats = TypeExpr::list(TypeExpr::float());
    assert!(check(&json!([1.5, 2.5]), &floats));
    assert!(!check(&json!([1, 2.5]), &floats));

    let nested = TypeExpr::list(TypeExpr::dict(TypeExpr::str(), TypeExpr::list(TypeExpr::bool())));
    assert!(check(&json!([{"flags": [true, false]}, {}]), &nested));
    assert!(!check(&json!([{"flags": [true, 1]}]), &nested));
}

#[test]
fn test_depth_exceeded() {
    let mut value = Value::Int(1);
    let mut expr = TypeExpr::int();
    for _ in 0..150 {
        value = Value::list([value]);
        expr = TypeExpr::list(expr);
    }
    let mut validator = RuntimeValidator::new(ClassHierarchy::empty());
    let err = validator.conforms(&value, &expr).unwrap_err();
    assert_eq!(err.limit, 100);

    let policy = RelationPolicy::validation().with_max_depth(500);
    let mut validator = RuntimeValidator::with_policy(ClassHierarchy::empty(), policy);
    assert!(validator.conforms(&value, &expr).unwrap());
}

#[test]
fn test_unregistered_generic_class() {
    let mut builder = ClassHierarchy::builder();
    let boxed = builder.class("Box", &[]).unwrap();
    let hierarchy = builder.build();

    let expr = TypeExpr::new(Origin::Class(boxed), vec![TypeExpr::int()]);
    let mut validator = RuntimeValidator::new(&hierarchy);
    assert!(validator.conforms(&Value::Instance(boxed), &expr).unwrap());
    assert!(!validator.conforms(&Value::Int(1), &expr).unwrap());
}
