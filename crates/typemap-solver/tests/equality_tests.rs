use super::*;
use crate::types::{AbstractOrigin as A, ConcreteOrigin as C};
use serde_json::json;

#[test]
fn test_equal_type_basics() {
    let ints = TypeExpr::list(TypeExpr::int());
    assert!(is_equal_type(&ints, &TypeExpr::list(TypeExpr::int())));
    assert!(!is_equal_type(&ints, &TypeExpr::sequence(TypeExpr::int())));
    assert!(!is_equal_type(&ints, &TypeExpr::list(TypeExpr::str())));
    assert!(!is_equal_type(&ints, &TypeExpr::of(Origin::Concrete(C::List))));
    assert!(is_equal_type(&TypeExpr::int(), &TypeExpr::int()));
    assert!(is_equal_type(&TypeExpr::none(), &TypeExpr::none()));
    assert!(!is_equal_type(&TypeExpr::bool(), &TypeExpr::int()));
}

#[test]
fn test_equal_type_has_no_variance() {
    let bools = TypeExpr::list(TypeExpr::bool());
    let ints = TypeExpr::list(TypeExpr::int());
    assert!(!is_equal_type(&bools, &ints));
    assert!(!is_equal_type(&TypeExpr::list(TypeExpr::any()), &ints));
}

#[test]
fn test_equal_type_resolves_alias_spelling() {
    let alias = TypeExpr::alias(C::Dict, vec![TypeExpr::str(), TypeExpr::int()]);
    let concrete = TypeExpr::dict(TypeExpr::str(), TypeExpr::int());
    assert!(is_equal_type(&alias, &concrete));
}

#[test]
fn test_equal_type_unions_are_sets() {
    let a = TypeExpr::union([TypeExpr::int(), TypeExpr::str()]);
    let b = TypeExpr::union([TypeExpr::str(), TypeExpr::int()]);
    let c = TypeExpr::union([TypeExpr::str(), TypeExpr::float()]);
    assert!(is_equal_type(&a, &b));
    assert!(!is_equal_type(&a, &c));
}

#[test]
fn test_equal_type_compares_metadata() {
    let standard = TypeExpr::annotated(AnnotatedForm::Standard, TypeExpr::int(), vec![json!(1)]);
    let extension = TypeExpr::annotated(AnnotatedForm::Extension, TypeExpr::int(), vec![json!(1)]);
    let other = TypeExpr::annotated(AnnotatedForm::Standard, TypeExpr::int(), vec![json!(2)]);

    assert!(is_equal_type(&standard, &extension));
    assert!(!is_equal_type(&standard, &other));
    assert!(!is_equal_type(&standard, &TypeExpr::int()));
}

#[test]
fn test_safe_issubclass_origins() {
    let h = ClassHierarchy::empty();
    let list = TypeExpr::of(Origin::Concrete(C::List));
    let seq = TypeExpr::of(Origin::Abstract(A::Sequence));
    assert!(safe_issubclass(h, &list, &seq));
    assert!(!safe_issubclass(h, &seq, &list));
    assert!(safe_issubclass(h, &TypeExpr::bool(), &TypeExpr::int()));

    // Type arguments are ignored.
    assert!(safe_issubclass(h, &TypeExpr::list(TypeExpr::str()), &TypeExpr::sequence(TypeExpr::int())));
}

#[test]
fn test_safe_issubclass_union_requires_every_member() {
    let h = ClassHierarchy::empty();
    let seq = TypeExpr::of(Origin::Abstract(A::Sequence));
    let both = TypeExpr::union([
        TypeExpr::of(Origin::Concrete(C::List)),
        TypeExpr::of(Origin::Concrete(C::Tuple)),
    ]);
    let mixed = TypeExpr::union([TypeExpr::of(Origin::Concrete(C::List)), TypeExpr::int()]);
    assert!(safe_issubclass(h, &both, &seq));
    assert!(!safe_issubclass(h, &mixed, &seq));
}

#[test]
fn test_safe_issubclass_union_classinfo_accepts_any_member() {
    let h = ClassHierarchy::empty();
    let target = TypeExpr::union([TypeExpr::str(), TypeExpr::int()]);
    assert!(safe_issubclass(h, &TypeExpr::bool(), &target));
    assert!(!safe_issubclass(h, &TypeExpr::float(), &target));
}

#[test]
fn test_safe_issubclass_never_fails_on_non_classes() {
    let h = ClassHierarchy::empty();
    assert!(!safe_issubclass(h, &TypeExpr::none(), &TypeExpr::object()));
    assert!(!safe_issubclass(h, &TypeExpr::any(), &TypeExpr::object()));
    assert!(!safe_issubclass(h, &TypeExpr::int(), &TypeExpr::any()));
    assert!(!safe_issubclass(h, &TypeExpr::new(Origin::Union, Vec::new()), &TypeExpr::object()));
}
