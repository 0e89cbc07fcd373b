use super::*;
use crate::types::ConcreteOrigin;

#[test]
fn test_builder_assigns_sequential_ids() {
    let mut builder = ClassHierarchy::builder();
    let animal = builder.class("Animal", &[]).unwrap();
    let dog = builder.class("Dog", &[Origin::Class(animal)]).unwrap();
    let hierarchy = builder.build();

    assert_eq!(animal, ClassId(0));
    assert_eq!(dog, ClassId(1));
    assert_eq!(hierarchy.len(), 2);
    assert_eq!(hierarchy.name(dog), Some("Dog"));
    assert_eq!(hierarchy.find("Animal"), Some(animal));
    assert_eq!(hierarchy.find("Cat"), None);
    assert_eq!(hierarchy.bases(Origin::Class(dog)), &[Origin::Class(animal)]);
}

#[test]
fn test_container_and_scalar_bases_are_accepted() {
    let mut builder = ClassHierarchy::builder();
    let bag = builder
        .class(
            "Bag",
            &[
                Origin::Concrete(ConcreteOrigin::List),
                Origin::Abstract(AbstractOrigin::Iterable),
                Origin::Scalar(ScalarKind::Object),
            ],
        )
        .unwrap();
    let hierarchy = builder.build();
    assert_eq!(hierarchy.bases(Origin::Class(bag)).len(), 3);
}

#[test]
fn test_undeclared_base_is_rejected() {
    let mut builder = ClassHierarchy::builder();
    let err = builder
        .class("Orphan", &[Origin::Class(ClassId(5))])
        .unwrap_err();

    assert_eq!(
        err,
        HierarchyError::UnknownBase {
            class: "Orphan".to_string(),
            base: ClassId(5),
        }
    );
    assert_eq!(err.to_string(), "class 'Orphan' names undeclared base class #5");
}

#[test]
fn test_self_reference_is_rejected() {
    let mut builder = ClassHierarchy::builder();
    // The id the class would receive does not exist yet.
    let err = builder.class("Loop", &[Origin::Class(ClassId(0))]);
    assert!(matches!(err, Err(HierarchyError::UnknownBase { .. })));
}

#[test]
fn test_non_class_bases_are_rejected() {
    for base in [
        Origin::Any,
        Origin::NoneType,
        Origin::Union,
        Origin::Annotated(crate::types::AnnotatedForm::Standard),
    ] {
        let mut builder = ClassHierarchy::builder();
        let err = builder.class("Bad", &[base]).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::InvalidBase {
                class: "Bad".to_string(),
                base,
            }
        );
    }

    let mut builder = ClassHierarchy::builder();
    let err = builder.class("Bad", &[Origin::Union]).unwrap_err();
    assert_eq!(err.to_string(), "class 'Bad' cannot inherit from Union");
}

#[test]
fn test_builtin_scalar_bases() {
    let hierarchy = ClassHierarchy::empty();
    assert_eq!(
        hierarchy.bases(Origin::Scalar(ScalarKind::Bool)),
        &[Origin::Scalar(ScalarKind::Int)]
    );
    assert_eq!(
        hierarchy.bases(Origin::Scalar(ScalarKind::Str)),
        &[Origin::Abstract(AbstractOrigin::Sequence)]
    );
    assert!(hierarchy.bases(Origin::Scalar(ScalarKind::Int)).is_empty());
    assert!(hierarchy.bases(Origin::NoneType).is_empty());
}

#[test]
fn test_empty_hierarchy() {
    let hierarchy = ClassHierarchy::empty();
    assert!(hierarchy.is_empty());
    assert!(hierarchy.get(ClassId(0)).is_none());
    assert!(hierarchy.bases(Origin::Class(ClassId(0))).is_empty());
}
