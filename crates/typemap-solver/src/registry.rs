//! Equivalence registry.
//!
//! The host type system exposes several spellings for one logical container
//! shape. This module owns the closed table that says which origins are the
//! same shape for undirected compatibility, and which canonical origin a
//! spelling belongs to.
//!
//! Classes are searched in registration order. The first class containing an
//! origin owns it, so more specific concrete entries are listed before the
//! catch-all abstract entry at the end.
//!
//! The table is static; the lookup index is built once on first use and never
//! mutated afterwards.

use crate::metadata::strip_metadata;
use crate::types::{AbstractOrigin as A, ConcreteOrigin as C, Origin, TypeExpr};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// A closed set of origins treated as the same shape.
#[derive(Debug)]
pub struct EquivalenceClass {
    /// Most specific origin of the class.
    pub canonical: Origin,
    pub members: &'static [Origin],
}

const fn concrete(origin: C) -> Origin {
    Origin::Concrete(origin)
}

const fn abs(origin: A) -> Origin {
    Origin::Abstract(origin)
}

static EQUIVALENCE_CLASSES: &[EquivalenceClass] = &[
    // Sequences
    EquivalenceClass {
        canonical: concrete(C::List),
        members: &[
            concrete(C::List),
            abs(A::Sequence),
            abs(A::MutableSequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
    EquivalenceClass {
        canonical: concrete(C::Tuple),
        members: &[
            concrete(C::Tuple),
            abs(A::Sequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
    // Sets
    EquivalenceClass {
        canonical: concrete(C::Set),
        members: &[
            concrete(C::Set),
            abs(A::AbstractSet),
            abs(A::MutableSet),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
    EquivalenceClass {
        canonical: concrete(C::FrozenSet),
        members: &[
            concrete(C::FrozenSet),
            abs(A::AbstractSet),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
    // Mappings
    EquivalenceClass {
        canonical: concrete(C::Dict),
        members: &[
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    },
    // Mapping specializations
    EquivalenceClass {
        canonical: concrete(C::DefaultDict),
        members: &[
            concrete(C::DefaultDict),
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    },
    EquivalenceClass {
        canonical: concrete(C::OrderedDict),
        members: &[
            concrete(C::OrderedDict),
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    },
    EquivalenceClass {
        canonical: concrete(C::Counter),
        members: &[
            concrete(C::Counter),
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    },
    EquivalenceClass {
        canonical: concrete(C::ChainMap),
        members: &[
            concrete(C::ChainMap),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    },
    // Sequence specializations
    EquivalenceClass {
        canonical: concrete(C::Deque),
        members: &[
            concrete(C::Deque),
            abs(A::MutableSequence),
            abs(A::Sequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
    // Callables
    EquivalenceClass {
        canonical: concrete(C::Function),
        members: &[concrete(C::Function), abs(A::Callable)],
    },
    // Generators
    EquivalenceClass {
        canonical: concrete(C::Generator),
        members: &[
            concrete(C::Generator),
            abs(A::Generator),
            abs(A::Iterator),
            abs(A::Iterable),
        ],
    },
    // Abstract sequence: ties the specializations to the general sequences
    EquivalenceClass {
        canonical: abs(A::Sequence),
        members: &[
            concrete(C::Deque),
            concrete(C::List),
            concrete(C::Tuple),
            abs(A::Sequence),
            abs(A::MutableSequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    },
];

/// Origin -> indices of the classes containing it, in registration order.
static CLASS_INDEX: Lazy<FxHashMap<Origin, SmallVec<[u8; 4]>>> = Lazy::new(|| {
    let mut index: FxHashMap<Origin, SmallVec<[u8; 4]>> = FxHashMap::default();
    for (idx, class) in EQUIVALENCE_CLASSES.iter().enumerate() {
        for &member in class.members {
            index.entry(member).or_default().push(idx as u8);
        }
    }
    index
});

/// Every registered equivalence class, in lookup order.
pub fn equivalence_classes() -> &'static [EquivalenceClass] {
    EQUIVALENCE_CLASSES
}

/// Map an alternate spelling onto the origin it stands for.
///
/// Alias spellings of concrete containers denote the concrete container;
/// every other origin is its own spelling.
#[inline]
pub fn resolve_spelling(origin: Origin) -> Origin {
    match origin {
        Origin::Alias(concrete) => Origin::Concrete(concrete),
        other => other,
    }
}

fn classes_of(origin: Origin) -> &'static [u8] {
    CLASS_INDEX
        .get(&resolve_spelling(origin))
        .map(|classes| classes.as_slice())
        .unwrap_or(&[])
}

/// Origin-level identity: equal after spelling resolution, or co-members of
/// some registered class.
pub fn origins_share_class(o1: Origin, o2: Origin) -> bool {
    let (o1, o2) = (resolve_spelling(o1), resolve_spelling(o2));
    if o1 == o2 {
        return true;
    }
    let right = classes_of(o2);
    classes_of(o1).iter().any(|class| right.contains(class))
}

/// Flatten nested unions into their non-union members, outermost first.
///
/// Non-union expressions yield themselves. Metadata wrappers around members
/// are stripped.
pub fn union_members(expr: &TypeExpr) -> SmallVec<[&TypeExpr; 4]> {
    let mut members = SmallVec::new();
    let mut stack: SmallVec<[&TypeExpr; 4]> = SmallVec::new();
    stack.push(strip_metadata(expr));
    while let Some(next) = stack.pop() {
        if next.is_union() {
            for arg in next.args.iter().rev() {
                stack.push(strip_metadata(arg));
            }
        } else {
            members.push(next);
        }
    }
    members
}

/// Undirected origin equivalence between two expressions.
///
/// True when the origins are identical after spelling resolution, share a
/// registered class, or, when either side is a union, some member of the
/// union side is equivalent to the other side (some cross pair when both are
/// unions). Type arguments are not inspected.
pub fn origins_equivalent(t1: &TypeExpr, t2: &TypeExpr) -> bool {
    let (t1, t2) = (strip_metadata(t1), strip_metadata(t2));
    if origins_share_class(t1.origin, t2.origin) {
        return true;
    }
    if !t1.is_union() && !t2.is_union() {
        return false;
    }
    let left = union_members(t1);
    let right = union_members(t2);
    left.iter().any(|l| {
        right
            .iter()
            .any(|r| origins_share_class(l.origin, r.origin))
    })
}

fn owning_class(origin: Origin) -> Option<&'static EquivalenceClass> {
    classes_of(origin)
        .first()
        .map(|&idx| &EQUIVALENCE_CLASSES[idx as usize])
}

/// The most specific registered canonical origin for `expr`.
///
/// Unregistered non-generic origins are their own canonical origin. An
/// unregistered origin carrying type arguments has no canonical origin:
/// `None` is returned rather than a guess.
pub fn canonical_origin(expr: &TypeExpr) -> Option<Origin> {
    let expr = strip_metadata(expr);
    let origin = resolve_spelling(expr.origin);
    if let Some(class) = owning_class(origin) {
        return Some(class.canonical);
    }
    if expr.has_args() {
        return None;
    }
    Some(origin)
}

/// Origins compatible with `expr`'s origin, concrete spellings first.
///
/// Unregistered origins yield just themselves.
pub fn compatibility_chain(expr: &TypeExpr) -> Vec<Origin> {
    let origin = resolve_spelling(strip_metadata(expr).origin);
    match owning_class(origin) {
        Some(class) => {
            let (abstract_members, concrete_members): (Vec<Origin>, Vec<Origin>) = class
                .members
                .iter()
                .copied()
                .partition(|member| matches!(member, Origin::Abstract(_)));
            concrete_members
                .into_iter()
                .chain(abstract_members)
                .collect()
        }
        None => vec![origin],
    }
}

/// Family of a container origin, used to pick an element validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Sequence,
    Tuple,
    Mapping,
    Set,
    /// Not a registered container, or one whose contents are not inspected
    /// (callables, generators).
    Unknown,
}

/// Container family of `origin`, derived from its canonical origin.
pub fn container_kind(origin: Origin) -> ContainerKind {
    let Some(class) = owning_class(resolve_spelling(origin)) else {
        return ContainerKind::Unknown;
    };
    match class.canonical {
        Origin::Concrete(C::List | C::Deque) | Origin::Abstract(A::Sequence) => {
            ContainerKind::Sequence
        }
        Origin::Concrete(C::Tuple) => ContainerKind::Tuple,
        Origin::Concrete(C::Set | C::FrozenSet) => ContainerKind::Set,
        Origin::Concrete(
            C::Dict | C::DefaultDict | C::OrderedDict | C::Counter | C::ChainMap,
        ) => ContainerKind::Mapping,
        _ => ContainerKind::Unknown,
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
