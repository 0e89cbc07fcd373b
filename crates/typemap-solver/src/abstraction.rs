//! Abstraction edges and container specializations.
//!
//! The registry answers "same shape?" without a direction. Subtyping needs
//! one: a concrete container widens to the interfaces it implements, never
//! the other way round. This module holds the two directed tables:
//!
//! - **Abstraction edges**: `origin -> origins it may widen to`.
//! - **Specializations**: `specialized container -> general container`, used
//!   as a shortcut before the edge lookup.
//!
//! Both tables are keyed by resolved spellings (see
//! [`resolve_spelling`](crate::registry::resolve_spelling)).

use crate::types::{AbstractOrigin as A, ConcreteOrigin as C, Origin};

const fn concrete(origin: C) -> Origin {
    Origin::Concrete(origin)
}

const fn abs(origin: A) -> Origin {
    Origin::Abstract(origin)
}

static ABSTRACTION_EDGES: &[(Origin, &[Origin])] = &[
    // Concrete containers
    (
        concrete(C::List),
        &[
            abs(A::Sequence),
            abs(A::MutableSequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    ),
    (
        concrete(C::Tuple),
        &[abs(A::Sequence), abs(A::Iterable), abs(A::Container)],
    ),
    (
        concrete(C::Set),
        &[
            abs(A::AbstractSet),
            abs(A::MutableSet),
            abs(A::Iterable),
            abs(A::Container),
        ],
    ),
    (
        concrete(C::FrozenSet),
        &[abs(A::AbstractSet), abs(A::Iterable), abs(A::Container)],
    ),
    (
        concrete(C::Dict),
        &[abs(A::Mapping), abs(A::MutableMapping), abs(A::Container)],
    ),
    // Specialized containers
    (
        concrete(C::DefaultDict),
        &[
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    ),
    (
        concrete(C::OrderedDict),
        &[
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    ),
    (
        concrete(C::Counter),
        &[
            concrete(C::Dict),
            abs(A::Mapping),
            abs(A::MutableMapping),
            abs(A::Container),
        ],
    ),
    (
        concrete(C::ChainMap),
        &[abs(A::Mapping), abs(A::MutableMapping), abs(A::Container)],
    ),
    (
        concrete(C::Deque),
        &[
            abs(A::MutableSequence),
            abs(A::Sequence),
            abs(A::Iterable),
            abs(A::Container),
        ],
    ),
    (concrete(C::Function), &[abs(A::Callable)]),
    (
        concrete(C::Generator),
        &[abs(A::Generator), abs(A::Iterator), abs(A::Iterable)],
    ),
    // Interfaces widen to their own super-interfaces
    (
        abs(A::MutableSequence),
        &[abs(A::Sequence), abs(A::Iterable), abs(A::Container)],
    ),
    (abs(A::Sequence), &[abs(A::Iterable), abs(A::Container)]),
    (
        abs(A::MutableSet),
        &[abs(A::AbstractSet), abs(A::Iterable), abs(A::Container)],
    ),
    (abs(A::AbstractSet), &[abs(A::Iterable), abs(A::Container)]),
    (abs(A::MutableMapping), &[abs(A::Mapping), abs(A::Container)]),
    (abs(A::Mapping), &[abs(A::Container)]),
    (abs(A::Generator), &[abs(A::Iterator), abs(A::Iterable)]),
    (abs(A::Iterator), &[abs(A::Iterable)]),
];

static SPECIALIZATIONS: &[(Origin, Origin)] = &[
    (concrete(C::DefaultDict), concrete(C::Dict)),
    (concrete(C::OrderedDict), concrete(C::Dict)),
    (concrete(C::Counter), concrete(C::Dict)),
    (concrete(C::ChainMap), concrete(C::Dict)),
    (concrete(C::Deque), concrete(C::List)),
];

/// Origins `origin` may widen to, excluding itself.
pub fn abstractions_of(origin: Origin) -> &'static [Origin] {
    ABSTRACTION_EDGES
        .iter()
        .find(|(from, _)| *from == origin)
        .map(|(_, to)| *to)
        .unwrap_or(&[])
}

/// True if `sub` reaches `sup` through an abstraction edge.
///
/// The relation is asymmetric: a missing entry for `sub` means `sub` widens
/// only to itself.
pub fn abstracts_to(sub: Origin, sup: Origin) -> bool {
    sub == sup || abstractions_of(sub).contains(&sup)
}

/// The general container a specialized container stands in for.
pub fn specialization_base(origin: Origin) -> Option<Origin> {
    SPECIALIZATIONS
        .iter()
        .find(|(specialized, _)| *specialized == origin)
        .map(|(_, base)| *base)
}

#[cfg(test)]
#[path = "../tests/abstraction_tests.rs"]
mod tests;
