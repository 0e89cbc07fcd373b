//! Type expression representation.
//!
//! A [`TypeExpr`] is the normalized triple `(origin, args, metadata)` every
//! query in this crate operates on. Producers build expressions either
//! through the constructors below or by deserializing them with serde.
//!
//! Origins are spelled the way the host type system spells them, so the same
//! logical shape may appear under several [`Origin`] values (a concrete
//! container, its alias spelling, an abstract interface). Identity between
//! spellings is decided by the registry, never by this module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque annotation payload carried by a metadata wrapper.
pub type Metadata = serde_json::Value;

/// Identifier of a nominal class declared in a [`ClassHierarchy`].
///
/// [`ClassHierarchy`]: crate::ClassHierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Built-in non-container classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    /// Root of the nominal hierarchy.
    Object,
}

/// Runtime container classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcreteOrigin {
    List,
    Tuple,
    Set,
    FrozenSet,
    Dict,
    /// Mapping with a default-value factory.
    DefaultDict,
    /// Insertion-ordered mapping.
    OrderedDict,
    /// Mapping from elements to counts.
    Counter,
    /// View over a chain of mappings.
    ChainMap,
    /// Double-ended sequence.
    Deque,
    Function,
    Generator,
}

/// Abstract container interfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbstractOrigin {
    Container,
    Iterable,
    Iterator,
    Sequence,
    MutableSequence,
    AbstractSet,
    MutableSet,
    Mapping,
    MutableMapping,
    Callable,
    Generator,
}

/// Spellings of the metadata wrapper construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotatedForm {
    /// Wrapper provided by the host's standard typing namespace.
    Standard,
    /// Backported wrapper from the extension namespace.
    Extension,
}

/// Unparameterized shape of a type expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Universal top type.
    Any,
    /// The nothing/null marker.
    NoneType,
    /// Union marker; members live in `args`.
    Union,
    /// Metadata wrapper; the base type is `args[0]`.
    Annotated(AnnotatedForm),
    Scalar(ScalarKind),
    Concrete(ConcreteOrigin),
    /// Generic-alias spelling of a concrete container.
    Alias(ConcreteOrigin),
    Abstract(AbstractOrigin),
    /// User-declared nominal class.
    Class(ClassId),
}

impl Origin {
    /// Origins that take part in nominal subclassing.
    ///
    /// The nothing marker, `Any`, unions and wrappers are excluded.
    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            Origin::Scalar(_)
                | Origin::Concrete(_)
                | Origin::Alias(_)
                | Origin::Abstract(_)
                | Origin::Class(_)
        )
    }

    pub fn is_metadata_wrapper(self) -> bool {
        matches!(self, Origin::Annotated(_))
    }

    /// Stable display name, without class-name resolution.
    pub fn name(self) -> &'static str {
        match self {
            Origin::Any => "Any",
            Origin::NoneType => "None",
            Origin::Union => "Union",
            Origin::Annotated(_) => "Annotated",
            Origin::Scalar(kind) => match kind {
                ScalarKind::Bool => "bool",
                ScalarKind::Int => "int",
                ScalarKind::Float => "float",
                ScalarKind::Str => "str",
                ScalarKind::Bytes => "bytes",
                ScalarKind::Object => "object",
            },
            Origin::Concrete(concrete) => concrete.runtime_name(),
            Origin::Alias(concrete) => concrete.alias_name(),
            Origin::Abstract(abs) => match abs {
                AbstractOrigin::Container => "Container",
                AbstractOrigin::Iterable => "Iterable",
                AbstractOrigin::Iterator => "Iterator",
                AbstractOrigin::Sequence => "Sequence",
                AbstractOrigin::MutableSequence => "MutableSequence",
                AbstractOrigin::AbstractSet => "AbstractSet",
                AbstractOrigin::MutableSet => "MutableSet",
                AbstractOrigin::Mapping => "Mapping",
                AbstractOrigin::MutableMapping => "MutableMapping",
                AbstractOrigin::Callable => "Callable",
                AbstractOrigin::Generator => "Generator",
            },
            Origin::Class(_) => "class",
        }
    }
}

impl ConcreteOrigin {
    fn runtime_name(self) -> &'static str {
        match self {
            ConcreteOrigin::List => "list",
            ConcreteOrigin::Tuple => "tuple",
            ConcreteOrigin::Set => "set",
            ConcreteOrigin::FrozenSet => "frozenset",
            ConcreteOrigin::Dict => "dict",
            ConcreteOrigin::DefaultDict => "defaultdict",
            ConcreteOrigin::OrderedDict => "ordereddict",
            ConcreteOrigin::Counter => "counter",
            ConcreteOrigin::ChainMap => "chainmap",
            ConcreteOrigin::Deque => "deque",
            ConcreteOrigin::Function => "function",
            ConcreteOrigin::Generator => "generator",
        }
    }

    fn alias_name(self) -> &'static str {
        match self {
            ConcreteOrigin::List => "List",
            ConcreteOrigin::Tuple => "Tuple",
            ConcreteOrigin::Set => "Set",
            ConcreteOrigin::FrozenSet => "FrozenSet",
            ConcreteOrigin::Dict => "Dict",
            ConcreteOrigin::DefaultDict => "DefaultDict",
            ConcreteOrigin::OrderedDict => "OrderedDict",
            ConcreteOrigin::Counter => "Counter",
            ConcreteOrigin::ChainMap => "ChainMap",
            ConcreteOrigin::Deque => "Deque",
            ConcreteOrigin::Function => "FunctionType",
            ConcreteOrigin::Generator => "GeneratorType",
        }
    }
}

/// A normalized type expression.
///
/// Expressions are immutable values; every query borrows them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeExpr {
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeExpr>,
    /// Payloads of a metadata wrapper; empty for every other origin.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
}

impl TypeExpr {
    pub fn new(origin: Origin, args: Vec<TypeExpr>) -> Self {
        Self {
            origin,
            args,
            metadata: Vec::new(),
        }
    }

    /// A non-generic expression.
    pub fn of(origin: Origin) -> Self {
        Self::new(origin, Vec::new())
    }

    pub fn any() -> Self {
        Self::of(Origin::Any)
    }

    pub fn none() -> Self {
        Self::of(Origin::NoneType)
    }

    pub fn scalar(kind: ScalarKind) -> Self {
        Self::of(Origin::Scalar(kind))
    }

    pub fn int() -> Self {
        Self::scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    pub fn str() -> Self {
        Self::scalar(ScalarKind::Str)
    }

    pub fn bool() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    pub fn object() -> Self {
        Self::scalar(ScalarKind::Object)
    }

    pub fn class(id: ClassId) -> Self {
        Self::of(Origin::Class(id))
    }

    /// A concrete container parameterized by `args`.
    pub fn concrete(origin: ConcreteOrigin, args: Vec<TypeExpr>) -> Self {
        Self::new(Origin::Concrete(origin), args)
    }

    /// An abstract container parameterized by `args`.
    pub fn abstract_(origin: AbstractOrigin, args: Vec<TypeExpr>) -> Self {
        Self::new(Origin::Abstract(origin), args)
    }

    /// The alias spelling of a concrete container parameterized by `args`.
    pub fn alias(origin: ConcreteOrigin, args: Vec<TypeExpr>) -> Self {
        Self::new(Origin::Alias(origin), args)
    }

    pub fn list(element: TypeExpr) -> Self {
        Self::concrete(ConcreteOrigin::List, vec![element])
    }

    pub fn set(element: TypeExpr) -> Self {
        Self::concrete(ConcreteOrigin::Set, vec![element])
    }

    pub fn dict(key: TypeExpr, value: TypeExpr) -> Self {
        Self::concrete(ConcreteOrigin::Dict, vec![key, value])
    }

    pub fn sequence(element: TypeExpr) -> Self {
        Self::abstract_(AbstractOrigin::Sequence, vec![element])
    }

    pub fn iterable(element: TypeExpr) -> Self {
        Self::abstract_(AbstractOrigin::Iterable, vec![element])
    }

    pub fn mapping(key: TypeExpr, value: TypeExpr) -> Self {
        Self::abstract_(AbstractOrigin::Mapping, vec![key, value])
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    ///
    /// A single surviving member is returned as-is.
    pub fn union(members: impl IntoIterator<Item = TypeExpr>) -> Self {
        let mut flat: Vec<TypeExpr> = Vec::new();
        for member in members {
            if member.is_union() {
                for inner in member.args {
                    if !flat.contains(&inner) {
                        flat.push(inner);
                    }
                }
            } else if !flat.contains(&member) {
                flat.push(member);
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Self::new(Origin::Union, flat)
    }

    /// `Union[inner, None]`.
    pub fn optional(inner: TypeExpr) -> Self {
        Self::union([inner, Self::none()])
    }

    /// Wrap `base` with metadata payloads.
    ///
    /// A wrapped base is merged into one wrapper, inner payloads first.
    pub fn annotated(form: AnnotatedForm, base: TypeExpr, metadata: Vec<Metadata>) -> Self {
        let (base, mut payloads) = if base.origin.is_metadata_wrapper() {
            let TypeExpr {
                mut args,
                metadata: inner,
                ..
            } = base;
            if args.is_empty() {
                (Self::any(), inner)
            } else {
                (args.remove(0), inner)
            }
        } else {
            (base, Vec::new())
        };
        payloads.extend(metadata);
        Self {
            origin: Origin::Annotated(form),
            args: vec![base],
            metadata: payloads,
        }
    }

    #[inline]
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.origin == Origin::Any
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.origin == Origin::NoneType
    }

    #[inline]
    pub fn is_union(&self) -> bool {
        self.origin == Origin::Union
    }

    /// A union of exactly two members, one of them the nothing marker.
    pub fn is_optional(&self) -> bool {
        self.is_union() && self.args.len() == 2 && self.args.iter().any(TypeExpr::is_none)
    }

    /// The non-nothing member of an optional expression.
    pub fn optional_inner(&self) -> Option<&TypeExpr> {
        if !self.is_optional() {
            return None;
        }
        self.args.iter().find(|arg| !arg.is_none())
    }
}

impl From<Origin> for TypeExpr {
    fn from(origin: Origin) -> Self {
        Self::of(origin)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::write_expr(f, self, &crate::format::placeholder_class_name)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
