//! Runtime values inspected by the validator.
//!
//! The validator only needs three things from a value: its runtime origin,
//! its elements and its key/value entries. [`RuntimeValue`] captures exactly
//! that, so hosts can validate their own value representation. Two
//! implementations ship with the crate: [`Value`] and `serde_json::Value`.

use crate::types::{ClassId, ConcreteOrigin, Origin, ScalarKind};
use std::borrow::Cow;

/// Boxed iterator over a value's elements.
pub type Elements<'a, V> = Box<dyn Iterator<Item = Cow<'a, V>> + 'a>;

/// Boxed iterator over a value's key/value entries.
pub type Entries<'a, V> = Box<dyn Iterator<Item = (Cow<'a, V>, Cow<'a, V>)> + 'a>;

/// A value whose shape can be checked against a type expression.
pub trait RuntimeValue: Clone {
    /// The concrete class of the value.
    fn runtime_origin(&self) -> Origin;

    /// The nothing value.
    fn is_none(&self) -> bool {
        self.runtime_origin() == Origin::NoneType
    }

    /// Elements in iteration order. Mappings yield their keys; values that
    /// are not iterable yield nothing.
    fn elements(&self) -> Elements<'_, Self>;

    /// Key/value entries in iteration order; empty for non-mappings.
    fn entries(&self) -> Entries<'_, Self>;
}

/// Flavor of a mapping value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MapKind {
    #[default]
    Plain,
    Ordered,
    DefaultFactory,
    Counter,
    Chain,
}

impl MapKind {
    fn origin(self) -> ConcreteOrigin {
        match self {
            MapKind::Plain => ConcreteOrigin::Dict,
            MapKind::Ordered => ConcreteOrigin::OrderedDict,
            MapKind::DefaultFactory => ConcreteOrigin::DefaultDict,
            MapKind::Counter => ConcreteOrigin::Counter,
            MapKind::Chain => ConcreteOrigin::ChainMap,
        }
    }
}

/// Built-in runtime value model.
///
/// Collections keep their iteration order; sets are not deduplicated.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    FrozenSet(Vec<Value>),
    Deque(Vec<Value>),
    Map(MapKind, Vec<(Value, Value)>),
    Function,
    Generator,
    /// Instance of a user class.
    Instance(ClassId),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn dict(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(MapKind::Plain, entries.into_iter().collect())
    }

    pub fn mapping(kind: MapKind, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(kind, entries.into_iter().collect())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl RuntimeValue for Value {
    fn runtime_origin(&self) -> Origin {
        match self {
            Value::None => Origin::NoneType,
            Value::Bool(_) => Origin::Scalar(ScalarKind::Bool),
            Value::Int(_) => Origin::Scalar(ScalarKind::Int),
            Value::Float(_) => Origin::Scalar(ScalarKind::Float),
            Value::Str(_) => Origin::Scalar(ScalarKind::Str),
            Value::Bytes(_) => Origin::Scalar(ScalarKind::Bytes),
            Value::List(_) => Origin::Concrete(ConcreteOrigin::List),
            Value::Tuple(_) => Origin::Concrete(ConcreteOrigin::Tuple),
            Value::Set(_) => Origin::Concrete(ConcreteOrigin::Set),
            Value::FrozenSet(_) => Origin::Concrete(ConcreteOrigin::FrozenSet),
            Value::Deque(_) => Origin::Concrete(ConcreteOrigin::Deque),
            Value::Map(kind, _) => Origin::Concrete(kind.origin()),
            Value::Function => Origin::Concrete(ConcreteOrigin::Function),
            Value::Generator => Origin::Concrete(ConcreteOrigin::Generator),
            Value::Instance(id) => Origin::Class(*id),
        }
    }

    fn elements(&self) -> Elements<'_, Self> {
        match self {
            Value::List(items)
            | Value::Tuple(items)
            | Value::Set(items)
            | Value::FrozenSet(items)
            | Value::Deque(items) => Box::new(items.iter().map(Cow::Borrowed)),
            Value::Map(_, entries) => Box::new(entries.iter().map(|(k, _)| Cow::Borrowed(k))),
            Value::Str(s) => Box::new(s.chars().map(|c| Cow::Owned(Value::Str(c.to_string())))),
            Value::Bytes(bytes) => Box::new(bytes.iter().map(|&b| Cow::Owned(Value::Int(i64::from(b))))),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn entries(&self) -> Entries<'_, Self> {
        match self {
            Value::Map(_, entries) => {
                Box::new(entries.iter().map(|(k, v)| (Cow::Borrowed(k), Cow::Borrowed(v))))
            }
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl RuntimeValue for serde_json::Value {
    fn runtime_origin(&self) -> Origin {
        use serde_json::Value as Json;
        match self {
            Json::Null => Origin::NoneType,
            Json::Bool(_) => Origin::Scalar(ScalarKind::Bool),
            Json::Number(n) if n.is_i64() || n.is_u64() => Origin::Scalar(ScalarKind::Int),
            Json::Number(_) => Origin::Scalar(ScalarKind::Float),
            Json::String(_) => Origin::Scalar(ScalarKind::Str),
            Json::Array(_) => Origin::Concrete(ConcreteOrigin::List),
            Json::Object(_) => Origin::Concrete(ConcreteOrigin::Dict),
        }
    }

    fn elements(&self) -> Elements<'_, Self> {
        use serde_json::Value as Json;
        match self {
            Json::Array(items) => Box::new(items.iter().map(Cow::Borrowed)),
            Json::Object(map) => Box::new(map.keys().map(|k| Cow::Owned(Json::String(k.clone())))),
            Json::String(s) => Box::new(s.chars().map(|c| Cow::Owned(Json::String(c.to_string())))),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn entries(&self) -> Entries<'_, Self> {
        use serde_json::Value as Json;
        match self {
            Json::Object(map) => Box::new(
                map.iter()
                    .map(|(k, v)| (Cow::Owned(Json::String(k.clone())), Cow::Borrowed(v))),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/value_tests.rs"]
mod tests;
