//! typemap: type-expression compatibility and runtime validation.
//!
//! Facade over the workspace crates:
//!
//! - [`typemap_solver`]: equivalence registry, subtype resolver, runtime
//!   validator and the relation query API (re-exported at the crate root)
//! - [`typemap_common`]: shared depth and sampling limits ([`limits`])
//!
//! ```ignore
//! use typemap::{ClassHierarchy, TypeExpr, Value, conforms, is_subtype};
//!
//! let declared = TypeExpr::mapping(TypeExpr::str(), TypeExpr::optional(TypeExpr::int()));
//! let value = Value::dict([(Value::str("a"), Value::Int(1)), (Value::str("b"), Value::None)]);
//! assert!(conforms(ClassHierarchy::empty(), &value, &declared)?);
//! ```

pub mod tracing_config;

pub use tracing_config::{LogFormat, init_tracing};
pub use typemap_common::limits;
pub use typemap_solver::*;

/// Deserialize a type expression descriptor from JSON.
pub fn descriptor_from_json(json: &str) -> Result<TypeExpr, serde_json::Error> {
    serde_json::from_str(json)
}

/// Deserialize a relation policy from JSON; missing fields take their
/// defaults.
pub fn policy_from_json(json: &str) -> Result<RelationPolicy, serde_json::Error> {
    serde_json::from_str(json)
}
