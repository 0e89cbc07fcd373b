//! Type-expression compatibility solver
//!
//! Decides relations between normalized type expressions and checks runtime
//! values against them. It uses:
//!
//! - **Equivalence registry**: closed static tables saying which origin
//!   spellings denote the same container shape
//! - **Abstraction edges**: directed concrete-to-interface widening
//! - **Nominal hierarchy**: explicit class declarations for origins outside
//!   the tables
//!
//! Key properties:
//! - Subtyping is directional; undirected compatibility is a separate query
//! - Type arguments are covariant
//! - Metadata wrappers are transparent to every relation query
//! - Runtime validation samples a bounded prefix of each container
//! - Every recursive query is depth-limited and reports [`DepthExceeded`]
//!   instead of guessing

mod abstraction;
pub mod compat;
mod equality;
mod error;
mod format;
mod hierarchy;
mod metadata;
pub mod recursion;
mod registry;
pub mod relation_queries;
mod subtype;
mod subtype_rules;
pub mod types;
mod validate;
pub mod value;

pub use abstraction::{abstractions_of, abstracts_to, specialization_base};
pub use compat::{CompatChecker, fully_compatible};
pub use equality::{is_equal_type, safe_issubclass};
pub use error::{DepthExceeded, HierarchyError};
pub use format::{TypeFormatter, TypeInfo, debug_type_info};
pub use hierarchy::{ClassHierarchy, ClassHierarchyBuilder, ClassInfo};
pub use metadata::{is_metadata_wrapper, metadata_form, metadata_of, strip_metadata};
pub use recursion::{DepthCounter, RecursionProfile};
pub use registry::{
    ContainerKind, EquivalenceClass, canonical_origin, compatibility_chain, container_kind,
    equivalence_classes, origins_equivalent, origins_share_class, resolve_spelling, union_members,
};
pub use relation_queries::*;
pub use subtype::SubtypeChecker;
pub use types::{
    AbstractOrigin, AnnotatedForm, ClassId, ConcreteOrigin, Metadata, Origin, ScalarKind, TypeExpr,
};
pub use validate::RuntimeValidator;
pub use value::{MapKind, RuntimeValue, Value};

/// Is `sub` a subtype of `sup` under the default policy?
pub fn is_subtype(
    hierarchy: &ClassHierarchy,
    sub: &TypeExpr,
    sup: &TypeExpr,
) -> Result<bool, DepthExceeded> {
    SubtypeChecker::new(hierarchy).is_subtype(sub, sup)
}

/// Does `value` conform to `expr` under the default validation policy?
pub fn conforms<V: RuntimeValue>(
    hierarchy: &ClassHierarchy,
    value: &V,
    expr: &TypeExpr,
) -> Result<bool, DepthExceeded> {
    RuntimeValidator::new(hierarchy).conforms(value, expr)
}
