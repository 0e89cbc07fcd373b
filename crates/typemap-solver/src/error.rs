//! Error types for the solver.
use crate::types::{ClassId, Origin};
use thiserror::Error;

/// A query could not be decided within its recursion-depth ceiling.
///
/// Distinct from a negative answer: the relation may or may not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type expression nesting exceeded the depth limit of {limit}")]
pub struct DepthExceeded {
    pub limit: u32,
}

/// Errors raised while declaring classes in a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("class '{class}' names undeclared base class #{}", .base.0)]
    UnknownBase { class: String, base: ClassId },
    #[error("class '{class}' cannot inherit from {}", .base.name())]
    InvalidBase { class: String, base: Origin },
}
