//! Centralized limits and thresholds for the typemap engine.
//!
//! This module provides shared constants for recursion depths and sampling
//! bounds used by the relation and validation queries. Centralizing these
//! values keeps the solver's recursion profiles and the default
//! `RelationPolicy` in agreement.
//!
//! # Categories
//!
//! - **Recursion Depths**: ceilings that turn pathological nesting into a
//!   deterministic `DepthExceeded` result instead of a stack overflow
//! - **Sampling Bounds**: how many container elements runtime validation
//!   inspects

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for relation queries (subtype, compatibility,
/// identity).
///
/// Every nested type argument adds one level. A relation query that needs to
/// descend further than this reports `DepthExceeded`.
///
/// # Example
///
/// ```text
/// List[List[List[ ... 100 levels ... List[int] ... ]]]
/// ```
pub const MAX_RELATION_DEPTH: u32 = 100;

/// Maximum nesting depth for runtime validation.
///
/// Each nested container in the *declared* type adds one level, and so does
/// each union arm being tried. Exceeding it reports `DepthExceeded`.
pub const MAX_VALIDATION_DEPTH: u32 = 100;

// =============================================================================
// Sampling Bounds
// =============================================================================

/// Number of container elements (or mapping entries) inspected by runtime
/// validation, taken in iteration order.
///
/// Validation is not exhaustive past this bound:
///
/// ```text
/// conforms([1, 2, ..., 10, "x", "y", ...], List[int]) == true
/// ```
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// Maximum union members shown when formatting an expression for logs.
///
/// Larger unions are elided with `...`.
pub const UNION_MEMBER_DISPLAY_LIMIT: usize = 8;

#[cfg(test)]
#[path = "../tests/limits_tests.rs"]
mod tests;
