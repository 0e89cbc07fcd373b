//! Unified relation query entrypoints.
//!
//! Callers that want one answer without wiring a checker by hand go through
//! [`query_relation`] and [`query_conformance`]. Both report a depth overrun
//! as a flag on the result instead of an error, so a caller can treat it as
//! "unknown" without matching on `Result`.

use crate::compat::CompatChecker;
use crate::equality::is_equal_type;
use crate::error::DepthExceeded;
use crate::hierarchy::ClassHierarchy;
use crate::recursion::RecursionProfile;
use crate::subtype::SubtypeChecker;
use crate::types::TypeExpr;
use crate::validate::RuntimeValidator;
use crate::value::RuntimeValue;
use serde::{Deserialize, Serialize};
use typemap_common::limits::DEFAULT_SAMPLE_LIMIT;

/// Relation categories supported by the unified query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Directional subtyping with covariant arguments.
    Subtype,
    /// Undirected full compatibility.
    Compatible,
    /// Strict identity after spelling resolution.
    Identical,
    /// A runtime value conforming to a declared type.
    Conforms,
}

/// Policy knobs for relation and validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationPolicy {
    /// Recursion ceiling before a query reports [`DepthExceeded`].
    pub max_depth: u32,
    /// Elements (or entries) inspected per container during validation.
    pub sample_limit: usize,
    /// Relate class-like origins outside the registry through the nominal
    /// hierarchy.
    pub nominal_fallback: bool,
}

impl Default for RelationPolicy {
    fn default() -> Self {
        Self {
            max_depth: RecursionProfile::RelationCheck.max_depth(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            nominal_fallback: true,
        }
    }
}

impl RelationPolicy {
    /// Defaults tuned for runtime validation.
    pub fn validation() -> Self {
        Self {
            max_depth: RecursionProfile::RuntimeValidation.max_depth(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    pub fn with_nominal_fallback(mut self, enabled: bool) -> Self {
        self.nominal_fallback = enabled;
        self
    }
}

/// Result of a relation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelationResult {
    pub kind: RelationKind,
    pub related: bool,
    /// The check hit the depth ceiling; `related` is `false` but the relation
    /// is undecided.
    pub depth_exceeded: bool,
}

impl RelationResult {
    fn from_outcome(kind: RelationKind, outcome: Result<bool, DepthExceeded>) -> Self {
        match outcome {
            Ok(related) => Self {
                kind,
                related,
                depth_exceeded: false,
            },
            Err(_) => Self {
                kind,
                related: false,
                depth_exceeded: true,
            },
        }
    }

    #[inline]
    pub fn is_related(self) -> bool {
        self.related
    }
}

/// Query a relation between two type expressions.
///
/// [`RelationKind::Conforms`] relates values, not expressions; asking for it
/// here yields an unrelated result. Use [`query_conformance`] instead.
pub fn query_relation(
    hierarchy: &ClassHierarchy,
    sub: &TypeExpr,
    sup: &TypeExpr,
    kind: RelationKind,
    policy: RelationPolicy,
) -> RelationResult {
    let outcome = match kind {
        RelationKind::Subtype => SubtypeChecker::with_policy(hierarchy, policy).is_subtype(sub, sup),
        RelationKind::Compatible => {
            CompatChecker::with_policy(hierarchy, policy).fully_compatible(sub, sup)
        }
        RelationKind::Identical => Ok(is_equal_type(sub, sup)),
        RelationKind::Conforms => Ok(false),
    };
    RelationResult::from_outcome(kind, outcome)
}

/// Query whether a runtime value conforms to a declared type.
pub fn query_conformance<V: RuntimeValue>(
    hierarchy: &ClassHierarchy,
    value: &V,
    expr: &TypeExpr,
    policy: RelationPolicy,
) -> RelationResult {
    let outcome = RuntimeValidator::with_policy(hierarchy, policy).conforms(value, expr);
    RelationResult::from_outcome(RelationKind::Conforms, outcome)
}

#[cfg(test)]
#[path = "../tests/relation_queries_tests.rs"]
mod tests;
