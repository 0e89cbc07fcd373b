//! Directional subtype resolver.
//!
//! `is_subtype(sub, sup)` answers "may a value of `sub` stand where `sup` is
//! expected?". Rules are applied in order:
//!
//! 1. Metadata wrappers are looked through on both sides.
//! 2. `Any` as the target accepts everything.
//! 3. A union source needs every member to pass; a union target needs some
//!    member to accept (see `subtype_rules::unions`). Members are read
//!    flattened, so nested optionals from any producer behave as one.
//! 4. `Any` as a source is then accepted by nothing else.
//! 5. Everything else is origin compatibility followed by covariant argument
//!    checks (see `subtype_rules::generics`).
//!
//! Source unions are eliminated before target unions, so `Optional[T]`
//! relates to itself and `None` relates to every optional.

use crate::compat::CompatChecker;
use crate::error::DepthExceeded;
use crate::hierarchy::ClassHierarchy;
use crate::metadata::strip_metadata;
use crate::recursion::DepthCounter;
use crate::relation_queries::RelationPolicy;
use crate::types::TypeExpr;
use tracing::{debug, trace};

/// Subtype checker with per-query depth state.
pub struct SubtypeChecker<'a> {
    compat: CompatChecker<'a>,
    depth: DepthCounter,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(hierarchy: &'a ClassHierarchy) -> Self {
        Self::with_policy(hierarchy, RelationPolicy::default())
    }

    pub fn with_policy(hierarchy: &'a ClassHierarchy, policy: RelationPolicy) -> Self {
        Self {
            compat: CompatChecker::with_policy(hierarchy, policy),
            depth: DepthCounter::new(policy.max_depth),
        }
    }

    /// Is `sub` a subtype of `sup`?
    pub fn is_subtype(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        let result = self.check_subtype(sub, sup);
        trace!(target: "typemap::subtype", %sub, %sup, ?result, "is_subtype");
        result
    }

    /// True once any check on this checker hit the depth ceiling.
    pub fn depth_exceeded(&self) -> bool {
        self.depth.is_exceeded()
    }

    pub(crate) fn check_subtype(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        if !self.depth.enter() {
            debug!(target: "typemap::subtype", limit = self.depth.max_depth(), "subtype depth exceeded");
            return Err(DepthExceeded {
                limit: self.depth.max_depth(),
            });
        }
        let result = self.check_subtype_inner(sub, sup);
        self.depth.leave();
        result
    }

    fn check_subtype_inner(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        let (sub, sup) = (strip_metadata(sub), strip_metadata(sup));

        if sup.is_any() {
            return Ok(true);
        }

        if sub.is_union() {
            return self.check_union_source(sub, sup);
        }
        if sup.is_union() {
            return self.check_union_target(sub, sup);
        }

        if sub.is_any() {
            return Ok(false);
        }

        if !self.compat.origin_compatible(sub.origin, sup.origin) {
            trace!(target: "typemap::subtype", sub = %sub, sup = %sup, "origin mismatch");
            return Ok(false);
        }
        self.check_covariant_args(sub, sup)
    }
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
