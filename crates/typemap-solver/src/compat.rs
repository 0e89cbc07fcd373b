//! Compatibility resolver.
//!
//! Two questions are answered here:
//!
//! - **Directional origin compatibility** ([`CompatChecker::origin_compatible`]):
//!   may an origin stand where another is expected? Concrete containers widen
//!   to their interfaces, specializations to their general container, and
//!   classes to their nominal bases. Never the reverse.
//! - **Undirected full compatibility** ([`CompatChecker::fully_compatible`]):
//!   are two expressions interchangeable shapes with interchangeable
//!   arguments? Used for equality-like checks, not for subtyping.
//!
//! Origins outside the static tables only relate through the nominal
//! fallback, and only while [`RelationPolicy::nominal_fallback`] is set.

use crate::abstraction::{abstracts_to, specialization_base};
use crate::error::DepthExceeded;
use crate::hierarchy::ClassHierarchy;
use crate::metadata::strip_metadata;
use crate::recursion::DepthCounter;
use crate::registry::{origins_equivalent, origins_share_class, resolve_spelling, union_members};
use crate::relation_queries::RelationPolicy;
use crate::types::{Origin, ScalarKind, TypeExpr};
use tracing::{debug, trace};

/// Origin-level and argument-level compatibility checks.
pub struct CompatChecker<'a> {
    hierarchy: &'a ClassHierarchy,
    policy: RelationPolicy,
    depth: DepthCounter,
}

impl<'a> CompatChecker<'a> {
    pub fn new(hierarchy: &'a ClassHierarchy) -> Self {
        Self::with_policy(hierarchy, RelationPolicy::default())
    }

    pub fn with_policy(hierarchy: &'a ClassHierarchy, policy: RelationPolicy) -> Self {
        Self {
            hierarchy,
            policy,
            depth: DepthCounter::new(policy.max_depth),
        }
    }

    pub fn hierarchy(&self) -> &'a ClassHierarchy {
        self.hierarchy
    }

    pub fn policy(&self) -> RelationPolicy {
        self.policy
    }

    /// May `sub` stand where `sup` is expected, looking at origins only?
    ///
    /// 1. Equal after spelling resolution.
    /// 2. A specialization relates exactly to its general container and that
    ///    container's equivalence class (plus `object`); nothing later is
    ///    consulted.
    /// 3. Co-members of an equivalence class relate only along an
    ///    abstraction edge from `sub` to `sup`.
    /// 4. Otherwise class-like origins fall back to nominal subclassing,
    ///    when the policy allows it.
    pub fn origin_compatible(&self, sub: Origin, sup: Origin) -> bool {
        let (sub, sup) = (resolve_spelling(sub), resolve_spelling(sup));
        if sub == sup {
            return true;
        }

        if let Some(base) = specialization_base(sub) {
            return base == sup
                || origins_share_class(base, sup)
                || (self.policy.nominal_fallback && sup == Origin::Scalar(ScalarKind::Object));
        }

        if origins_share_class(sub, sup) {
            return abstracts_to(sub, sup);
        }

        if self.policy.nominal_fallback && sub.is_class_like() && sup.is_class_like() {
            return self.nominal_subclass(sub, sup);
        }

        false
    }

    /// Nominal subclass check over the class hierarchy.
    ///
    /// Every class-like origin derives from `object`. Bases that are
    /// containers relate to `sup` through [`origin_compatible`], so a class
    /// deriving from a concrete list is a sequence.
    ///
    /// [`origin_compatible`]: Self::origin_compatible
    pub fn nominal_subclass(&self, sub: Origin, sup: Origin) -> bool {
        let (sub, sup) = (resolve_spelling(sub), resolve_spelling(sup));
        if !sub.is_class_like() || !sup.is_class_like() {
            return false;
        }
        if sub == sup || sup == Origin::Scalar(ScalarKind::Object) {
            return true;
        }
        self.hierarchy
            .bases(sub)
            .iter()
            .any(|&base| self.origin_compatible(base, sup))
    }

    /// Does a value whose runtime origin is `value_origin` have the shape of
    /// `declared`?
    ///
    /// Undirected registry equivalence first, then the directional check
    /// (which carries the nominal fallback).
    pub fn runtime_shape_compatible(&self, value_origin: Origin, declared: Origin) -> bool {
        origins_share_class(value_origin, declared) || self.origin_compatible(value_origin, declared)
    }

    /// Undirected compatibility of two full expressions.
    ///
    /// Origins must be equivalent and the arguments pairwise fully
    /// compatible. Union members are matched as sets.
    pub fn fully_compatible(&mut self, t1: &TypeExpr, t2: &TypeExpr) -> Result<bool, DepthExceeded> {
        if !self.depth.enter() {
            return Err(self.depth_exceeded());
        }
        let result = self.fully_compatible_inner(t1, t2);
        self.depth.leave();
        result
    }

    fn fully_compatible_inner(&mut self, t1: &TypeExpr, t2: &TypeExpr) -> Result<bool, DepthExceeded> {
        let (t1, t2) = (strip_metadata(t1), strip_metadata(t2));
        if !origins_equivalent(t1, t2) {
            trace!(target: "typemap::compat", left = %t1, right = %t2, "origins not equivalent");
            return Ok(false);
        }
        if t1.is_union() && t2.is_union() {
            return self.union_members_compatible(t1, t2);
        }
        self.args_compatible(t1, t2)
    }

    /// Pairwise argument compatibility.
    ///
    /// Both empty is compatible; exactly one empty, or differing counts, is
    /// not.
    pub fn args_compatible(&mut self, t1: &TypeExpr, t2: &TypeExpr) -> Result<bool, DepthExceeded> {
        match (t1.has_args(), t2.has_args()) {
            (false, false) => return Ok(true),
            (true, false) | (false, true) => return Ok(false),
            (true, true) => {}
        }
        if t1.args.len() != t2.args.len() {
            return Ok(false);
        }
        for (a, b) in t1.args.iter().zip(&t2.args) {
            if !self.fully_compatible(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every member of each union has a fully compatible counterpart in the
    /// other.
    fn union_members_compatible(&mut self, t1: &TypeExpr, t2: &TypeExpr) -> Result<bool, DepthExceeded> {
        let left = union_members(t1);
        let right = union_members(t2);
        for l in &left {
            if !self.any_fully_compatible(l, &right)? {
                return Ok(false);
            }
        }
        for r in &right {
            if !self.any_fully_compatible(r, &left)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn any_fully_compatible(&mut self, expr: &TypeExpr, candidates: &[&TypeExpr]) -> Result<bool, DepthExceeded> {
        for candidate in candidates {
            if self.fully_compatible(expr, candidate)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn depth_exceeded(&self) -> DepthExceeded {
        debug!(target: "typemap::compat", limit = self.depth.max_depth(), "compatibility depth exceeded");
        DepthExceeded {
            limit: self.depth.max_depth(),
        }
    }
}

/// Undirected full compatibility with the default policy.
pub fn fully_compatible(t1: &TypeExpr, t2: &TypeExpr) -> Result<bool, DepthExceeded> {
    CompatChecker::new(ClassHierarchy::empty()).fully_compatible(t1, t2)
}

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod tests;
