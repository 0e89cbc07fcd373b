//! Runtime validation of values against declared type expressions.
//!
//! Validation is shallow-then-sampled: the value's runtime origin must match
//! the declared origin, and then only the first `sample_limit` elements (or
//! entries) of a container are checked against the declared arguments.
//! Elements past the bound are never inspected, so a long sequence that goes
//! wrong late still conforms. Callers needing exhaustive checks raise the
//! limit through [`RelationPolicy::sample_limit`].

use crate::compat::CompatChecker;
use crate::error::DepthExceeded;
use crate::hierarchy::ClassHierarchy;
use crate::metadata::strip_metadata;
use crate::recursion::DepthCounter;
use crate::registry::{ContainerKind, container_kind, union_members};
use crate::relation_queries::RelationPolicy;
use crate::types::TypeExpr;
use crate::value::RuntimeValue;
use tracing::{debug, trace};

/// Checks runtime values against type expressions.
pub struct RuntimeValidator<'a> {
    compat: CompatChecker<'a>,
    sample_limit: usize,
    depth: DepthCounter,
}

impl<'a> RuntimeValidator<'a> {
    pub fn new(hierarchy: &'a ClassHierarchy) -> Self {
        Self::with_policy(hierarchy, RelationPolicy::validation())
    }

    pub fn with_policy(hierarchy: &'a ClassHierarchy, policy: RelationPolicy) -> Self {
        Self {
            compat: CompatChecker::with_policy(hierarchy, policy),
            sample_limit: policy.sample_limit,
            depth: DepthCounter::new(policy.max_depth),
        }
    }

    pub fn sample_limit(&self) -> usize {
        self.sample_limit
    }

    /// Does `value` conform to `expr`?
    pub fn conforms<V: RuntimeValue>(&mut self, value: &V, expr: &TypeExpr) -> Result<bool, DepthExceeded> {
        let result = self.check_value(value, expr);
        trace!(target: "typemap::validate", expected = %expr, ?result, "conforms");
        result
    }

    fn check_value<V: RuntimeValue>(&mut self, value: &V, expr: &TypeExpr) -> Result<bool, DepthExceeded> {
        if !self.depth.enter() {
            debug!(target: "typemap::validate", limit = self.depth.max_depth(), "validation depth exceeded");
            return Err(DepthExceeded {
                limit: self.depth.max_depth(),
            });
        }
        let result = self.check_value_inner(value, expr);
        self.depth.leave();
        result
    }

    fn check_value_inner<V: RuntimeValue>(&mut self, value: &V, expr: &TypeExpr) -> Result<bool, DepthExceeded> {
        let expr = strip_metadata(expr);
        if expr.is_any() {
            return Ok(true);
        }

        if let Some(inner) = expr.optional_inner() {
            if value.is_none() {
                return Ok(true);
            }
            return self.check_value(value, inner);
        }

        if expr.is_union() {
            for member in union_members(expr) {
                if self.check_value(value, member)? {
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        let value_origin = value.runtime_origin();
        if !self.compat.runtime_shape_compatible(value_origin, expr.origin) {
            trace!(
                target: "typemap::validate",
                actual = value_origin.name(),
                expected = %expr,
                "shape mismatch"
            );
            return Ok(false);
        }

        let Some(first) = expr.args.first() else {
            return Ok(true);
        };

        match container_kind(expr.origin) {
            ContainerKind::Sequence | ContainerKind::Set => self.check_elements(value, first),
            ContainerKind::Tuple if expr.args.len() == 1 => self.check_elements(value, first),
            ContainerKind::Tuple => self.check_positional(value, &expr.args),
            ContainerKind::Mapping => self.check_entries(value, expr),
            ContainerKind::Unknown => {
                trace!(target: "typemap::validate", expected = %expr, "arguments not inspected");
                Ok(true)
            }
        }
    }

    /// Sampled elements against one element type.
    fn check_elements<V: RuntimeValue>(&mut self, value: &V, element_ty: &TypeExpr) -> Result<bool, DepthExceeded> {
        if strip_metadata(element_ty).is_any() {
            return Ok(true);
        }
        for (idx, element) in value.elements().take(self.sample_limit).enumerate() {
            if !self.check_value(&*element, element_ty)? {
                trace!(target: "typemap::validate", index = idx, expected = %element_ty, "element mismatch");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fixed-length tuple: element count must match, sampled elements are
    /// checked against their own position.
    fn check_positional<V: RuntimeValue>(&mut self, value: &V, args: &[TypeExpr]) -> Result<bool, DepthExceeded> {
        if value.elements().count() != args.len() {
            return Ok(false);
        }
        for (element, element_ty) in value.elements().zip(args).take(self.sample_limit) {
            if !self.check_value(&*element, element_ty)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Sampled entries against key and value types.
    fn check_entries<V: RuntimeValue>(&mut self, value: &V, expr: &TypeExpr) -> Result<bool, DepthExceeded> {
        let [key_ty, value_ty, ..] = expr.args.as_slice() else {
            return Ok(true);
        };
        let skip_key = strip_metadata(key_ty).is_any();
        let skip_value = strip_metadata(value_ty).is_any();
        if skip_key && skip_value {
            return Ok(true);
        }
        for (key, val) in value.entries().take(self.sample_limit) {
            if !skip_key && !self.check_value(&*key, key_ty)? {
                return Ok(false);
            }
            if !skip_value && !self.check_value(&*val, value_ty)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../tests/validate_tests.rs"]
mod tests;
