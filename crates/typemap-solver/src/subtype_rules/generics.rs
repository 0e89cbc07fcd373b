//! Type-argument rules for parameterized origins.
//!
//! Arguments are treated covariantly: `List[bool] <: Sequence[int]` because
//! `bool <: int`. There is no contravariance, so mutable containers are
//! accepted as if they were read-only.

use crate::error::DepthExceeded;
use crate::metadata::strip_metadata;
use crate::subtype::SubtypeChecker;
use crate::types::TypeExpr;

impl<'a> SubtypeChecker<'a> {
    /// Compare arguments pairwise once the origins are known compatible.
    pub(crate) fn check_covariant_args(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        match (sub.has_args(), sup.has_args()) {
            (false, false) => return Ok(true),
            (true, false) | (false, true) => return Ok(false),
            (true, true) => {}
        }
        if sub.args.len() != sup.args.len() {
            return Ok(false);
        }

        for (a, b) in sub.args.iter().zip(&sup.args) {
            if strip_metadata(b).is_any() {
                continue;
            }
            // A union target may still admit `Any` through an `Any` member.
            if strip_metadata(a).is_any() && !strip_metadata(b).is_union() {
                return Ok(false);
            }
            if !self.check_subtype(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
