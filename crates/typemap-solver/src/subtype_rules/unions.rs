//! Union subtype checking.
//!
//! - Union source (`A | B <: T`): every member must be a subtype of `T`.
//! - Union target (`S <: A | B`): `S` must be a subtype of some member.
//!
//! Members are flattened first, so nested unions and wrapped members behave
//! like their flat, unwrapped form.

use crate::error::DepthExceeded;
use crate::registry::union_members;
use crate::subtype::SubtypeChecker;
use crate::types::TypeExpr;

impl<'a> SubtypeChecker<'a> {
    pub(crate) fn check_union_source(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        for member in union_members(sub) {
            if !self.check_subtype(member, sup)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn check_union_target(&mut self, sub: &TypeExpr, sup: &TypeExpr) -> Result<bool, DepthExceeded> {
        for member in union_members(sup) {
            if self.check_subtype(sub, member)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
