//! Strict type identity and a conservative origin-level subclass check.

use crate::compat::CompatChecker;
use crate::hierarchy::ClassHierarchy;
use crate::metadata::strip_metadata;
use crate::registry::{resolve_spelling, union_members};
use crate::types::{AnnotatedForm, Origin, TypeExpr};
use typemap_common::limits::MAX_RELATION_DEPTH;

/// Exact equality with no variance and no abstraction.
///
/// Alias spellings equal their concrete container and both wrapper spellings
/// are one origin. Union members compare as sets; everything else compares
/// arguments positionally. Metadata payloads must match. Nesting past the
/// relation depth ceiling compares unequal.
pub fn is_equal_type(t1: &TypeExpr, t2: &TypeExpr) -> bool {
    equal_at_depth(t1, t2, 0)
}

fn identity_origin(origin: Origin) -> Origin {
    match resolve_spelling(origin) {
        Origin::Annotated(_) => Origin::Annotated(AnnotatedForm::Standard),
        other => other,
    }
}

fn equal_at_depth(t1: &TypeExpr, t2: &TypeExpr, depth: u32) -> bool {
    if depth >= MAX_RELATION_DEPTH {
        return false;
    }
    if identity_origin(t1.origin) != identity_origin(t2.origin) || t1.metadata != t2.metadata {
        return false;
    }
    if t1.is_union() {
        let (left, right) = (union_members(t1), union_members(t2));
        return members_contained(&left, &right, depth) && members_contained(&right, &left, depth);
    }
    t1.args.len() == t2.args.len()
        && t1
            .args
            .iter()
            .zip(&t2.args)
            .all(|(a, b)| equal_at_depth(a, b, depth + 1))
}

fn members_contained(from: &[&TypeExpr], into: &[&TypeExpr], depth: u32) -> bool {
    from.iter()
        .all(|a| into.iter().any(|b| equal_at_depth(a, b, depth + 1)))
}

/// Origin-level directional subclass check that never fails.
///
/// Type arguments are ignored. A union `cls` passes only if every member
/// does; a union `classinfo` accepts any member. Origins that are not
/// classes (`Any`, the nothing marker) are never subclasses of anything.
pub fn safe_issubclass(hierarchy: &ClassHierarchy, cls: &TypeExpr, classinfo: &TypeExpr) -> bool {
    let checker = CompatChecker::new(hierarchy);
    let (cls, classinfo) = (strip_metadata(cls), strip_metadata(classinfo));
    if cls.is_union() {
        let members = union_members(cls);
        return !members.is_empty()
            && members
                .iter()
                .all(|member| origin_subclass(&checker, member, classinfo));
    }
    origin_subclass(&checker, cls, classinfo)
}

fn origin_subclass(checker: &CompatChecker<'_>, cls: &TypeExpr, classinfo: &TypeExpr) -> bool {
    if !cls.origin.is_class_like() {
        return false;
    }
    union_members(classinfo).iter().any(|target| {
        target.origin.is_class_like() && checker.origin_compatible(cls.origin, target.origin)
    })
}

#[cfg(test)]
#[path = "../tests/equality_tests.rs"]
mod tests;
