//! Metadata wrapper helpers.
//!
//! A metadata wrapper pairs a base type (`args[0]`) with opaque payloads.
//! The host exposes the wrapper under more than one spelling
//! ([`AnnotatedForm`]); every helper here treats all spellings alike.
//!
//! Relation and validation queries look through wrappers, so these helpers
//! are also the first step of every query.

use crate::types::{AnnotatedForm, Metadata, Origin, TypeExpr};

/// Stand-in base for a wrapper that carries no base type.
static MISSING_BASE: TypeExpr = TypeExpr {
    origin: Origin::Any,
    args: Vec::new(),
    metadata: Vec::new(),
};

/// True if `expr` is a metadata wrapper, in any spelling.
#[inline]
pub fn is_metadata_wrapper(expr: &TypeExpr) -> bool {
    expr.origin.is_metadata_wrapper()
}

/// Spelling of the outermost wrapper, if `expr` is one.
pub fn metadata_form(expr: &TypeExpr) -> Option<AnnotatedForm> {
    match expr.origin {
        Origin::Annotated(form) => Some(form),
        _ => None,
    }
}

/// The base type with every wrapper removed.
///
/// Expressions without a wrapper are returned unchanged, which makes the
/// operation idempotent. A wrapper with no base type strips to `Any`.
pub fn strip_metadata(expr: &TypeExpr) -> &TypeExpr {
    let mut current = expr;
    while is_metadata_wrapper(current) {
        current = current.args.first().unwrap_or(&MISSING_BASE);
    }
    current
}

/// Payloads of every wrapper around the base type, innermost wrapper first.
///
/// Empty when `expr` carries no wrapper.
pub fn metadata_of(expr: &TypeExpr) -> Vec<&Metadata> {
    let mut layers: Vec<&[Metadata]> = Vec::new();
    let mut current = expr;
    while is_metadata_wrapper(current) {
        layers.push(&current.metadata);
        match current.args.first() {
            Some(base) => current = base,
            None => break,
        }
    }
    layers.into_iter().rev().flatten().collect()
}

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod tests;
