//! Type formatting for diagnostics and debugging.
//!
//! Expressions render in the host's subscript notation:
//! `Dict[str, Optional[int]]`, `Annotated[int, {"gt":0}]`. Class names come
//! from a [`ClassHierarchy`] when one is supplied; otherwise classes render
//! as `class#<id>`.

use crate::hierarchy::ClassHierarchy;
use crate::metadata::{metadata_of, strip_metadata};
use crate::registry::{ContainerKind, canonical_origin, compatibility_chain, container_kind};
use crate::types::{ClassId, Metadata, Origin, TypeExpr};
use serde::Serialize;
use std::fmt::{self, Write};
use typemap_common::limits::{MAX_RELATION_DEPTH, UNION_MEMBER_DISPLAY_LIMIT};

/// Renders type expressions to strings.
#[derive(Clone, Copy, Default)]
pub struct TypeFormatter<'a> {
    hierarchy: Option<&'a ClassHierarchy>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new() -> Self {
        Self { hierarchy: None }
    }

    pub fn with_hierarchy(hierarchy: &'a ClassHierarchy) -> Self {
        Self {
            hierarchy: Some(hierarchy),
        }
    }

    pub fn format(&self, expr: &TypeExpr) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_expr(&mut out, expr, &|id| self.class_name(id));
        out
    }

    fn class_name(&self, id: ClassId) -> String {
        self.hierarchy
            .and_then(|h| h.name(id))
            .map(str::to_owned)
            .unwrap_or_else(|| placeholder_class_name(id))
    }

    /// Debugging summary of `expr`.
    pub fn type_info(&self, expr: &TypeExpr) -> TypeInfo {
        TypeInfo {
            display: self.format(expr),
            origin: expr.origin,
            args: expr.args.iter().map(|arg| self.format(arg)).collect(),
            metadata: metadata_of(expr).into_iter().cloned().collect(),
            canonical_origin: canonical_origin(expr),
            compatibility_chain: compatibility_chain(expr),
            container_kind: container_kind(strip_metadata(expr).origin),
            is_generic: expr.has_args(),
        }
    }
}

/// Serializable summary produced by [`debug_type_info`].
#[derive(Clone, Debug, Serialize)]
pub struct TypeInfo {
    pub display: String,
    pub origin: Origin,
    pub args: Vec<String>,
    pub metadata: Vec<Metadata>,
    pub canonical_origin: Option<Origin>,
    pub compatibility_chain: Vec<Origin>,
    pub container_kind: ContainerKind,
    pub is_generic: bool,
}

/// Origin, arguments, canonical origin, compatibility chain and container
/// family of `expr`, with placeholder class names.
pub fn debug_type_info(expr: &TypeExpr) -> TypeInfo {
    TypeFormatter::new().type_info(expr)
}

pub(crate) fn placeholder_class_name(id: ClassId) -> String {
    format!("class#{}", id.0)
}

pub(crate) fn write_expr(
    out: &mut dyn Write,
    expr: &TypeExpr,
    class_name: &dyn Fn(ClassId) -> String,
) -> fmt::Result {
    write_at_depth(out, expr, class_name, 0)
}

fn write_at_depth(
    out: &mut dyn Write,
    expr: &TypeExpr,
    class_name: &dyn Fn(ClassId) -> String,
    depth: u32,
) -> fmt::Result {
    if depth >= MAX_RELATION_DEPTH {
        return out.write_str("...");
    }

    match expr.origin {
        Origin::Union => {
            if let Some(inner) = expr.optional_inner() {
                out.write_str("Optional[")?;
                write_at_depth(out, inner, class_name, depth + 1)?;
                return out.write_char(']');
            }
            out.write_str("Union[")?;
            for (idx, member) in expr.args.iter().take(UNION_MEMBER_DISPLAY_LIMIT).enumerate() {
                if idx > 0 {
                    out.write_str(", ")?;
                }
                write_at_depth(out, member, class_name, depth + 1)?;
            }
            if expr.args.len() > UNION_MEMBER_DISPLAY_LIMIT {
                write!(out, ", ...{} more", expr.args.len() - UNION_MEMBER_DISPLAY_LIMIT)?;
            }
            out.write_char(']')
        }
        Origin::Annotated(_) => {
            out.write_str("Annotated[")?;
            match expr.args.first() {
                Some(base) => write_at_depth(out, base, class_name, depth + 1)?,
                None => out.write_str("Any")?,
            }
            for payload in &expr.metadata {
                write!(out, ", {payload}")?;
            }
            out.write_char(']')
        }
        origin => {
            match origin {
                Origin::Class(id) => out.write_str(&class_name(id))?,
                other => out.write_str(other.name())?,
            }
            if !expr.has_args() {
                return Ok(());
            }
            out.write_char('[')?;
            for (idx, arg) in expr.args.iter().enumerate() {
                if idx > 0 {
                    out.write_str(", ")?;
                }
                write_at_depth(out, arg, class_name, depth + 1)?;
            }
            out.write_char(']')
        }
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
