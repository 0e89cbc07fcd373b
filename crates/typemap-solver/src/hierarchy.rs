//! Nominal class hierarchy.
//!
//! Nominal subclassing cannot be derived from the registry tables: user
//! classes, and the few built-in scalars that inherit from something, are
//! declared here instead.
//!
//! Responsibilities:
//! - Assign [`ClassId`]s and keep class names for formatting
//! - Record the direct bases of every class
//! - Provide the built-in bases of scalar origins
//!
//! A class may only name bases that already exist when it is declared, so the
//! graph is acyclic by construction. The walk that decides nominal
//! subclassing lives in the compatibility resolver, which needs the registry
//! to relate container bases.

use crate::error::HierarchyError;
use crate::types::{AbstractOrigin, ClassId, Origin, ScalarKind};
use once_cell::sync::Lazy;

/// Declaration of one nominal class.
#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub name: String,
    pub bases: Vec<Origin>,
}

/// Immutable set of declared classes.
///
/// Built once through [`ClassHierarchyBuilder`]; exposes no mutators.
#[derive(Clone, Debug, Default)]
pub struct ClassHierarchy {
    classes: Vec<ClassInfo>,
}

static EMPTY: Lazy<ClassHierarchy> = Lazy::new(ClassHierarchy::default);

static BOOL_BASES: &[Origin] = &[Origin::Scalar(ScalarKind::Int)];
static TEXT_BASES: &[Origin] = &[Origin::Abstract(AbstractOrigin::Sequence)];

impl ClassHierarchy {
    pub fn builder() -> ClassHierarchyBuilder {
        ClassHierarchyBuilder::default()
    }

    /// A shared hierarchy with no user classes.
    pub fn empty() -> &'static ClassHierarchy {
        &EMPTY
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(id.0 as usize)
    }

    pub fn name(&self, id: ClassId) -> Option<&str> {
        self.get(id).map(|info| info.name.as_str())
    }

    /// Look up a class by name. The first declaration wins.
    pub fn find(&self, name: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .position(|info| info.name == name)
            .map(|idx| ClassId(idx as u32))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Direct nominal bases of `origin`.
    ///
    /// Unknown class ids and origins without declared bases yield an empty
    /// slice. The implicit `object` root is not listed.
    pub fn bases(&self, origin: Origin) -> &[Origin] {
        match origin {
            Origin::Class(id) => self.get(id).map(|info| info.bases.as_slice()).unwrap_or(&[]),
            Origin::Scalar(ScalarKind::Bool) => BOOL_BASES,
            Origin::Scalar(ScalarKind::Str | ScalarKind::Bytes) => TEXT_BASES,
            _ => &[],
        }
    }
}

/// Collects class declarations and freezes them into a [`ClassHierarchy`].
#[derive(Debug, Default)]
pub struct ClassHierarchyBuilder {
    classes: Vec<ClassInfo>,
}

impl ClassHierarchyBuilder {
    /// Declare a class deriving from `bases`.
    ///
    /// Bases must be class-like origins; class bases must already be
    /// declared.
    pub fn class(
        &mut self,
        name: impl Into<String>,
        bases: &[Origin],
    ) -> Result<ClassId, HierarchyError> {
        let name = name.into();
        for &base in bases {
            if !base.is_class_like() {
                return Err(HierarchyError::InvalidBase { class: name, base });
            }
            if let Origin::Class(id) = base {
                if id.0 as usize >= self.classes.len() {
                    return Err(HierarchyError::UnknownBase { class: name, base: id });
                }
            }
        }
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            name,
            bases: bases.to_vec(),
        });
        Ok(id)
    }

    pub fn build(self) -> ClassHierarchy {
        ClassHierarchy {
            classes: self.classes,
        }
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
