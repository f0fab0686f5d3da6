//! Static types as seen by the effect system.
//!
//! The engine does not infer types. It only needs enough of a type model to
//! know the declared type of a parameter, the type of each built-in constant,
//! and whether one type is a subtype of another. The last question is answered
//! by [`TypeHierarchy`], which the host populates with the class declarations
//! it has resolved.
//!
//! # Examples
//!
//! ```
//! # use effect_schema::foundation::{ClassId, Type, TypeHierarchy};
//! let mut hierarchy = TypeHierarchy::new();
//! hierarchy.declare(ClassId::from("String"), [ClassId::from("CharSequence")]);
//!
//! let string = Type::class("String");
//! let char_sequence = Type::class("CharSequence");
//!
//! assert!(hierarchy.is_subtype(&string, &char_sequence));
//! assert!(hierarchy.is_subtype(&string, &char_sequence.make_nullable()));
//! assert!(!hierarchy.is_subtype(&string.make_nullable(), &char_sequence));
//! assert!(hierarchy.is_subtype(&Type::nothing().make_nullable(), &string.make_nullable()));
//! ```

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::ClassId;

/// A (possibly nullable) static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    /// Classifier of the type
    pub kind: TypeKind,
    /// Whether `null` inhabits the type
    pub nullable: bool,
}

/// Classifier part of a [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// Top of the hierarchy
    Any,
    /// Bottom of the hierarchy; `Nothing?` is the type of `null`
    Nothing,
    /// Built-in boolean
    Boolean,
    /// Any other class or interface
    Class(ClassId),
}

impl Type {
    pub const fn new(kind: TypeKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }

    /// Non-null `Any`.
    pub const fn any() -> Self {
        Self::new(TypeKind::Any, false)
    }

    /// Non-null `Nothing`.
    pub const fn nothing() -> Self {
        Self::new(TypeKind::Nothing, false)
    }

    /// Non-null `Boolean`.
    pub const fn boolean() -> Self {
        Self::new(TypeKind::Boolean, false)
    }

    /// Non-null class type.
    pub fn class(id: impl Into<ClassId>) -> Self {
        Self::new(TypeKind::Class(id.into()), false)
    }

    pub fn make_nullable(&self) -> Self {
        Self::new(self.kind.clone(), true)
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == TypeKind::Boolean && !self.nullable
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Any => write!(f, "Any")?,
            TypeKind::Nothing => write!(f, "Nothing")?,
            TypeKind::Boolean => write!(f, "Boolean")?,
            TypeKind::Class(id) => write!(f, "{}", id)?,
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Declared class hierarchy used to answer subtype queries.
///
/// Only direct supertypes are recorded; [`TypeHierarchy::is_subtype`] walks
/// them transitively. Declaration order is kept so that `Debug` output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeHierarchy {
    supertypes: IndexMap<ClassId, Vec<ClassId>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the direct supertypes of `class`, appending to any already known.
    pub fn declare(&mut self, class: ClassId, supertypes: impl IntoIterator<Item = ClassId>) {
        self.supertypes.entry(class).or_default().extend(supertypes);
    }

    /// Direct supertypes of `class` (empty when the class was never declared).
    pub fn direct_supertypes(&self, class: &ClassId) -> &[ClassId] {
        self.supertypes.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether `sub` is a subtype of `sup`.
    ///
    /// A nullable type is only a subtype of nullable types. Beyond that,
    /// `Nothing` is below every classifier, every classifier is below `Any`,
    /// and classes follow their declared supertypes.
    pub fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        if sub.nullable && !sup.nullable {
            return false;
        }
        match (&sub.kind, &sup.kind) {
            (TypeKind::Nothing, _) | (_, TypeKind::Any) => true,
            (TypeKind::Class(a), TypeKind::Class(b)) => self.is_subclass(a, b),
            (a, b) => a == b,
        }
    }

    fn is_subclass(&self, sub: &ClassId, sup: &ClassId) -> bool {
        // Declared hierarchies are not checked for cycles.
        let mut visited = IndexSet::new();
        let mut stack = vec![sub];
        while let Some(class) = stack.pop() {
            if class == sup {
                return true;
            }
            if visited.insert(class) {
                stack.extend(self.direct_supertypes(class));
            }
        }
        false
    }
}
