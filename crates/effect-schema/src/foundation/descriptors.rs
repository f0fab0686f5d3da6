//! Value descriptors: the resolved symbols that variables stand for.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DescriptorId, Type};

/// A resolved value symbol (value parameter, dispatch or extension receiver).
///
/// Identity is the [`DescriptorId`]; the name and type are carried along so
/// that diagnostics and the reducer do not need to call back into the
/// resolution front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDescriptor {
    /// Unique identifier of the symbol
    pub id: DescriptorId,
    /// Source-level name
    pub name: String,
    /// Declared static type
    pub ty: Type,
}

impl ValueDescriptor {
    pub fn new(id: impl Into<DescriptorId>, name: impl Into<String>, ty: Type) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ty,
        }
    }
}

impl PartialEq for ValueDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueDescriptor {}

impl std::hash::Hash for ValueDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ValueDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}
