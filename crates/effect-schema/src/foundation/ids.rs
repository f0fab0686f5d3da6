//! Identifiers for resolved symbols.
//!
//! Descriptors handed to the engine by the resolution front end are named by
//! typed string wrappers. Two identifiers of the same kind are the same symbol
//! iff their paths are equal, which is what value identity in the expression
//! algebra is built on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchical, dot-separated name of a resolved symbol
/// (e.g. `"kotlin.text.isNullOrEmpty.receiver"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path {
    /// Ordered segments of the path.
    pub segments: Vec<String>,
}

impl Path {
    /// Creates a path from its segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Creates a path from a dot-separated string.
    pub fn from_path_str(s: &str) -> Self {
        Self {
            segments: s.split('.').map(String::from).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, usually the simple name of the symbol.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append a segment to create a new path.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::new(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::from_path_str(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::from_path_str(&s)
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub Path);

        impl $name {
            /// Creates a new identifier from a path.
            pub fn new(p: impl Into<Path>) -> Self {
                Self(p.into())
            }

            /// Returns a reference to the underlying path.
            pub fn path(&self) -> &Path {
                &self.0
            }

            /// Simple (last-segment) name of the symbol.
            pub fn simple_name(&self) -> &str {
                self.0.last().unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(Path::from_path_str(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Path::from_path_str(&s))
            }
        }

        impl From<Path> for $name {
            fn from(p: Path) -> Self {
                Self(p)
            }
        }
    };
}

define_id!(
    /// Identifier of a value symbol: a value parameter or a receiver
    DescriptorId
);

define_id!(
    /// Identifier of a callable symbol
    FunctionId
);

define_id!(
    /// Identifier of a class or interface
    ClassId
);
