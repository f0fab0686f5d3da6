//! Foundation types shared by every part of the engine.
//!
//! These are stand-ins for what the resolution front end hands over:
//! identifiers, declared types with a subtype oracle, and value descriptors.

pub mod descriptors;
pub mod ids;
pub mod types;

pub use descriptors::ValueDescriptor;
pub use ids::{ClassId, DescriptorId, FunctionId, Path};
pub use types::{Type, TypeHierarchy, TypeKind};
