//! Provide the program-element model that reflection-hint discovery runs over.
//!
//! This crate is intentionally small and dependency-light. It contains:
//! - an arena-backed [`model::TypeModel`] of types, constructors, fields and methods, with stable ids,
//! - reflection utilities that walk class and interface hierarchies,
//! - an annotation model with a merged view that resolves meta-annotations and attribute aliases, and
//! - the canonical vocabulary of builtin and well-known types.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, no hint-registry types.
//! - Element identity is the declaration site (an id), never a name.

pub mod annotations;
pub mod errors;
pub mod lang;
pub mod model;

pub use annotations::{
    AliasFor, Annotation, AttributeDecl, AttributeKind, AttributeValue, MergedAnnotation, MergedAnnotations,
    SearchStrategy,
};
pub use errors::{AttributeError, ModelError};
pub use model::{ConstructorId, Element, FieldId, MethodId, MethodSpec, TypeId, TypeKind, TypeModel};
