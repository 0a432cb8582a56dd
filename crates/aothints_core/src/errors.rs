//! Error types for building the element model and reading annotation attributes.

use thiserror::Error;

use crate::annotations::AttributeKind;
use crate::model::{Element, TypeKind};

/// Error raised while building a [`crate::model::TypeModel`].
///
/// These are programming errors in whoever assembles the model (a descriptor loader, a test), so they are
/// reported eagerly instead of being folded into discovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("type `{name}` is already declared")]
    DuplicateType { name: String },

    #[error("`{name}` is {kind}, expected {expected}")]
    KindMismatch {
        name: String,
        kind: TypeKind,
        expected: &'static str,
    },

    #[error("`{sub}` cannot extend or implement `{sup}`: the hierarchy would contain a cycle")]
    HierarchyCycle { sub: String, sup: String },

    #[error("`{owner}` already declares {member}")]
    DuplicateMember { owner: String, member: String },

    #[error("default of attribute `{attribute}` on `{annotation}` is {found}, expected {expected}")]
    DefaultKindMismatch {
        annotation: String,
        attribute: String,
        expected: AttributeKind,
        found: AttributeKind,
    },

    #[error("{0:?} does not belong to this model")]
    UnknownElement(Element),
}

/// Error raised when reading an attribute of a merged annotation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("annotation `{annotation}` has no value for attribute `{attribute}`")]
    Missing { annotation: String, attribute: String },

    #[error("attribute `{attribute}` of `{annotation}` is {found}, expected {expected}")]
    KindMismatch {
        annotation: String,
        attribute: String,
        expected: AttributeKind,
        found: AttributeKind,
    },
}

/// Reason an annotation is ignored during discovery.
///
/// Never surfaced as an error: malformed annotation metadata makes an element "not marked".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum AnnotationDefect {
    #[error("annotation refers to {0:?}, which does not belong to this model")]
    ForeignType(crate::model::TypeId),

    #[error("`{name}` is {kind}, not an annotation type")]
    NotAnAnnotationType { name: String, kind: TypeKind },

    #[error("`{annotation}` declares no attribute `{attribute}`")]
    UnknownAttribute { annotation: String, attribute: String },

    #[error("value of `{annotation}.{attribute}` is {found}, declared as {expected}")]
    ValueKindMismatch {
        annotation: String,
        attribute: String,
        expected: AttributeKind,
        found: AttributeKind,
    },

    #[error("alias on `{annotation}.{attribute}` points at `{target}.{target_attribute}`, which does not exist")]
    BrokenAlias {
        annotation: String,
        attribute: String,
        target: String,
        target_attribute: String,
    },
}
