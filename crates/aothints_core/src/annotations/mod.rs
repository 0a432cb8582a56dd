//! Annotation values, attribute declarations, and the merged annotation view.
//!
//! An [`Annotation`] is what is written on an element. Annotation types may themselves carry annotations
//! (meta-annotations) and declare attributes that alias attributes of those meta-annotations. The
//! [`MergedAnnotations`] view flattens all of that so callers only ask "is annotation X present, and what are
//! its attribute values?".

use std::collections::BTreeMap;
use std::fmt;

use crate::model::TypeId;

mod mapping;
mod merged;

pub use merged::{MergedAnnotation, MergedAnnotations, SearchStrategy};

/// Kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Bool,
    Int,
    Str,
    Type,
    Types,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Bool => "a boolean",
            AttributeKind::Int => "an integer",
            AttributeKind::Str => "a string",
            AttributeKind::Type => "a type",
            AttributeKind::Types => "a type array",
        };
        f.write_str(name)
    }
}

/// Value of an annotation attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Type(TypeId),
    Types(Vec<TypeId>),
}

impl AttributeValue {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValue::Bool(_) => AttributeKind::Bool,
            AttributeValue::Int(_) => AttributeKind::Int,
            AttributeValue::Str(_) => AttributeKind::Str,
            AttributeValue::Type(_) => AttributeKind::Type,
            AttributeValue::Types(_) => AttributeKind::Types,
        }
    }

    /// Whether this value may be assigned to an attribute declared as `kind`.
    ///
    /// A single type is accepted where a type array is declared.
    pub fn conforms_to(&self, kind: AttributeKind) -> bool {
        self.kind() == kind || (kind == AttributeKind::Types && self.kind() == AttributeKind::Type)
    }

    /// The value as a type array, widening a single type.
    pub fn as_types(&self) -> Option<Vec<TypeId>> {
        match self {
            AttributeValue::Types(types) => Some(types.clone()),
            AttributeValue::Type(ty) => Some(vec![*ty]),
            _ => None,
        }
    }
}

/// An annotation as written on an element (or on an annotation type, for meta-annotations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    annotation_type: TypeId,
    values: BTreeMap<String, AttributeValue>,
}

impl Annotation {
    /// An annotation with no explicit attribute values.
    pub fn new(annotation_type: TypeId) -> Self {
        Self {
            annotation_type,
            values: BTreeMap::new(),
        }
    }

    /// Set an explicit attribute value.
    pub fn with_value(mut self, attribute: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(attribute.into(), value);
        self
    }

    pub fn annotation_type(&self) -> TypeId {
        self.annotation_type
    }

    /// Explicit value of `attribute`, if one was written.
    pub fn value(&self, attribute: &str) -> Option<&AttributeValue> {
        self.values.get(attribute)
    }

    /// Explicit values, ordered by attribute name.
    pub fn values(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Declares that an attribute is an alias for another attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasFor {
    /// Annotation type declaring the target attribute; `None` means the declaring annotation itself.
    pub annotation: Option<TypeId>,
    pub attribute: String,
}

impl AliasFor {
    /// Alias for another attribute of the same annotation type.
    pub fn mirror(attribute: impl Into<String>) -> Self {
        Self {
            annotation: None,
            attribute: attribute.into(),
        }
    }

    /// Alias overriding an attribute of a meta-annotation.
    pub fn meta(annotation: TypeId, attribute: impl Into<String>) -> Self {
        Self {
            annotation: Some(annotation),
            attribute: attribute.into(),
        }
    }

    /// Annotation type holding the target attribute, given the type that declares the alias.
    pub fn target(&self, owner: TypeId) -> TypeId {
        self.annotation.unwrap_or(owner)
    }

    /// Whether the alias targets an attribute of its own annotation type.
    pub fn is_mirror(&self, owner: TypeId) -> bool {
        self.target(owner) == owner
    }
}

/// An attribute declared by an annotation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: String,
    pub kind: AttributeKind,
    pub default: Option<AttributeValue>,
    pub alias_for: Option<AliasFor>,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            alias_for: None,
        }
    }

    pub fn with_default(mut self, default: AttributeValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_alias(mut self, alias_for: AliasFor) -> Self {
        self.alias_for = Some(alias_for);
        self
    }
}
