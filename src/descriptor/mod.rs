//! JSON model descriptors.
//!
//! A descriptor lists the types of a program by qualified name, with their supertypes, members and annotations:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "demo.Bean", "kind": "class",
//!       "annotations": [{ "type": "aot.Reflective" }],
//!       "fields": [{ "name": "name", "type": "String" }] }
//!   ]
//! }
//! ```
//!
//! Types may be referenced before they are declared: loading runs in passes (declare every type, wire supertypes,
//! declare annotation attributes, then members and annotations). Annotation values are read according to the kind
//! of the attribute they are assigned to; type-valued attributes take type names.

use std::collections::BTreeMap;

use aothints_core::{
    AliasFor, Annotation, AttributeDecl, AttributeKind, AttributeValue, Element, MethodSpec, TypeId, TypeKind,
    TypeModel,
};
use serde::Deserialize;
use serde_json::Value;

mod errors;

pub use errors::DescriptorError;

/// Root of a descriptor document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDescriptor {
    Class,
    Interface,
    Annotation,
}

impl From<KindDescriptor> for TypeKind {
    fn from(kind: KindDescriptor) -> Self {
        match kind {
            KindDescriptor::Class => TypeKind::Class,
            KindDescriptor::Interface => TypeKind::Interface,
            KindDescriptor::Annotation => TypeKind::Annotation,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDescriptor {
    pub name: String,
    pub kind: KindDescriptor,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    /// Only meaningful on annotation types.
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationDescriptor {
    #[serde(rename = "type")]
    pub annotation_type: String,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKindDescriptor {
    Bool,
    Int,
    String,
    Type,
    Types,
}

impl From<AttributeKindDescriptor> for AttributeKind {
    fn from(kind: AttributeKindDescriptor) -> Self {
        match kind {
            AttributeKindDescriptor::Bool => AttributeKind::Bool,
            AttributeKindDescriptor::Int => AttributeKind::Int,
            AttributeKindDescriptor::String => AttributeKind::Str,
            AttributeKindDescriptor::Type => AttributeKind::Type,
            AttributeKindDescriptor::Types => AttributeKind::Types,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDescriptor {
    pub name: String,
    pub kind: AttributeKindDescriptor,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub alias_for: Option<AliasDescriptor>,
}

/// `annotation` absent means a mirror within the declaring annotation type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasDescriptor {
    #[serde(default)]
    pub annotation: Option<String>,
    pub attribute: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorDescriptor {
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

// ============================================================================
// Loading
// ============================================================================

impl ModelDescriptor {
    /// Parse a descriptor document.
    ///
    /// ## Parameters
    /// - `name`: shown in diagnostics, usually the file path.
    /// - `source`: the JSON text.
    pub fn parse(name: &str, source: &str) -> Result<Self, DescriptorError> {
        serde_json::from_str(source).map_err(|err| DescriptorError::syntax(name, source, &err))
    }

    /// Build a fresh [`TypeModel`] containing every described type.
    #[tracing::instrument(skip_all, fields(types = self.types.len()))]
    pub fn build(&self) -> Result<TypeModel, DescriptorError> {
        let mut model = TypeModel::new();

        let mut declared = Vec::with_capacity(self.types.len());
        for ty in &self.types {
            declared.push(model.declare_type(ty.name.as_str(), ty.kind.into())?);
        }
        let described: Vec<(TypeId, &TypeDescriptor)> = declared.into_iter().zip(&self.types).collect();

        for &(id, ty) in &described {
            if let Some(superclass) = &ty.superclass {
                let superclass = resolve(&model, superclass, || format!("the superclass of `{}`", ty.name))?;
                model.set_superclass(id, superclass)?;
            }
            for interface in &ty.interfaces {
                let interface = resolve(&model, interface, || format!("the interfaces of `{}`", ty.name))?;
                model.add_interface(id, interface)?;
            }
        }

        // Every type is declared by now, so defaults and aliases may name any of them.
        for &(id, ty) in &described {
            for attr in &ty.attributes {
                let mut decl = AttributeDecl::new(attr.name.as_str(), attr.kind.into());
                if let Some(alias) = &attr.alias_for {
                    decl = decl.with_alias(match &alias.annotation {
                        Some(target) => {
                            let context = || format!("the alias of `{}.{}`", ty.name, attr.name);
                            AliasFor::meta(resolve(&model, target, context)?, alias.attribute.as_str())
                        }
                        None => AliasFor::mirror(alias.attribute.as_str()),
                    });
                }
                if let Some(default) = &attr.default {
                    let value = convert_value(&model, &ty.name, &attr.name, decl.kind, default)?;
                    decl = decl.with_default(value);
                }
                model.add_attribute(id, decl)?;
            }
        }

        for &(id, ty) in &described {
            annotate_all(&mut model, id.into(), &ty.annotations)?;

            for ctor in &ty.constructors {
                let params = resolve_all(&model, &ctor.parameters, || format!("a constructor of `{}`", ty.name))?;
                let ctor_id = model.add_constructor(id, params)?;
                annotate_all(&mut model, ctor_id.into(), &ctor.annotations)?;
            }
            for field in &ty.fields {
                let context = || format!("field `{}.{}`", ty.name, field.name);
                let field_type = resolve(&model, &field.field_type, context)?;
                let field_id = model.add_field(id, field.name.as_str(), field_type)?;
                annotate_all(&mut model, field_id.into(), &field.annotations)?;
            }
            for method in &ty.methods {
                let context = || format!("method `{}.{}`", ty.name, method.name);
                let mut spec = MethodSpec::new(method.name.as_str())
                    .with_parameters(resolve_all(&model, &method.parameters, context)?);
                if let Some(returns) = &method.returns {
                    spec = spec.returning(resolve(&model, returns, context)?);
                }
                if method.is_abstract {
                    spec = spec.abstract_method();
                }
                let method_id = model.add_method(id, spec)?;
                annotate_all(&mut model, method_id.into(), &method.annotations)?;
            }
        }

        tracing::debug!(types = described.len(), "loaded model descriptor");
        Ok(model)
    }
}

/// Parse `source` and build its model in one step.
pub fn load_model(name: &str, source: &str) -> Result<TypeModel, DescriptorError> {
    ModelDescriptor::parse(name, source)?.build()
}

fn resolve(model: &TypeModel, name: &str, context: impl FnOnce() -> String) -> Result<TypeId, DescriptorError> {
    model.lookup(name).ok_or_else(|| DescriptorError::UnknownType {
        name: name.to_string(),
        context: context(),
    })
}

fn resolve_all(
    model: &TypeModel,
    names: &[String],
    context: impl Fn() -> String,
) -> Result<Vec<TypeId>, DescriptorError> {
    names.iter().map(|name| resolve(model, name, &context)).collect()
}

fn annotate_all(
    model: &mut TypeModel,
    element: Element,
    annotations: &[AnnotationDescriptor],
) -> Result<(), DescriptorError> {
    for descriptor in annotations {
        let annotation = convert_annotation(model, element, descriptor)?;
        model.annotate(element, annotation)?;
    }
    Ok(())
}

fn convert_annotation(
    model: &TypeModel,
    element: Element,
    descriptor: &AnnotationDescriptor,
) -> Result<Annotation, DescriptorError> {
    let ty = resolve(model, &descriptor.annotation_type, || {
        format!("an annotation on {}", model.describe(element))
    })?;
    let decl = model.type_decl(ty);
    let mut annotation = Annotation::new(ty);
    for (attribute, raw) in &descriptor.values {
        let declared = decl
            .attribute(attribute)
            .ok_or_else(|| DescriptorError::UnknownAttribute {
                annotation: decl.name.clone(),
                attribute: attribute.clone(),
            })?;
        let value = convert_value(model, &decl.name, attribute, declared.kind, raw)?;
        annotation = annotation.with_value(attribute.as_str(), value);
    }
    Ok(annotation)
}

/// Read a JSON value as an attribute value of `kind`. A single type name is accepted for a type array.
fn convert_value(
    model: &TypeModel,
    annotation: &str,
    attribute: &str,
    kind: AttributeKind,
    raw: &Value,
) -> Result<AttributeValue, DescriptorError> {
    let invalid = || DescriptorError::InvalidValue {
        annotation: annotation.to_string(),
        attribute: attribute.to_string(),
        expected: kind,
        found: raw.to_string(),
    };
    let context = || format!("`{annotation}.{attribute}`");

    match (kind, raw) {
        (AttributeKind::Bool, Value::Bool(b)) => Ok(AttributeValue::Bool(*b)),
        (AttributeKind::Int, Value::Number(n)) => n.as_i64().map(AttributeValue::Int).ok_or_else(invalid),
        (AttributeKind::Str, Value::String(s)) => Ok(AttributeValue::Str(s.clone())),
        (AttributeKind::Type, Value::String(name)) => Ok(AttributeValue::Type(resolve(model, name, context)?)),
        (AttributeKind::Types, Value::String(name)) => {
            Ok(AttributeValue::Types(vec![resolve(model, name, context)?]))
        }
        (AttributeKind::Types, Value::Array(items)) => {
            let mut types = Vec::with_capacity(items.len());
            for item in items {
                let name = item.as_str().ok_or_else(invalid)?;
                types.push(resolve(model, name, context)?);
            }
            Ok(AttributeValue::Types(types))
        }
        _ => Err(invalid()),
    }
}
