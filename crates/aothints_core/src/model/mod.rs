//! Arena-backed model of program elements.
//!
//! Tracks every type, constructor, field and method that discovery can look at, together with the annotations
//! declared on them. Elements are addressed by small copyable ids; identity is the declaration site, so two
//! methods named `run` on different types are distinct elements even when one overrides the other.

use std::collections::HashMap;
use std::fmt;

use crate::annotations::{Annotation, AttributeDecl, AttributeKind, AttributeValue};
use crate::errors::ModelError;
use crate::lang::builtins::{self, BuiltinKind, BuiltinTypeId};
use crate::lang::well_known::{self, VALUE_ATTRIBUTE, WellKnownId};

pub mod hierarchy;

pub use hierarchy::SuperclassChain;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            fn from_index(index: usize) -> Self {
                Self(u32::try_from(index).expect("INVARIANT: model arena exceeds u32::MAX entries"))
            }

            /// Position of this id in its model arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Identifies a type declared in a [`TypeModel`].
    TypeId
);
arena_id!(
    /// Identifies a constructor declared in a [`TypeModel`].
    ConstructorId
);
arena_id!(
    /// Identifies a field declared in a [`TypeModel`].
    FieldId
);
arena_id!(
    /// Identifies a method declared in a [`TypeModel`].
    MethodId
);

/// A reflective handle to a type, constructor, field or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Type(TypeId),
    Constructor(ConstructorId),
    Field(FieldId),
    Method(MethodId),
}

impl From<TypeId> for Element {
    fn from(id: TypeId) -> Self {
        Element::Type(id)
    }
}

impl From<ConstructorId> for Element {
    fn from(id: ConstructorId) -> Self {
        Element::Constructor(id)
    }
}

impl From<FieldId> for Element {
    fn from(id: FieldId) -> Self {
        Element::Field(id)
    }
}

impl From<MethodId> for Element {
    fn from(id: MethodId) -> Self {
        Element::Method(id)
    }
}

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Annotation,
    Primitive,
}

impl TypeKind {
    /// Whether types of this kind can be implemented (appear in an `interfaces` list).
    pub fn is_interface_like(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Annotation)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "a class"),
            TypeKind::Interface => write!(f, "an interface"),
            TypeKind::Annotation => write!(f, "an annotation type"),
            TypeKind::Primitive => write!(f, "a primitive"),
        }
    }
}

/// A declared type.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub constructors: Vec<ConstructorId>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<MethodId>,
    pub annotations: Vec<Annotation>,
    /// Attributes declared by an annotation type (empty for other kinds).
    pub attributes: Vec<AttributeDecl>,
}

impl TypeDecl {
    /// Look up a declared attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A declared constructor.
#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub declaring_type: TypeId,
    pub parameter_types: Vec<TypeId>,
    pub annotations: Vec<Annotation>,
}

/// A declared field.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub declaring_type: TypeId,
    pub name: String,
    pub field_type: TypeId,
    pub annotations: Vec<Annotation>,
}

/// A declared method.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub declaring_type: TypeId,
    pub name: String,
    pub parameter_types: Vec<TypeId>,
    pub return_type: Option<TypeId>,
    /// `false` for methods with a body, including interface default methods.
    pub is_abstract: bool,
    pub annotations: Vec<Annotation>,
}

/// Shape of a method to add with [`TypeModel::add_method`].
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub name: String,
    pub parameter_types: Vec<TypeId>,
    pub return_type: Option<TypeId>,
    pub is_abstract: bool,
}

impl MethodSpec {
    /// A concrete method with no parameters and no return type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: None,
            is_abstract: false,
        }
    }

    /// Set the parameter types.
    pub fn with_parameters(mut self, parameter_types: Vec<TypeId>) -> Self {
        self.parameter_types = parameter_types;
        self
    }

    /// Set the return type.
    pub fn returning(mut self, return_type: TypeId) -> Self {
        self.return_type = Some(return_type);
        self
    }

    /// Mark the method as abstract (no body).
    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// The element model discovery runs over.
///
/// ## Notes
/// - Ids are only meaningful for the model that issued them; accessors index the arenas directly and panic on an
///   id from another model, like slice indexing.
/// - [`TypeModel::new`] declares the builtin vocabulary and the well-known types, so the marker annotation is
///   always available.
#[derive(Debug, Clone)]
pub struct TypeModel {
    types: Vec<TypeDecl>,
    constructors: Vec<ConstructorDecl>,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    by_name: HashMap<String, TypeId>,
    aliases: HashMap<&'static str, TypeId>,
    well_known: HashMap<WellKnownId, TypeId>,
    builtin_count: usize,
}

impl Default for TypeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeModel {
    pub fn new() -> Self {
        let mut model = Self {
            types: Vec::new(),
            constructors: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            by_name: HashMap::new(),
            aliases: HashMap::new(),
            well_known: HashMap::new(),
            builtin_count: 0,
        };
        model.add_builtins();
        model
    }

    fn add_builtins(&mut self) {
        for info in builtins::BUILTIN_TYPES {
            let kind = match info.kind {
                BuiltinKind::Class => TypeKind::Class,
                BuiltinKind::Primitive => TypeKind::Primitive,
            };
            let id = self.push_type(info.item.canonical, kind);
            for &alias in info.item.aliases {
                self.aliases.insert(alias, id);
            }
        }

        let synthesized = self.push_type(
            well_known::as_str(WellKnownId::SynthesizedAnnotation),
            TypeKind::Interface,
        );
        let simple = self.push_type(
            well_known::as_str(WellKnownId::SimpleReflectiveProcessor),
            TypeKind::Class,
        );
        let reflective = self.push_type(well_known::as_str(WellKnownId::Reflective), TypeKind::Annotation);
        self.types[reflective.index()].attributes.push(
            AttributeDecl::new(VALUE_ATTRIBUTE, AttributeKind::Types)
                .with_default(AttributeValue::Types(vec![simple])),
        );

        self.well_known.insert(WellKnownId::SynthesizedAnnotation, synthesized);
        self.well_known.insert(WellKnownId::SimpleReflectiveProcessor, simple);
        self.well_known.insert(WellKnownId::Reflective, reflective);
        self.builtin_count = self.types.len();
    }

    fn push_type(&mut self, name: &str, kind: TypeKind) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        // Every class except the root extends `Object` until told otherwise.
        let superclass = match kind {
            TypeKind::Class if !self.types.is_empty() => Some(TypeId::from_index(0)),
            _ => None,
        };
        self.types.push(TypeDecl {
            name: name.to_string(),
            kind,
            superclass,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            attributes: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Declare a new type.
    ///
    /// ## Errors
    /// - [`ModelError::DuplicateType`] if `name` (or a builtin alias with that spelling) is already taken.
    pub fn declare_type(&mut self, name: impl Into<String>, kind: TypeKind) -> Result<TypeId, ModelError> {
        let name = name.into();
        if self.lookup(&name).is_some() {
            return Err(ModelError::DuplicateType { name });
        }
        Ok(self.push_type(&name, kind))
    }

    /// Declare a class extending `Object`.
    pub fn declare_class(&mut self, name: impl Into<String>) -> Result<TypeId, ModelError> {
        self.declare_type(name, TypeKind::Class)
    }

    /// Declare an interface.
    pub fn declare_interface(&mut self, name: impl Into<String>) -> Result<TypeId, ModelError> {
        self.declare_type(name, TypeKind::Interface)
    }

    /// Declare an annotation type.
    pub fn declare_annotation(&mut self, name: impl Into<String>) -> Result<TypeId, ModelError> {
        self.declare_type(name, TypeKind::Annotation)
    }

    /// Make `class` extend `superclass`, replacing the implicit `Object` superclass.
    pub fn set_superclass(&mut self, class: TypeId, superclass: TypeId) -> Result<(), ModelError> {
        self.expect_kind(class, "a class", |k| k == TypeKind::Class)?;
        self.expect_kind(superclass, "a class", |k| k == TypeKind::Class)?;
        if self.superclass_chain(superclass).any(|t| t == class) {
            return Err(self.cycle(class, superclass));
        }
        self.types[class.index()].superclass = Some(superclass);
        Ok(())
    }

    /// Make `ty` implement (or, for interfaces, extend) `interface`.
    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) -> Result<(), ModelError> {
        self.expect_kind(ty, "a class, interface or annotation type", |k| k != TypeKind::Primitive)?;
        self.expect_kind(interface, "an interface", TypeKind::is_interface_like)?;
        if interface == ty || self.all_interfaces(interface).contains(&ty) {
            return Err(self.cycle(ty, interface));
        }
        let decl = &mut self.types[ty.index()];
        if !decl.interfaces.contains(&interface) {
            decl.interfaces.push(interface);
        }
        Ok(())
    }

    /// Declare a constructor on a class.
    pub fn add_constructor(&mut self, ty: TypeId, parameter_types: Vec<TypeId>) -> Result<ConstructorId, ModelError> {
        self.expect_kind(ty, "a class", |k| k == TypeKind::Class)?;
        self.check_types(&parameter_types)?;
        let exists = self.types[ty.index()]
            .constructors
            .iter()
            .any(|&c| self.constructors[c.index()].parameter_types == parameter_types);
        if exists {
            return Err(ModelError::DuplicateMember {
                owner: self.type_name(ty).to_string(),
                member: format!("constructor {}", self.signature(&parameter_types)),
            });
        }
        let id = ConstructorId::from_index(self.constructors.len());
        self.constructors.push(ConstructorDecl {
            declaring_type: ty,
            parameter_types,
            annotations: Vec::new(),
        });
        self.types[ty.index()].constructors.push(id);
        Ok(id)
    }

    /// Declare a field on a class or interface.
    pub fn add_field(&mut self, ty: TypeId, name: impl Into<String>, field_type: TypeId) -> Result<FieldId, ModelError> {
        self.expect_kind(ty, "a class or interface", |k| {
            matches!(k, TypeKind::Class | TypeKind::Interface)
        })?;
        self.check_types(&[field_type])?;
        let name = name.into();
        if self.types[ty.index()]
            .fields
            .iter()
            .any(|&f| self.fields[f.index()].name == name)
        {
            return Err(ModelError::DuplicateMember {
                owner: self.type_name(ty).to_string(),
                member: format!("field `{name}`"),
            });
        }
        let id = FieldId::from_index(self.fields.len());
        self.fields.push(FieldDecl {
            declaring_type: ty,
            name,
            field_type,
            annotations: Vec::new(),
        });
        self.types[ty.index()].fields.push(id);
        Ok(id)
    }

    /// Declare a method on a class or interface.
    pub fn add_method(&mut self, ty: TypeId, spec: MethodSpec) -> Result<MethodId, ModelError> {
        self.expect_kind(ty, "a class or interface", |k| {
            matches!(k, TypeKind::Class | TypeKind::Interface)
        })?;
        self.check_types(&spec.parameter_types)?;
        if let Some(ret) = spec.return_type {
            self.check_types(&[ret])?;
        }
        let exists = self.types[ty.index()].methods.iter().any(|&m| {
            let existing = &self.methods[m.index()];
            existing.name == spec.name && existing.parameter_types == spec.parameter_types
        });
        if exists {
            return Err(ModelError::DuplicateMember {
                owner: self.type_name(ty).to_string(),
                member: format!("method `{}{}`", spec.name, self.signature(&spec.parameter_types)),
            });
        }
        let id = MethodId::from_index(self.methods.len());
        self.methods.push(MethodDecl {
            declaring_type: ty,
            name: spec.name,
            parameter_types: spec.parameter_types,
            return_type: spec.return_type,
            is_abstract: spec.is_abstract,
            annotations: Vec::new(),
        });
        self.types[ty.index()].methods.push(id);
        Ok(id)
    }

    /// Declare an attribute on an annotation type.
    pub fn add_attribute(&mut self, annotation_type: TypeId, attribute: AttributeDecl) -> Result<(), ModelError> {
        self.expect_kind(annotation_type, "an annotation type", |k| k == TypeKind::Annotation)?;
        let decl = &self.types[annotation_type.index()];
        if decl.attribute(&attribute.name).is_some() {
            return Err(ModelError::DuplicateMember {
                owner: decl.name.clone(),
                member: format!("attribute `{}`", attribute.name),
            });
        }
        if let Some(default) = &attribute.default {
            if !default.conforms_to(attribute.kind) {
                return Err(ModelError::DefaultKindMismatch {
                    annotation: decl.name.clone(),
                    attribute: attribute.name.clone(),
                    expected: attribute.kind,
                    found: default.kind(),
                });
            }
        }
        self.types[annotation_type.index()].attributes.push(attribute);
        Ok(())
    }

    /// Attach an annotation to an element.
    ///
    /// ## Notes
    /// - The annotation itself is not validated here. Malformed annotations (wrong target kind, unknown attributes,
    ///   mismatched values) are ignored during discovery instead, so an element carrying one is simply not marked.
    pub fn annotate(&mut self, element: impl Into<Element>, annotation: Annotation) -> Result<(), ModelError> {
        let element = element.into();
        if !self.contains(element) {
            return Err(ModelError::UnknownElement(element));
        }
        let annotations = match element {
            Element::Type(id) => &mut self.types[id.index()].annotations,
            Element::Constructor(id) => &mut self.constructors[id.index()].annotations,
            Element::Field(id) => &mut self.fields[id.index()].annotations,
            Element::Method(id) => &mut self.methods[id.index()].annotations,
        };
        annotations.push(annotation);
        Ok(())
    }

    fn expect_kind(
        &self,
        ty: TypeId,
        expected: &'static str,
        accepts: impl Fn(TypeKind) -> bool,
    ) -> Result<(), ModelError> {
        let decl = self
            .types
            .get(ty.index())
            .ok_or(ModelError::UnknownElement(Element::Type(ty)))?;
        if accepts(decl.kind) {
            Ok(())
        } else {
            Err(ModelError::KindMismatch {
                name: decl.name.clone(),
                kind: decl.kind,
                expected,
            })
        }
    }

    fn check_types(&self, types: &[TypeId]) -> Result<(), ModelError> {
        match types.iter().find(|t| t.index() >= self.types.len()) {
            Some(&missing) => Err(ModelError::UnknownElement(Element::Type(missing))),
            None => Ok(()),
        }
    }

    fn cycle(&self, sub: TypeId, sup: TypeId) -> ModelError {
        ModelError::HierarchyCycle {
            sub: self.type_name(sub).to_string(),
            sup: self.type_name(sup).to_string(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Resolve a type name: declared names first, then builtin aliases.
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name
            .get(name)
            .or_else(|| self.aliases.get(name))
            .copied()
    }

    /// Id of a well-known type; always declared by [`TypeModel::new`].
    pub fn well_known(&self, id: WellKnownId) -> TypeId {
        *self
            .well_known
            .get(&id)
            .expect("INVARIANT: well-known types are declared by TypeModel::new")
    }

    /// Id of a builtin type; always declared by [`TypeModel::new`].
    pub fn builtin(&self, id: BuiltinTypeId) -> TypeId {
        self.lookup(builtins::as_str(id))
            .expect("INVARIANT: builtin types are declared by TypeModel::new")
    }

    /// Whether `element` was issued by this model.
    pub fn contains(&self, element: Element) -> bool {
        match element {
            Element::Type(id) => id.index() < self.types.len(),
            Element::Constructor(id) => id.index() < self.constructors.len(),
            Element::Field(id) => id.index() < self.fields.len(),
            Element::Method(id) => id.index() < self.methods.len(),
        }
    }

    /// ## Panics
    /// - When `id` was issued by another model; check with [`TypeModel::contains`] first for untrusted ids.
    pub fn type_decl(&self, id: TypeId) -> &TypeDecl {
        &self.types[id.index()]
    }

    pub fn constructor(&self, id: ConstructorId) -> &ConstructorDecl {
        &self.constructors[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldDecl {
        &self.fields[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodDecl {
        &self.methods[id.index()]
    }

    pub fn type_name(&self, id: TypeId) -> &str {
        &self.types[id.index()].name
    }

    /// Whether `id` is part of the vocabulary declared by [`TypeModel::new`].
    pub fn is_builtin(&self, id: TypeId) -> bool {
        id.index() < self.builtin_count
    }

    /// Iterate over all types, builtins included, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(index, decl)| (TypeId::from_index(index), decl))
    }

    /// Iterate over the types declared after the builtin vocabulary.
    pub fn declared_types(&self) -> impl Iterator<Item = (TypeId, &TypeDecl)> + '_ {
        self.types().skip(self.builtin_count)
    }

    /// Annotations declared directly on `element`.
    pub fn annotations_of(&self, element: Element) -> &[Annotation] {
        match element {
            Element::Type(id) => &self.types[id.index()].annotations,
            Element::Constructor(id) => &self.constructors[id.index()].annotations,
            Element::Field(id) => &self.fields[id.index()].annotations,
            Element::Method(id) => &self.methods[id.index()].annotations,
        }
    }

    /// The type an element belongs to (the type itself for type elements).
    pub fn declaring_type(&self, element: Element) -> TypeId {
        match element {
            Element::Type(id) => id,
            Element::Constructor(id) => self.constructors[id.index()].declaring_type,
            Element::Field(id) => self.fields[id.index()].declaring_type,
            Element::Method(id) => self.methods[id.index()].declaring_type,
        }
    }

    /// Human-readable rendering of an element, e.g. `demo.Bean.managed(String)`.
    pub fn describe(&self, element: Element) -> String {
        match element {
            Element::Type(id) => self.type_name(id).to_string(),
            Element::Constructor(id) => {
                let ctor = self.constructor(id);
                format!(
                    "{}{}",
                    self.type_name(ctor.declaring_type),
                    self.signature(&ctor.parameter_types)
                )
            }
            Element::Field(id) => {
                let field = self.field(id);
                format!("{}.{}", self.type_name(field.declaring_type), field.name)
            }
            Element::Method(id) => {
                let method = self.method(id);
                format!(
                    "{}.{}{}",
                    self.type_name(method.declaring_type),
                    method.name,
                    self.signature(&method.parameter_types)
                )
            }
        }
    }

    fn signature(&self, parameter_types: &[TypeId]) -> String {
        let params: Vec<&str> = parameter_types.iter().map(|&p| self.type_name(p)).collect();
        format!("({})", params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_declared() {
        let model = TypeModel::new();
        let string = model.lookup("String").unwrap();
        assert_eq!(model.type_decl(string).kind, TypeKind::Class);
        assert_eq!(model.type_decl(string).superclass, Some(model.builtin(BuiltinTypeId::Object)));
        assert_eq!(model.lookup("i32"), Some(model.builtin(BuiltinTypeId::Int)));
        assert!(model.is_builtin(string));
        assert_eq!(model.declared_types().count(), 0);
    }

    #[test]
    fn test_marker_defaults_to_simple_processor() {
        let model = TypeModel::new();
        let reflective = model.well_known(WellKnownId::Reflective);
        let value = model.type_decl(reflective).attribute(VALUE_ATTRIBUTE).unwrap();
        assert_eq!(
            value.default,
            Some(AttributeValue::Types(vec![
                model.well_known(WellKnownId::SimpleReflectiveProcessor)
            ]))
        );
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut model = TypeModel::new();
        model.declare_class("demo.Bean").unwrap();
        assert_eq!(
            model.declare_interface("demo.Bean"),
            Err(ModelError::DuplicateType {
                name: "demo.Bean".to_string()
            })
        );
        assert!(model.declare_class("bool").is_err());
    }

    #[test]
    fn test_superclass_cycle_rejected() {
        let mut model = TypeModel::new();
        let a = model.declare_class("A").unwrap();
        let b = model.declare_class("B").unwrap();
        model.set_superclass(b, a).unwrap();
        assert!(matches!(
            model.set_superclass(a, b),
            Err(ModelError::HierarchyCycle { .. })
        ));
    }

    #[test]
    fn test_interface_cycle_rejected() {
        let mut model = TypeModel::new();
        let a = model.declare_interface("A").unwrap();
        let b = model.declare_interface("B").unwrap();
        model.add_interface(b, a).unwrap();
        assert!(model.add_interface(a, b).is_err());
        assert!(model.add_interface(a, a).is_err());
    }

    #[test]
    fn test_superclass_must_be_class() {
        let mut model = TypeModel::new();
        let class = model.declare_class("C").unwrap();
        let iface = model.declare_interface("I").unwrap();
        assert!(matches!(
            model.set_superclass(class, iface),
            Err(ModelError::KindMismatch { .. })
        ));
        assert!(model.add_interface(iface, class).is_err());
    }

    #[test]
    fn test_duplicate_members_rejected() {
        let mut model = TypeModel::new();
        let string = model.lookup("String").unwrap();
        let bean = model.declare_class("Bean").unwrap();
        model.add_constructor(bean, vec![string]).unwrap();
        assert!(model.add_constructor(bean, vec![string]).is_err());
        model.add_field(bean, "name", string).unwrap();
        assert!(model.add_field(bean, "name", string).is_err());
        model.add_method(bean, MethodSpec::new("run")).unwrap();
        assert!(model.add_method(bean, MethodSpec::new("run")).is_err());
        // Overloads are distinct members.
        model
            .add_method(bean, MethodSpec::new("run").with_parameters(vec![string]))
            .unwrap();
    }

    #[test]
    fn test_constructor_only_on_classes() {
        let mut model = TypeModel::new();
        let iface = model.declare_interface("I").unwrap();
        assert!(model.add_constructor(iface, vec![]).is_err());
    }

    #[test]
    fn test_attribute_default_kind_checked() {
        let mut model = TypeModel::new();
        let ann = model.declare_annotation("Retry").unwrap();
        let bad = AttributeDecl::new("retries", AttributeKind::Int).with_default(AttributeValue::Bool(true));
        assert!(matches!(
            model.add_attribute(ann, bad),
            Err(ModelError::DefaultKindMismatch { .. })
        ));
    }

    #[test]
    fn test_describe_elements() {
        let mut model = TypeModel::new();
        let string = model.lookup("String").unwrap();
        let int = model.lookup("int").unwrap();
        let bean = model.declare_class("demo.Bean").unwrap();
        let ctor = model.add_constructor(bean, vec![string, int]).unwrap();
        let field = model.add_field(bean, "name", string).unwrap();
        let method = model.add_method(bean, MethodSpec::new("run")).unwrap();

        assert_eq!(model.describe(bean.into()), "demo.Bean");
        assert_eq!(model.describe(ctor.into()), "demo.Bean(String, int)");
        assert_eq!(model.describe(field.into()), "demo.Bean.name");
        assert_eq!(model.describe(method.into()), "demo.Bean.run()");
    }

    #[test]
    fn test_annotate_foreign_element_rejected() {
        let mut small = TypeModel::new();
        let mut large = TypeModel::new();
        let bean = large.declare_class("Bean").unwrap();
        let method = large.add_method(bean, MethodSpec::new("run")).unwrap();
        let reflective = small.well_known(WellKnownId::Reflective);
        assert_eq!(
            small.annotate(method, Annotation::new(reflective)),
            Err(ModelError::UnknownElement(Element::Method(method)))
        );
    }
}
