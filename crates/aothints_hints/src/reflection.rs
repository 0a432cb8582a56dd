//! Reflection hints: which types, constructors, methods and fields need reflective access at runtime.

use std::collections::{BTreeMap, BTreeSet};

use crate::type_reference::TypeReference;

/// Name native-image uses for constructors in method lists.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Coarse-grained access to a whole category of members of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberCategory {
    PublicFields,
    DeclaredFields,
    IntrospectPublicConstructors,
    IntrospectDeclaredConstructors,
    InvokePublicConstructors,
    InvokeDeclaredConstructors,
    IntrospectPublicMethods,
    IntrospectDeclaredMethods,
    InvokePublicMethods,
    InvokeDeclaredMethods,
}

impl MemberCategory {
    pub const ALL: [MemberCategory; 10] = [
        MemberCategory::PublicFields,
        MemberCategory::DeclaredFields,
        MemberCategory::IntrospectPublicConstructors,
        MemberCategory::IntrospectDeclaredConstructors,
        MemberCategory::InvokePublicConstructors,
        MemberCategory::InvokeDeclaredConstructors,
        MemberCategory::IntrospectPublicMethods,
        MemberCategory::IntrospectDeclaredMethods,
        MemberCategory::InvokePublicMethods,
        MemberCategory::InvokeDeclaredMethods,
    ];

    /// Flag name in `reflect-config.json`.
    pub fn json_flag(self) -> &'static str {
        match self {
            MemberCategory::PublicFields => "allPublicFields",
            MemberCategory::DeclaredFields => "allDeclaredFields",
            MemberCategory::IntrospectPublicConstructors => "queryAllPublicConstructors",
            MemberCategory::IntrospectDeclaredConstructors => "queryAllDeclaredConstructors",
            MemberCategory::InvokePublicConstructors => "allPublicConstructors",
            MemberCategory::InvokeDeclaredConstructors => "allDeclaredConstructors",
            MemberCategory::IntrospectPublicMethods => "queryAllPublicMethods",
            MemberCategory::IntrospectDeclaredMethods => "queryAllDeclaredMethods",
            MemberCategory::InvokePublicMethods => "allPublicMethods",
            MemberCategory::InvokeDeclaredMethods => "allDeclaredMethods",
        }
    }
}

/// Level of access needed on a constructor or method.
///
/// `Invoke` implies `Introspect`; the derived ordering reflects that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExecutableMode {
    Introspect,
    Invoke,
}

impl ExecutableMode {
    /// Whether access at this level also grants `other`.
    pub fn includes(self, other: ExecutableMode) -> bool {
        self >= other
    }
}

/// Access to one constructor or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableHint {
    name: String,
    parameter_types: Vec<TypeReference>,
    mode: ExecutableMode,
}

impl ExecutableHint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[TypeReference] {
        &self.parameter_types
    }

    pub fn mode(&self) -> ExecutableMode {
        self.mode
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

/// Access to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHint {
    name: String,
}

impl FieldHint {
    pub fn name(&self) -> &str {
        &self.name
    }
}

type MethodKey = (String, Vec<TypeReference>);

/// Everything registered for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    type_reference: TypeReference,
    member_categories: BTreeSet<MemberCategory>,
    constructors: BTreeMap<Vec<TypeReference>, ExecutableHint>,
    methods: BTreeMap<MethodKey, ExecutableHint>,
    fields: BTreeMap<String, FieldHint>,
}

impl TypeHint {
    fn new(type_reference: TypeReference) -> Self {
        Self {
            type_reference,
            member_categories: BTreeSet::new(),
            constructors: BTreeMap::new(),
            methods: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_reference(&self) -> &TypeReference {
        &self.type_reference
    }

    pub fn member_categories(&self) -> impl Iterator<Item = MemberCategory> + '_ {
        self.member_categories.iter().copied()
    }

    pub fn has_member_category(&self, category: MemberCategory) -> bool {
        self.member_categories.contains(&category)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ExecutableHint> {
        self.constructors.values()
    }

    pub fn methods(&self) -> impl Iterator<Item = &ExecutableHint> {
        self.methods.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldHint> {
        self.fields.values()
    }

    pub fn constructor(&self, parameter_types: &[TypeReference]) -> Option<&ExecutableHint> {
        self.constructors.get(parameter_types)
    }

    pub fn method(&self, name: &str, parameter_types: &[TypeReference]) -> Option<&ExecutableHint> {
        self.methods.get(&(name.to_string(), parameter_types.to_vec()))
    }

    pub fn field(&self, name: &str) -> Option<&FieldHint> {
        self.fields.get(name)
    }

    fn merge_executable(
        slot: Option<&mut ExecutableHint>,
        name: &str,
        parameter_types: &[TypeReference],
        mode: ExecutableMode,
    ) -> Option<ExecutableHint> {
        match slot {
            Some(existing) => {
                existing.mode = existing.mode.max(mode);
                None
            }
            None => Some(ExecutableHint {
                name: name.to_string(),
                parameter_types: parameter_types.to_vec(),
                mode,
            }),
        }
    }
}

/// Reflection hints for all types, ordered by type name.
///
/// ## Notes
/// - Every registration is idempotent. Registering the same executable twice keeps the stronger
///   [`ExecutableMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionHints {
    types: BTreeMap<TypeReference, TypeHint>,
}

impl ReflectionHints {
    pub fn new() -> Self {
        Self::default()
    }

    fn type_hint_mut(&mut self, ty: TypeReference) -> &mut TypeHint {
        self.types
            .entry(ty)
            .or_insert_with_key(|ty| TypeHint::new(ty.clone()))
    }

    /// Register a type, with optional member categories.
    pub fn register_type(
        &mut self,
        ty: TypeReference,
        categories: impl IntoIterator<Item = MemberCategory>,
    ) -> &mut Self {
        let hint = self.type_hint_mut(ty);
        hint.member_categories.extend(categories);
        self
    }

    pub fn register_constructor(
        &mut self,
        ty: TypeReference,
        parameter_types: Vec<TypeReference>,
        mode: ExecutableMode,
    ) -> &mut Self {
        let hint = self.type_hint_mut(ty);
        let created = TypeHint::merge_executable(
            hint.constructors.get_mut(&parameter_types),
            CONSTRUCTOR_NAME,
            &parameter_types,
            mode,
        );
        if let Some(created) = created {
            hint.constructors.insert(parameter_types, created);
        }
        self
    }

    pub fn register_method(
        &mut self,
        ty: TypeReference,
        name: impl Into<String>,
        parameter_types: Vec<TypeReference>,
        mode: ExecutableMode,
    ) -> &mut Self {
        let hint = self.type_hint_mut(ty);
        let key = (name.into(), parameter_types);
        let created = TypeHint::merge_executable(hint.methods.get_mut(&key), &key.0, &key.1, mode);
        if let Some(created) = created {
            hint.methods.insert(key, created);
        }
        self
    }

    pub fn register_field(&mut self, ty: TypeReference, name: impl Into<String>) -> &mut Self {
        let hint = self.type_hint_mut(ty);
        let name = name.into();
        hint.fields
            .entry(name)
            .or_insert_with_key(|name| FieldHint { name: name.clone() });
        self
    }

    pub fn get_type_hint(&self, ty: &str) -> Option<&TypeHint> {
        self.types.get(ty)
    }

    pub fn type_hints(&self) -> impl Iterator<Item = &TypeHint> {
        self.types.values()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
