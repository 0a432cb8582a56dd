//! Bridges model elements to name-based reflection hints.
//!
//! Custom processors use [`ModelReflectionHints`] to register hints for constructors, fields and methods without
//! spelling out type references by hand.

use aothints_core::{ConstructorId, FieldId, MethodId, TypeId, TypeModel};
use aothints_hints::{ExecutableMode, MemberCategory, ReflectionHints, TypeReference};

/// Reference to a model type by its qualified name.
pub fn type_reference(model: &TypeModel, ty: TypeId) -> TypeReference {
    TypeReference::of(model.type_name(ty))
}

fn type_references(model: &TypeModel, types: &[TypeId]) -> Vec<TypeReference> {
    types.iter().map(|&ty| type_reference(model, ty)).collect()
}

/// Registration helpers taking model ids instead of type references.
///
/// Member hints are always recorded on the member's declaring type.
pub trait ModelReflectionHints {
    fn register_model_type(
        &mut self,
        model: &TypeModel,
        ty: TypeId,
        categories: impl IntoIterator<Item = MemberCategory>,
    ) -> &mut Self;

    /// Register `ty` so that its declared constructors can be invoked reflectively.
    fn register_type_with_constructor_access(&mut self, model: &TypeModel, ty: TypeId) -> &mut Self {
        self.register_model_type(model, ty, [MemberCategory::InvokeDeclaredConstructors])
    }

    fn register_constructor_invocation(&mut self, model: &TypeModel, ctor: ConstructorId) -> &mut Self;

    fn register_field_access(&mut self, model: &TypeModel, field: FieldId) -> &mut Self;

    fn register_method_invocation(&mut self, model: &TypeModel, method: MethodId) -> &mut Self;
}

impl ModelReflectionHints for ReflectionHints {
    fn register_model_type(
        &mut self,
        model: &TypeModel,
        ty: TypeId,
        categories: impl IntoIterator<Item = MemberCategory>,
    ) -> &mut Self {
        self.register_type(type_reference(model, ty), categories)
    }

    fn register_constructor_invocation(&mut self, model: &TypeModel, ctor: ConstructorId) -> &mut Self {
        let decl = model.constructor(ctor);
        self.register_constructor(
            type_reference(model, decl.declaring_type),
            type_references(model, &decl.parameter_types),
            ExecutableMode::Invoke,
        )
    }

    fn register_field_access(&mut self, model: &TypeModel, field: FieldId) -> &mut Self {
        let decl = model.field(field);
        self.register_field(type_reference(model, decl.declaring_type), decl.name.as_str())
    }

    fn register_method_invocation(&mut self, model: &TypeModel, method: MethodId) -> &mut Self {
        let decl = model.method(method);
        self.register_method(
            type_reference(model, decl.declaring_type),
            decl.name.as_str(),
            type_references(model, &decl.parameter_types),
            ExecutableMode::Invoke,
        )
    }
}
