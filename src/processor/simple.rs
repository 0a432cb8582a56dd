//! The default processor.

use aothints_core::{Element, TypeModel};
use aothints_hints::ReflectionHints;

use super::support::ModelReflectionHints;
use super::{ProcessorError, ReflectiveProcessor};

/// Registers plain reflective access for whatever element it is given:
///
/// - a type: the type, with invocation of its declared constructors,
/// - a constructor or method: invocation,
/// - a field: field access.
///
/// This is what `@aot.Reflective` uses when no processor is named.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleReflectiveProcessor;

impl ReflectiveProcessor for SimpleReflectiveProcessor {
    fn register_reflection_hints(
        &self,
        hints: &mut ReflectionHints,
        model: &TypeModel,
        element: Element,
    ) -> Result<(), ProcessorError> {
        match element {
            Element::Type(ty) => hints.register_type_with_constructor_access(model, ty),
            Element::Constructor(ctor) => hints.register_constructor_invocation(model, ctor),
            Element::Field(field) => hints.register_field_access(model, field),
            Element::Method(method) => hints.register_method_invocation(model, method),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aothints_core::MethodSpec;
    use aothints_hints::{ExecutableMode, MemberCategory};

    #[test]
    fn test_type_gets_constructor_access() {
        let mut model = TypeModel::new();
        let bean = model.declare_class("demo.Bean").unwrap();
        let mut hints = ReflectionHints::new();
        SimpleReflectiveProcessor
            .register_reflection_hints(&mut hints, &model, bean.into())
            .unwrap();
        let hint = hints.get_type_hint("demo.Bean").unwrap();
        assert!(hint.has_member_category(MemberCategory::InvokeDeclaredConstructors));
    }

    #[test]
    fn test_members_land_on_declaring_type() {
        let mut model = TypeModel::new();
        let string = model.lookup("String").unwrap();
        let bean = model.declare_class("demo.Bean").unwrap();
        let ctor = model.add_constructor(bean, vec![string]).unwrap();
        let field = model.add_field(bean, "name", string).unwrap();
        let method = model
            .add_method(bean, MethodSpec::new("rename").with_parameters(vec![string]))
            .unwrap();

        let mut hints = ReflectionHints::new();
        for element in [Element::from(ctor), field.into(), method.into()] {
            SimpleReflectiveProcessor
                .register_reflection_hints(&mut hints, &model, element)
                .unwrap();
        }

        let hint = hints.get_type_hint("demo.Bean").unwrap();
        let string_ref = aothints_hints::TypeReference::of("String");
        assert_eq!(
            hint.constructor(std::slice::from_ref(&string_ref)).unwrap().mode(),
            ExecutableMode::Invoke
        );
        assert!(hint.field("name").is_some());
        assert_eq!(
            hint.method("rename", &[string_ref]).unwrap().mode(),
            ExecutableMode::Invoke
        );
        assert_eq!(hint.member_categories().count(), 0);
    }
}
