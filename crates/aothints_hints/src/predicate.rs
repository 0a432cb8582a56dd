//! Predicates that check whether a [`RuntimeHints`] covers a given runtime access.
//!
//! Mostly useful in tests:
//!
//! ```rust
//! use aothints_hints::{ExecutableMode, HintRegistry, RuntimeHints, RuntimeHintsPredicates, TypeReference};
//!
//! let mut hints = RuntimeHints::new();
//! hints
//!     .reflection_mut()
//!     .register_method(TypeReference::of("demo.Bean"), "run", vec![], ExecutableMode::Invoke);
//!
//! assert!(RuntimeHintsPredicates::reflection().on_method("demo.Bean", "run").invoke().test(&hints));
//! assert!(!RuntimeHintsPredicates::reflection().on_field("demo.Bean", "name").test(&hints));
//! ```

use crate::reflection::{ExecutableMode, MemberCategory, TypeHint};
use crate::runtime::RuntimeHints;
use crate::type_reference::TypeReference;

/// Entry point for building predicates.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeHintsPredicates;

impl RuntimeHintsPredicates {
    pub fn reflection() -> ReflectionHintsPredicates {
        ReflectionHintsPredicates
    }

    pub fn proxies() -> ProxyHintsPredicates {
        ProxyHintsPredicates
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReflectionHintsPredicates;

impl ReflectionHintsPredicates {
    /// Matches when the type is registered at all.
    pub fn on_type(&self, ty: impl Into<TypeReference>) -> TypeHintPredicate {
        TypeHintPredicate {
            ty: ty.into(),
            categories: Vec::new(),
        }
    }

    /// Matches a constructor with exactly these parameter types, introspection by default.
    pub fn on_constructor(&self, ty: impl Into<TypeReference>, parameter_types: Vec<TypeReference>) -> ExecutablePredicate {
        ExecutablePredicate {
            ty: ty.into(),
            target: ExecutableTarget::Constructor(parameter_types),
            mode: ExecutableMode::Introspect,
        }
    }

    /// Matches any method named `name`, introspection by default.
    pub fn on_method(&self, ty: impl Into<TypeReference>, name: impl Into<String>) -> ExecutablePredicate {
        ExecutablePredicate {
            ty: ty.into(),
            target: ExecutableTarget::Method {
                name: name.into(),
                parameter_types: None,
            },
            mode: ExecutableMode::Introspect,
        }
    }

    pub fn on_field(&self, ty: impl Into<TypeReference>, name: impl Into<String>) -> FieldPredicate {
        FieldPredicate {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// See [`ReflectionHintsPredicates::on_type`].
#[derive(Debug, Clone)]
pub struct TypeHintPredicate {
    ty: TypeReference,
    categories: Vec<MemberCategory>,
}

impl TypeHintPredicate {
    /// Also require `category` on the type.
    pub fn with_member_category(mut self, category: MemberCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn test(&self, hints: &RuntimeHints) -> bool {
        hints
            .reflection()
            .get_type_hint(self.ty.name())
            .is_some_and(|hint| self.categories.iter().all(|&c| hint.has_member_category(c)))
    }
}

#[derive(Debug, Clone)]
enum ExecutableTarget {
    Constructor(Vec<TypeReference>),
    Method {
        name: String,
        parameter_types: Option<Vec<TypeReference>>,
    },
}

/// See [`ReflectionHintsPredicates::on_constructor`] and [`ReflectionHintsPredicates::on_method`].
#[derive(Debug, Clone)]
pub struct ExecutablePredicate {
    ty: TypeReference,
    target: ExecutableTarget,
    mode: ExecutableMode,
}

impl ExecutablePredicate {
    pub fn invoke(mut self) -> Self {
        self.mode = ExecutableMode::Invoke;
        self
    }

    pub fn introspect(mut self) -> Self {
        self.mode = ExecutableMode::Introspect;
        self
    }

    /// Narrow a method predicate to one overload. No effect on constructor predicates.
    pub fn with_parameters(mut self, parameter_types: Vec<TypeReference>) -> Self {
        if let ExecutableTarget::Method { parameter_types: params, .. } = &mut self.target {
            *params = Some(parameter_types);
        }
        self
    }

    pub fn test(&self, hints: &RuntimeHints) -> bool {
        let Some(hint) = hints.reflection().get_type_hint(self.ty.name()) else {
            return false;
        };
        self.covered_by_category(hint) || self.covered_by_hint(hint)
    }

    fn covered_by_category(&self, hint: &TypeHint) -> bool {
        let (introspect, invoke) = match self.target {
            ExecutableTarget::Constructor(_) => (
                MemberCategory::IntrospectDeclaredConstructors,
                MemberCategory::InvokeDeclaredConstructors,
            ),
            ExecutableTarget::Method { .. } => (
                MemberCategory::IntrospectDeclaredMethods,
                MemberCategory::InvokeDeclaredMethods,
            ),
        };
        match self.mode {
            ExecutableMode::Introspect => hint.has_member_category(introspect) || hint.has_member_category(invoke),
            ExecutableMode::Invoke => hint.has_member_category(invoke),
        }
    }

    fn covered_by_hint(&self, hint: &TypeHint) -> bool {
        match &self.target {
            ExecutableTarget::Constructor(params) => hint
                .constructor(params)
                .is_some_and(|ctor| ctor.mode().includes(self.mode)),
            ExecutableTarget::Method { name, parameter_types } => hint.methods().any(|method| {
                method.name() == name
                    && parameter_types
                        .as_deref()
                        .is_none_or(|params| method.parameter_types() == params)
                    && method.mode().includes(self.mode)
            }),
        }
    }
}

/// See [`ReflectionHintsPredicates::on_field`].
#[derive(Debug, Clone)]
pub struct FieldPredicate {
    ty: TypeReference,
    name: String,
}

impl FieldPredicate {
    pub fn test(&self, hints: &RuntimeHints) -> bool {
        hints
            .reflection()
            .get_type_hint(self.ty.name())
            .is_some_and(|hint| hint.has_member_category(MemberCategory::DeclaredFields) || hint.field(&self.name).is_some())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProxyHintsPredicates;

impl ProxyHintsPredicates {
    /// Matches a proxy over exactly these interfaces, in this order.
    pub fn for_interfaces<I, T>(&self, interfaces: I) -> ProxyPredicate
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeReference>,
    {
        ProxyPredicate {
            interfaces: interfaces.into_iter().map(Into::into).collect(),
        }
    }
}

/// See [`ProxyHintsPredicates::for_interfaces`].
#[derive(Debug, Clone)]
pub struct ProxyPredicate {
    interfaces: Vec<TypeReference>,
}

impl ProxyPredicate {
    pub fn test(&self, hints: &RuntimeHints) -> bool {
        hints
            .proxies()
            .interface_proxies()
            .any(|proxy| proxy.interfaces() == self.interfaces.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::HintRegistry;

    fn bean() -> TypeReference {
        TypeReference::of("demo.Bean")
    }

    #[test]
    fn test_on_type_with_category() {
        let mut hints = RuntimeHints::new();
        hints
            .reflection_mut()
            .register_type(bean(), [MemberCategory::InvokeDeclaredConstructors]);

        let reflection = RuntimeHintsPredicates::reflection();
        assert!(reflection.on_type("demo.Bean").test(&hints));
        assert!(
            reflection
                .on_type("demo.Bean")
                .with_member_category(MemberCategory::InvokeDeclaredConstructors)
                .test(&hints)
        );
        assert!(
            !reflection
                .on_type("demo.Bean")
                .with_member_category(MemberCategory::DeclaredFields)
                .test(&hints)
        );
        assert!(!reflection.on_type("demo.Other").test(&hints));
    }

    #[test]
    fn test_constructor_category_covers_every_constructor() {
        let mut hints = RuntimeHints::new();
        hints
            .reflection_mut()
            .register_type(bean(), [MemberCategory::InvokeDeclaredConstructors]);
        let predicate = RuntimeHintsPredicates::reflection().on_constructor("demo.Bean", vec![TypeReference::of("String")]);
        assert!(predicate.clone().test(&hints));
        assert!(predicate.invoke().test(&hints));
    }

    #[test]
    fn test_introspection_does_not_grant_invocation() {
        let mut hints = RuntimeHints::new();
        hints
            .reflection_mut()
            .register_method(bean(), "run", vec![], ExecutableMode::Introspect);
        let on_run = RuntimeHintsPredicates::reflection().on_method("demo.Bean", "run");
        assert!(on_run.clone().introspect().test(&hints));
        assert!(!on_run.clone().invoke().test(&hints));
        assert!(!on_run.with_parameters(vec![TypeReference::of("int")]).test(&hints));
    }

    #[test]
    fn test_field_predicate() {
        let mut hints = RuntimeHints::new();
        hints.reflection_mut().register_field(bean(), "name");
        let reflection = RuntimeHintsPredicates::reflection();
        assert!(reflection.on_field("demo.Bean", "name").test(&hints));
        assert!(!reflection.on_field("demo.Bean", "other").test(&hints));
    }

    #[test]
    fn test_proxy_predicate_is_order_sensitive() {
        let mut hints = RuntimeHints::new();
        hints
            .proxies_mut()
            .register_interface_proxy(vec![TypeReference::of("demo.A"), TypeReference::of("demo.B")]);
        let proxies = RuntimeHintsPredicates::proxies();
        assert!(proxies.for_interfaces(["demo.A", "demo.B"]).test(&hints));
        assert!(!proxies.for_interfaces(["demo.B", "demo.A"]).test(&hints));
    }
}
