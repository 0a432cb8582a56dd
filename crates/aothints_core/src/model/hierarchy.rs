//! Reflection utilities over the class and interface hierarchy.
//!
//! These walks are what discovery uses to reach inherited members and to search annotations along a type
//! hierarchy. Hierarchies are acyclic by construction ([`TypeModel::set_superclass`] and
//! [`TypeModel::add_interface`] reject cycles), but every walk still tracks visited types. Walks use explicit
//! stacks, so hierarchy depth is bounded by memory rather than by the call stack.

use std::collections::HashSet;

use super::{ConstructorId, FieldId, MethodId, TypeId, TypeModel};

/// Iterator over a type followed by its superclasses.
#[derive(Debug, Clone)]
pub struct SuperclassChain<'m> {
    model: &'m TypeModel,
    next: Option<TypeId>,
}

impl Iterator for SuperclassChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next?;
        self.next = self.model.type_decl(current).superclass;
        Some(current)
    }
}

impl TypeModel {
    /// The type itself, then each superclass up to the root.
    pub fn superclass_chain(&self, ty: TypeId) -> SuperclassChain<'_> {
        SuperclassChain {
            model: self,
            next: Some(ty),
        }
    }

    /// Every interface `ty` implements, directly or through superclasses and superinterfaces.
    ///
    /// ## Returns
    /// - Interfaces in declaration order (depth-first), deduplicated, never including `ty` itself.
    pub fn all_interfaces(&self, ty: TypeId) -> Vec<TypeId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack = Vec::new();
        for current in self.superclass_chain(ty) {
            stack.extend(self.type_decl(current).interfaces.iter().rev().copied());
            while let Some(iface) = stack.pop() {
                if iface == ty || !seen.insert(iface) {
                    continue;
                }
                out.push(iface);
                stack.extend(self.type_decl(iface).interfaces.iter().rev().copied());
            }
        }
        out
    }

    /// Constructors declared by `ty` itself (constructors are never inherited).
    pub fn declared_constructors(&self, ty: TypeId) -> &[ConstructorId] {
        &self.type_decl(ty).constructors
    }

    /// Fields declared by `ty` and by every superclass.
    pub fn hierarchy_fields(&self, ty: TypeId) -> Vec<FieldId> {
        self.superclass_chain(ty)
            .flat_map(|t| self.type_decl(t).fields.iter().copied())
            .collect()
    }

    /// Methods visible from `ty`.
    ///
    /// ## Notes
    /// - For a class: its declared methods and the default (non-abstract) methods of the interfaces it implements,
    ///   then the same for each superclass.
    /// - For an interface: its declared methods, then those of each superinterface.
    /// - Overridden methods are kept: a subclass override and the method it overrides are distinct elements.
    pub fn hierarchy_methods(&self, ty: TypeId) -> Vec<MethodId> {
        let mut visited = HashSet::new();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![ty];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let decl = self.type_decl(current);
            out.extend(decl.methods.iter().copied().filter(|m| seen.insert(*m)));

            if decl.kind.is_interface_like() {
                stack.extend(decl.interfaces.iter().rev().copied());
                continue;
            }

            for &iface in &decl.interfaces {
                let closure = std::iter::once(iface).chain(self.all_interfaces(iface));
                for candidate in closure {
                    let defaults = self
                        .type_decl(candidate)
                        .methods
                        .iter()
                        .copied()
                        .filter(|&m| !self.method(m).is_abstract);
                    out.extend(defaults.filter(|m| seen.insert(*m)));
                }
            }
            stack.extend(decl.superclass);
        }
        out
    }

    /// Search order for hierarchy-aware annotation lookup on types.
    ///
    /// ## Returns
    /// - `ty`, then its interfaces (each followed by its superinterfaces), then its superclass with the same
    ///   treatment, and so on. Deduplicated, nearest first.
    pub fn type_hierarchy(&self, ty: TypeId) -> Vec<TypeId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![ty];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current);
            let decl = self.type_decl(current);
            // Pushed in reverse: interfaces are searched before the superclass.
            stack.extend(decl.superclass);
            stack.extend(decl.interfaces.iter().rev().copied());
        }
        out
    }

    /// Methods that `method` overrides or implements, nearest first.
    ///
    /// A candidate matches when it has the same name and the same parameter types and is declared somewhere in
    /// the hierarchy of the declaring type.
    pub fn overridden_methods(&self, method: MethodId) -> Vec<MethodId> {
        let target = self.method(method);
        self.type_hierarchy(target.declaring_type)
            .into_iter()
            .skip(1)
            .flat_map(|ty| self.type_decl(ty).methods.iter().copied())
            .filter(|&candidate| {
                let decl = self.method(candidate);
                decl.name == target.name && decl.parameter_types == target.parameter_types
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MethodSpec;

    struct Fixture {
        model: TypeModel,
        base_iface: TypeId,
        iface: TypeId,
        other_iface: TypeId,
        parent: TypeId,
        child: TypeId,
    }

    /// `Child extends Parent implements Iface`, `Parent implements OtherIface`, `Iface extends BaseIface`.
    fn fixture() -> Fixture {
        let mut model = TypeModel::new();
        let base_iface = model.declare_interface("BaseIface").unwrap();
        let iface = model.declare_interface("Iface").unwrap();
        let other_iface = model.declare_interface("OtherIface").unwrap();
        let parent = model.declare_class("Parent").unwrap();
        let child = model.declare_class("Child").unwrap();
        model.add_interface(iface, base_iface).unwrap();
        model.add_interface(parent, other_iface).unwrap();
        model.set_superclass(child, parent).unwrap();
        model.add_interface(child, iface).unwrap();
        Fixture {
            model,
            base_iface,
            iface,
            other_iface,
            parent,
            child,
        }
    }

    #[test]
    fn test_superclass_chain_reaches_object() {
        let f = fixture();
        let chain: Vec<&str> = f.model.superclass_chain(f.child).map(|t| f.model.type_name(t)).collect();
        assert_eq!(chain, vec!["Child", "Parent", "Object"]);
    }

    #[test]
    fn test_all_interfaces_transitive() {
        let f = fixture();
        assert_eq!(
            f.model.all_interfaces(f.child),
            vec![f.iface, f.base_iface, f.other_iface]
        );
        assert_eq!(f.model.all_interfaces(f.iface), vec![f.base_iface]);
        assert!(f.model.all_interfaces(f.base_iface).is_empty());
    }

    #[test]
    fn test_all_interfaces_deduplicated() {
        let mut f = fixture();
        // Redundantly re-list an inherited interface on the child.
        f.model.add_interface(f.child, f.other_iface).unwrap();
        let all = f.model.all_interfaces(f.child);
        assert_eq!(all.iter().filter(|&&i| i == f.other_iface).count(), 1);
    }

    #[test]
    fn test_type_hierarchy_order() {
        let f = fixture();
        let names: Vec<&str> = f
            .model
            .type_hierarchy(f.child)
            .into_iter()
            .map(|t| f.model.type_name(t))
            .collect();
        assert_eq!(
            names,
            vec!["Child", "Iface", "BaseIface", "Parent", "OtherIface", "Object"]
        );
    }

    #[test]
    fn test_hierarchy_fields_include_superclass() {
        let mut f = fixture();
        let string = f.model.lookup("String").unwrap();
        let own = f.model.add_field(f.child, "own", string).unwrap();
        let inherited = f.model.add_field(f.parent, "inherited", string).unwrap();
        assert_eq!(f.model.hierarchy_fields(f.child), vec![own, inherited]);
        assert_eq!(f.model.hierarchy_fields(f.parent), vec![inherited]);
    }

    #[test]
    fn test_hierarchy_methods_include_defaults_not_abstracts() {
        let mut f = fixture();
        let abstract_m = f
            .model
            .add_method(f.iface, MethodSpec::new("run").abstract_method())
            .unwrap();
        let default_m = f.model.add_method(f.base_iface, MethodSpec::new("describe")).unwrap();
        let child_run = f.model.add_method(f.child, MethodSpec::new("run")).unwrap();
        let parent_run = f.model.add_method(f.parent, MethodSpec::new("run")).unwrap();

        let methods = f.model.hierarchy_methods(f.child);
        assert_eq!(methods, vec![child_run, default_m, parent_run]);
        assert!(!methods.contains(&abstract_m));

        // Interfaces see all their own and inherited declarations.
        assert_eq!(f.model.hierarchy_methods(f.iface), vec![abstract_m, default_m]);
    }

    #[test]
    fn test_overridden_methods_nearest_first() {
        let mut f = fixture();
        let string = f.model.lookup("String").unwrap();
        let iface_run = f
            .model
            .add_method(f.iface, MethodSpec::new("run").abstract_method())
            .unwrap();
        let parent_run = f.model.add_method(f.parent, MethodSpec::new("run")).unwrap();
        let child_run = f.model.add_method(f.child, MethodSpec::new("run")).unwrap();
        // Overload with a different signature is not an override.
        f.model
            .add_method(f.parent, MethodSpec::new("run").with_parameters(vec![string]))
            .unwrap();

        assert_eq!(f.model.overridden_methods(child_run), vec![iface_run, parent_run]);
        assert!(f.model.overridden_methods(iface_run).is_empty());
    }

    #[test]
    fn test_deep_superclass_chain() {
        const DEPTH: usize = 20_000;
        let mut model = TypeModel::new();
        let base_iface = model.declare_interface("Base").unwrap();
        let inherited = model.add_method(base_iface, MethodSpec::new("describe")).unwrap();
        let mut parent = model.declare_class("C0").unwrap();
        model.add_interface(parent, base_iface).unwrap();
        for depth in 1..DEPTH {
            let class = model.declare_class(format!("C{depth}")).unwrap();
            model.set_superclass(class, parent).unwrap();
            parent = class;
        }

        let hierarchy = model.type_hierarchy(parent);
        assert_eq!(hierarchy.len(), DEPTH + 2);
        assert_eq!(hierarchy[DEPTH], base_iface);
        assert_eq!(model.hierarchy_methods(parent), vec![inherited]);
        assert_eq!(model.all_interfaces(parent), vec![base_iface]);
    }
}
