//! Type walker: enumerates the marked elements reachable from root types.

use std::iter;

use aothints_core::{Element, TypeId, TypeModel};

use super::marker::is_reflective;

/// Walks root types, their interfaces, and the members visible from each.
#[derive(Debug, Clone, Copy)]
pub struct TypeWalker<'m> {
    model: &'m TypeModel,
}

impl<'m> TypeWalker<'m> {
    pub fn new(model: &'m TypeModel) -> Self {
        Self { model }
    }

    /// Marked elements reachable from `roots`, in discovery order.
    ///
    /// ## Notes
    /// - Each root is processed, then every interface it implements (transitively) is processed as a root of its
    ///   own. Processing a type checks the type, its declared constructors, the fields of its class hierarchy and
    ///   the methods visible from it.
    /// - The same element can be reported more than once when several paths reach it.
    pub fn marked_elements(&self, roots: &[TypeId]) -> Vec<Element> {
        let mut found = Vec::new();
        for &root in roots {
            self.process_type(root, &mut found);
            for iface in self.model.all_interfaces(root) {
                self.process_type(iface, &mut found);
            }
        }
        found
    }

    fn process_type(&self, ty: TypeId, found: &mut Vec<Element>) {
        let model = self.model;
        let candidates = iter::once(Element::Type(ty))
            .chain(model.declared_constructors(ty).iter().copied().map(Element::Constructor))
            .chain(model.hierarchy_fields(ty).into_iter().map(Element::Field))
            .chain(model.hierarchy_methods(ty).into_iter().map(Element::Method));

        for element in candidates.filter(|&element| is_reflective(model, element)) {
            tracing::trace!(element = %model.describe(element), "found marked element");
            found.push(element);
        }
    }
}
