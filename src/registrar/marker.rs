//! Marker predicate: is an element annotated (directly, by meta-annotation, or through its hierarchy) with
//! `@aot.Reflective`?

use aothints_core::lang::well_known::{VALUE_ATTRIBUTE, WellKnownId};
use aothints_core::{Element, MergedAnnotation, MergedAnnotations, SearchStrategy, TypeModel};

/// The nearest marker in a merged view, if any.
pub fn find_marker<'a>(merged: &'a MergedAnnotations<'_>, model: &TypeModel) -> Option<MergedAnnotation<'a>> {
    merged.get(model.well_known(WellKnownId::Reflective))
}

/// Whether `element` needs an entry.
///
/// ## Notes
/// - The search is hierarchy-aware: a method overriding a marked method is marked, a class whose superclass or
///   interface is marked is marked.
/// - A marker naming no processors at all marks nothing.
pub fn is_reflective(model: &TypeModel, element: Element) -> bool {
    let merged = MergedAnnotations::from(model, element, SearchStrategy::TypeHierarchy);
    find_marker(&merged, model)
        .is_some_and(|marker| matches!(marker.type_array(VALUE_ATTRIBUTE), Ok(processors) if !processors.is_empty()))
}
