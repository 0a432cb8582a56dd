//! Hint emission for collected entries.

use aothints_core::lang::well_known::WellKnownId;
use aothints_core::{Element, MergedAnnotations, SearchStrategy, TypeModel};
use aothints_hints::HintRegistry;

use super::collector::EntrySet;
use super::errors::RegistrarError;
use crate::annotation_hints;

/// Apply each entry's processor, then register hints for a meta-annotation carrying the marker if it needs
/// a synthesized proxy.
pub(crate) fn emit<H: HintRegistry + ?Sized>(
    entries: &EntrySet,
    hints: &mut H,
    model: &TypeModel,
) -> Result<(), RegistrarError> {
    for entry in entries {
        let element = entry.element();
        entry
            .processor()
            .register(hints.reflection_mut(), model, element)
            .map_err(|source| RegistrarError::Processor {
                processor: entry.processor().display_key(),
                element: model.describe(element),
                source,
            })?;
        register_meta_source_if_necessary(hints, model, element);
    }
    Ok(())
}

/// Only a marker declared on the element itself is considered, not one inherited through its hierarchy.
fn register_meta_source_if_necessary<H: HintRegistry + ?Sized>(hints: &mut H, model: &TypeModel, element: Element) {
    let merged = MergedAnnotations::from(model, element, SearchStrategy::Direct);
    let meta_source = merged
        .get(model.well_known(WellKnownId::Reflective))
        .and_then(|marker| marker.meta_source());
    if let Some(meta_source) = meta_source {
        annotation_hints::register_annotation_if_necessary(hints, model, &meta_source);
    }
}
