//! Hints for accessing annotations themselves at runtime.
//!
//! An annotation whose effective attribute values differ from what is declared on it (because of aliases) is
//! exposed at runtime through a synthesized proxy. Such annotations need an interface proxy hint pairing the
//! annotation type with `aot.SynthesizedAnnotation`, and their attribute methods must be invocable.

use aothints_core::lang::well_known::WellKnownId;
use aothints_core::{MergedAnnotation, TypeId, TypeModel};
use aothints_hints::{HintRegistry, MemberCategory};

use crate::processor::{ModelReflectionHints, type_reference};

/// Register hints for `annotation` if it is synthesizable; does nothing otherwise.
pub fn register_annotation_if_necessary<H: HintRegistry + ?Sized>(
    hints: &mut H,
    model: &TypeModel,
    annotation: &MergedAnnotation<'_>,
) {
    if annotation.is_synthesizable() {
        tracing::debug!(
            annotation = model.type_name(annotation.annotation_type()),
            "registering synthesized annotation"
        );
        register_synthesized_annotation(hints, model, annotation.annotation_type());
    }
}

/// Register the proxy and reflection hints a synthesized `annotation_type` needs.
pub fn register_synthesized_annotation<H: HintRegistry + ?Sized>(hints: &mut H, model: &TypeModel, annotation_type: TypeId) {
    register_annotation(hints, model, annotation_type);
    hints.proxies_mut().register_interface_proxy(vec![
        type_reference(model, annotation_type),
        type_reference(model, model.well_known(WellKnownId::SynthesizedAnnotation)),
    ]);
}

/// Make the attribute methods of `annotation_type` invocable.
pub fn register_annotation<H: HintRegistry + ?Sized>(hints: &mut H, model: &TypeModel, annotation_type: TypeId) {
    hints
        .reflection_mut()
        .register_model_type(model, annotation_type, [MemberCategory::InvokeDeclaredMethods]);
}
