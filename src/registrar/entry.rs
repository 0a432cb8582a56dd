//! Entries: an element paired with the processor that handles it.

use std::collections::HashSet;
use std::rc::Rc;

use aothints_core::lang::well_known::VALUE_ATTRIBUTE;
use aothints_core::{Element, MergedAnnotations, SearchStrategy, TypeModel};

use super::errors::RegistrarError;
use super::marker::find_marker;
use crate::processor::{EffectiveProcessor, ProcessorRegistry};

/// Identity of an entry: the element and its processor keys, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    element: Element,
    processors: Vec<Rc<str>>,
}

impl EntryKey {
    pub fn element(&self) -> Element {
        self.element
    }

    pub fn processors(&self) -> impl Iterator<Item = &str> {
        self.processors.iter().map(|key| &**key)
    }
}

/// A marked element and its effective processor.
#[derive(Debug, Clone)]
pub struct Entry {
    element: Element,
    processor: EffectiveProcessor,
}

impl Entry {
    pub fn element(&self) -> Element {
        self.element
    }

    pub fn processor(&self) -> &EffectiveProcessor {
        &self.processor
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            element: self.element,
            processors: self.processor.keys(),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element && self.processor == other.processor
    }
}

impl Eq for Entry {}

/// Builds entries, resolving processors through a shared registry.
#[derive(Debug)]
pub struct EntryBuilder<'r> {
    registry: &'r mut ProcessorRegistry,
}

impl<'r> EntryBuilder<'r> {
    pub fn new(registry: &'r mut ProcessorRegistry) -> Self {
        Self { registry }
    }

    /// Build the entry for a marked element.
    ///
    /// ## Notes
    /// - Processor references keep their declared order; repeated references collapse to the first.
    /// - One processor is used directly; several are wrapped in a delegating processor.
    ///
    /// ## Errors
    /// - [`RegistrarError::Invariant`] if `element` is not marked or names no processor.
    /// - Any processor resolution error.
    pub fn build(&mut self, model: &TypeModel, element: Element) -> Result<Entry, RegistrarError> {
        let merged = MergedAnnotations::from(model, element, SearchStrategy::TypeHierarchy);
        let marker = find_marker(&merged, model).ok_or_else(|| {
            RegistrarError::Invariant(format!("{} reached entry building without a marker", model.describe(element)))
        })?;
        let references = marker
            .type_array(VALUE_ATTRIBUTE)
            .map_err(|source| RegistrarError::Marker {
                element: model.describe(element),
                source,
            })?;

        let mut seen = HashSet::new();
        let mut handles = Vec::with_capacity(references.len());
        for reference in references {
            if seen.insert(reference) {
                handles.push(self.registry.resolve(model.type_name(reference))?);
            }
        }

        let processor = EffectiveProcessor::from_resolved(handles).ok_or_else(|| {
            RegistrarError::Invariant(format!("{} is marked without any processor", model.describe(element)))
        })?;
        Ok(Entry { element, processor })
    }
}
