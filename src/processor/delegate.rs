//! Composition of several processors applying to one element.

use std::rc::Rc;

use aothints_core::{Element, TypeModel};
use aothints_hints::ReflectionHints;

use super::{ProcessorError, ProcessorHandle, ReflectiveProcessor};

/// Applies an ordered, non-empty list of processors one after another.
///
/// There is no error isolation: the first failing delegate aborts the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatingProcessor {
    delegates: Vec<ProcessorHandle>,
}

impl DelegatingProcessor {
    /// `None` when `delegates` is empty.
    pub fn new(delegates: Vec<ProcessorHandle>) -> Option<Self> {
        (!delegates.is_empty()).then_some(Self { delegates })
    }

    pub fn delegates(&self) -> &[ProcessorHandle] {
        &self.delegates
    }
}

impl ReflectiveProcessor for DelegatingProcessor {
    fn register_reflection_hints(
        &self,
        hints: &mut ReflectionHints,
        model: &TypeModel,
        element: Element,
    ) -> Result<(), ProcessorError> {
        for delegate in &self.delegates {
            delegate.processor().register_reflection_hints(hints, model, element)?;
        }
        Ok(())
    }
}

/// The processor an entry applies: one processor directly, or several through a [`DelegatingProcessor`].
///
/// Equality is by processor keys, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectiveProcessor {
    Single(ProcessorHandle),
    Delegating(DelegatingProcessor),
}

impl EffectiveProcessor {
    /// Pick the representation for a list of distinct resolved processors.
    ///
    /// ## Returns
    /// - `None` for an empty list, `Single` for one processor, `Delegating` otherwise.
    pub fn from_resolved(mut handles: Vec<ProcessorHandle>) -> Option<Self> {
        match handles.len() {
            0 => None,
            1 => handles.pop().map(EffectiveProcessor::Single),
            _ => DelegatingProcessor::new(handles).map(EffectiveProcessor::Delegating),
        }
    }

    pub fn handles(&self) -> &[ProcessorHandle] {
        match self {
            EffectiveProcessor::Single(handle) => std::slice::from_ref(handle),
            EffectiveProcessor::Delegating(delegating) => delegating.delegates(),
        }
    }

    pub(crate) fn keys(&self) -> Vec<Rc<str>> {
        self.handles().iter().map(ProcessorHandle::shared_key).collect()
    }

    /// `aot.SimpleReflectiveProcessor`, or `delegating[a, b]` for several processors.
    pub fn display_key(&self) -> String {
        match self {
            EffectiveProcessor::Single(handle) => handle.key().to_string(),
            EffectiveProcessor::Delegating(delegating) => {
                let keys: Vec<&str> = delegating.delegates().iter().map(ProcessorHandle::key).collect();
                format!("delegating[{}]", keys.join(", "))
            }
        }
    }

    pub fn register(&self, hints: &mut ReflectionHints, model: &TypeModel, element: Element) -> Result<(), ProcessorError> {
        match self {
            EffectiveProcessor::Single(handle) => handle.processor().register_reflection_hints(hints, model, element),
            EffectiveProcessor::Delegating(delegating) => delegating.register_reflection_hints(hints, model, element),
        }
    }
}
