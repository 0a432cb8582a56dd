//! Reflective processors: the strategies that turn a marked element into reflection hints.
//!
//! A processor is referenced from the marker annotation by type (`@aot.Reflective(MyProcessor)`), instantiated
//! once per registrar through a [`ProcessorCatalog`], and invoked once per discovered element.
//!
//! ## Modules
//!
//! - `simple` - the default processor
//! - `delegate` - composition of several processors for one element
//! - `registry` - processor construction and instance caching
//! - `support` - helpers for registering hints for model elements

use std::fmt;
use std::rc::Rc;

use aothints_core::{Element, TypeModel};
use aothints_hints::ReflectionHints;
use thiserror::Error;

pub mod delegate;
pub mod registry;
pub mod simple;
pub mod support;

pub use delegate::{DelegatingProcessor, EffectiveProcessor};
pub use registry::{ProcessorCatalog, ProcessorFactory, ProcessorRegistry};
pub use simple::SimpleReflectiveProcessor;
pub use support::{ModelReflectionHints, type_reference};

/// Error raised by a processor, or while constructing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    #[error("cannot instantiate processor: {0}")]
    Instantiation(String),

    #[error("{processor} cannot handle {element}")]
    Unsupported { processor: String, element: String },

    #[error("{0}")]
    Failed(String),
}

/// Registers the reflection hints an element needs.
///
/// Implementations are stateless from the caller's point of view: one instance serves every element that names
/// it, for the lifetime of a registrar.
pub trait ReflectiveProcessor: fmt::Debug {
    fn register_reflection_hints(
        &self,
        hints: &mut ReflectionHints,
        model: &TypeModel,
        element: Element,
    ) -> Result<(), ProcessorError>;
}

/// A cached processor instance together with the key it was resolved from.
///
/// Two handles are the same processor exactly when their keys are equal; the registry guarantees one instance
/// per key.
#[derive(Debug, Clone)]
pub struct ProcessorHandle {
    key: Rc<str>,
    processor: Rc<dyn ReflectiveProcessor>,
}

impl ProcessorHandle {
    pub fn new(key: impl Into<Rc<str>>, processor: Rc<dyn ReflectiveProcessor>) -> Self {
        Self {
            key: key.into(),
            processor,
        }
    }

    /// Qualified name of the processor type.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn shared_key(&self) -> Rc<str> {
        Rc::clone(&self.key)
    }

    pub fn processor(&self) -> &dyn ReflectiveProcessor {
        self.processor.as_ref()
    }

    /// Whether both handles share one processor instance.
    pub fn same_instance(&self, other: &ProcessorHandle) -> bool {
        Rc::ptr_eq(&self.processor, &other.processor)
    }
}

impl PartialEq for ProcessorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ProcessorHandle {}
