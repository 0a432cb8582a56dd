//! Processor construction and per-registrar instance caching.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use aothints_core::lang::well_known::{self, WellKnownId};

use super::{ProcessorError, ProcessorHandle, ReflectiveProcessor, SimpleReflectiveProcessor};
use crate::registrar::RegistrarError;

/// Zero-argument constructor of a processor.
pub type ProcessorFactory = Box<dyn Fn() -> Result<Box<dyn ReflectiveProcessor>, ProcessorError>>;

/// Known processor types, keyed by the qualified name annotations refer to them by.
pub struct ProcessorCatalog {
    factories: BTreeMap<String, ProcessorFactory>,
}

impl fmt::Debug for ProcessorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorCatalog")
            .field("keys", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ProcessorCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ProcessorCatalog {
    /// A catalog with no processors at all.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A catalog knowing the built-in [`SimpleReflectiveProcessor`].
    pub fn with_defaults() -> Self {
        Self::new().with(well_known::as_str(WellKnownId::SimpleReflectiveProcessor), || {
            Ok(Box::new(SimpleReflectiveProcessor))
        })
    }

    /// Register (or replace) the factory for `key`.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ReflectiveProcessor>, ProcessorError> + 'static,
    {
        self.factories.insert(key.into(), Box::new(factory));
    }

    pub fn with<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn ReflectiveProcessor>, ProcessorError> + 'static,
    {
        self.register(key, factory);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    fn instantiate(&self, key: &str) -> Option<Result<Box<dyn ReflectiveProcessor>, ProcessorError>> {
        self.factories.get(key).map(|factory| factory())
    }
}

/// Resolves processor keys to live instances, constructing each at most once.
#[derive(Debug)]
pub struct ProcessorRegistry {
    catalog: ProcessorCatalog,
    instances: HashMap<Rc<str>, ProcessorHandle>,
}

impl ProcessorRegistry {
    pub fn new(catalog: ProcessorCatalog) -> Self {
        Self {
            catalog,
            instances: HashMap::new(),
        }
    }

    /// The cached instance for `key`, constructing it on first use.
    ///
    /// ## Errors
    /// - [`RegistrarError::UnknownProcessor`] if the catalog has no factory for `key`.
    /// - [`RegistrarError::ProcessorInstantiation`] if the factory fails. Failures are not cached.
    pub fn resolve(&mut self, key: &str) -> Result<ProcessorHandle, RegistrarError> {
        if let Some(handle) = self.instances.get(key) {
            return Ok(handle.clone());
        }

        let processor = match self.catalog.instantiate(key) {
            None => {
                return Err(RegistrarError::UnknownProcessor {
                    processor: key.to_string(),
                });
            }
            Some(Err(source)) => {
                return Err(RegistrarError::ProcessorInstantiation {
                    processor: key.to_string(),
                    source,
                });
            }
            Some(Ok(processor)) => Rc::<dyn ReflectiveProcessor>::from(processor),
        };

        tracing::debug!(processor = key, "instantiated reflective processor");
        let handle = ProcessorHandle::new(key, processor);
        self.instances.insert(handle.shared_key(), handle.clone());
        Ok(handle)
    }

    /// Number of processors instantiated so far.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn catalog(&self) -> &ProcessorCatalog {
        &self.catalog
    }
}
