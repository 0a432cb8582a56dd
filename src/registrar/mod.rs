//! Discovery of reflectively accessed elements and registration of their hints.
//!
//! Elements opt in by carrying `@aot.Reflective`, directly, through a meta-annotation, or through the type or
//! method hierarchy. Each marked element names the processors that know which hints it needs.
//!
//! ## Pipeline
//!
//! 1. [`TypeWalker`] enumerates the marked elements reachable from the root types.
//! 2. [`EntryBuilder`] pairs each element with its effective processor, resolved through the registrar's
//!    [`ProcessorRegistry`].
//! 3. [`EntrySet`] drops entries already seen through another path.
//! 4. Each remaining entry's processor writes into the hint registry; meta-annotations that need a synthesized
//!    proxy get hints of their own.

use aothints_core::{TypeId, TypeModel};
use aothints_hints::HintRegistry;

mod collector;
mod emit;
mod entry;
mod errors;
mod marker;
mod walker;

pub use collector::EntrySet;
pub use entry::{Entry, EntryBuilder, EntryKey};
pub use errors::RegistrarError;
pub use marker::{find_marker, is_reflective};
pub use walker::TypeWalker;

use crate::processor::{ProcessorCatalog, ProcessorRegistry};

/// Registers reflection hints for every element marked with `@aot.Reflective`.
///
/// Processor instances are cached for the registrar's lifetime, so reusing one registrar across runs reuses
/// them too. Not meant to be shared between threads.
#[derive(Debug)]
pub struct ReflectiveRuntimeHintsRegistrar {
    processors: ProcessorRegistry,
}

impl Default for ReflectiveRuntimeHintsRegistrar {
    fn default() -> Self {
        Self::new(ProcessorCatalog::with_defaults())
    }
}

impl ReflectiveRuntimeHintsRegistrar {
    pub fn new(catalog: ProcessorCatalog) -> Self {
        Self {
            processors: ProcessorRegistry::new(catalog),
        }
    }

    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    /// Register hints for `types` and everything reachable from them into `hints`.
    ///
    /// ## Notes
    /// - When nothing reachable is marked, `hints` is not touched at all.
    ///
    /// ## Errors
    /// - Any [`RegistrarError`]; the run stops at the first one and `hints` may hold partial results.
    #[tracing::instrument(skip_all, fields(types = types.len()))]
    pub fn register_runtime_hints<H: HintRegistry + ?Sized>(
        &mut self,
        hints: &mut H,
        model: &TypeModel,
        types: &[TypeId],
    ) -> Result<(), RegistrarError> {
        let entries = self.collect_entries(model, types)?;
        tracing::debug!(entries = entries.len(), "collected reflective entries");
        emit::emit(&entries, hints, model)
    }

    /// The deduplicated entries for `types`, without registering anything.
    ///
    /// ## Errors
    /// - [`RegistrarError::ForeignType`] when a root id belongs to another model; nothing is walked in that case.
    pub fn collect_entries(&mut self, model: &TypeModel, types: &[TypeId]) -> Result<EntrySet, RegistrarError> {
        if let Some(foreign) = types.iter().find(|&&ty| !model.contains(ty.into())) {
            return Err(RegistrarError::ForeignType { index: foreign.index() });
        }
        let mut entries = EntrySet::new();
        let mut builder = EntryBuilder::new(&mut self.processors);
        for element in TypeWalker::new(model).marked_elements(types) {
            entries.insert(builder.build(model, element)?);
        }
        Ok(entries)
    }
}
