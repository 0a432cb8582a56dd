#![forbid(unsafe_code)]
//! Reflection-hint discovery for ahead-of-time compilation
//!
//! Walks a program-element model from a set of root types, finds every element marked `@aot.Reflective`
//! (directly, through a meta-annotation, or through the type hierarchy) and lets the processors named by the
//! marker contribute reflection hints. Synthesizable meta-annotations additionally get proxy hints so they can be
//! read at runtime.
//!
//! ## Layout
//!
//! - [`registrar`]: the discovery pipeline and [`registrar::ReflectiveRuntimeHintsRegistrar`]
//! - [`processor`]: the processor contract, the built-in processors and the processor registry
//! - [`annotation_hints`]: hints for synthesized annotations
//! - [`descriptor`]: JSON model descriptors
//! - [`cli`]: the `aothints` command line
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod annotation_hints;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod processor;
pub mod registrar;

pub use config::ScanConfig;
pub use descriptor::{DescriptorError, ModelDescriptor, load_model};
pub use processor::{ProcessorCatalog, ProcessorError, ReflectiveProcessor, SimpleReflectiveProcessor};
pub use registrar::{ReflectiveRuntimeHintsRegistrar, RegistrarError};
