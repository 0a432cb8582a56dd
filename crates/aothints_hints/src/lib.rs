//! Runtime hints for ahead-of-time compilation.
//!
//! A [`RuntimeHints`] accumulates everything an ahead-of-time compiled application needs at runtime that static
//! analysis cannot see: reflective access to types and members, and interface proxies. This crate knows nothing
//! about how hints are discovered; it only stores, queries and serializes them.
//!
//! ## Notes
//!
//! - Types are referenced by qualified name ([`TypeReference`]), so hints are independent of any element model.
//! - [`HintRegistry`] is the write seam used by discovery.

pub mod json;
pub mod predicate;
pub mod proxy;
pub mod reflection;
pub mod runtime;
pub mod type_reference;

pub use json::{NativeConfigurationWriter, WriteError};
pub use predicate::RuntimeHintsPredicates;
pub use proxy::{InterfaceProxyHint, ProxyHints};
pub use reflection::{ExecutableHint, ExecutableMode, FieldHint, MemberCategory, ReflectionHints, TypeHint};
pub use runtime::{HintRegistry, RuntimeHints};
pub use type_reference::TypeReference;
