//! Vocabulary registries for the element model.
//!
//! Callers work with **stable IDs** (e.g. [`builtins::BuiltinTypeId`], [`well_known::WellKnownId`]) and look up
//! spellings and metadata via registry tables instead of comparing strings.
//!
//! ## Examples
//! ```rust
//! use aothints_core::lang::builtins::{self, BuiltinTypeId};
//!
//! assert_eq!(builtins::from_str("int"), Some(BuiltinTypeId::Int));
//! assert_eq!(builtins::from_str("i32"), Some(BuiltinTypeId::Int));
//! assert_eq!(builtins::as_str(BuiltinTypeId::Int), "int");
//! ```

pub mod builtins;
pub mod registry;
pub mod well_known;
