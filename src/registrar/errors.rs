//! Errors raised during hint registration.

use aothints_core::AttributeError;
use thiserror::Error;

use crate::processor::ProcessorError;

/// Failure of a registration run.
///
/// Malformed annotation metadata never shows up here: such elements are simply not marked. Every variant aborts
/// the run, because the hints produced so far would be incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrarError {
    #[error("unknown reflective processor `{processor}`")]
    UnknownProcessor { processor: String },

    #[error("failed to instantiate reflective processor `{processor}`")]
    ProcessorInstantiation {
        processor: String,
        #[source]
        source: ProcessorError,
    },

    #[error("reflective processor `{processor}` failed on {element}")]
    Processor {
        processor: String,
        element: String,
        #[source]
        source: ProcessorError,
    },

    #[error("cannot read processors declared on {element}")]
    Marker {
        element: String,
        #[source]
        source: AttributeError,
    },

    #[error("type id #{index} was not issued by the model being scanned")]
    ForeignType { index: usize },

    #[error("INVARIANT: {0}")]
    Invariant(String),
}

impl RegistrarError {
    /// Whether the error comes from the caller's setup (processor declarations, root types) rather than from a
    /// processor run.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RegistrarError::UnknownProcessor { .. }
                | RegistrarError::ProcessorInstantiation { .. }
                | RegistrarError::Marker { .. }
                | RegistrarError::ForeignType { .. }
        )
    }
}
