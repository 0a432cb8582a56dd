//! Errors raised while loading a model descriptor.

use aothints_core::{AttributeKind, ModelError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("model descriptor is not valid JSON: {message}")]
    #[diagnostic(
        code(aothints::descriptor::syntax),
        help("a descriptor is an object with a `types` array; see the README for the layout")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown type `{name}` referenced by {context}")]
    #[diagnostic(
        code(aothints::descriptor::unknown_type),
        help("declare the type under `types`, or use a builtin such as `String` or `int`")
    )]
    UnknownType { name: String, context: String },

    #[error("`{annotation}` declares no attribute `{attribute}`")]
    #[diagnostic(
        code(aothints::descriptor::unknown_attribute),
        help("add the attribute to the annotation type's `attributes` list")
    )]
    UnknownAttribute { annotation: String, attribute: String },

    #[error("value of `{annotation}.{attribute}` must be {expected}, found {found}")]
    #[diagnostic(code(aothints::descriptor::invalid_value))]
    InvalidValue {
        annotation: String,
        attribute: String,
        expected: AttributeKind,
        found: String,
    },

    #[error("{0}")]
    #[diagnostic(code(aothints::descriptor::model))]
    Model(#[from] ModelError),
}

impl DescriptorError {
    /// Build a [`DescriptorError::Syntax`] pointing at the position serde reported.
    pub(crate) fn syntax(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        Self::Syntax {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }
}

/// Byte offset of a 1-based line/column position, clamped to the source length.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
