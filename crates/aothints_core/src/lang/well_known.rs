//! Well-known types that discovery itself depends on.
//!
//! This module centralizes the spellings of the marker annotation and its companions so downstream code
//! doesn't need stringly-typed comparisons.

use super::registry::LangItemInfo;

/// Stable identifier for a well-known type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownId {
    /// The marker annotation: elements carrying it (directly or through meta-annotations) need hints.
    Reflective,
    /// Interface implemented by proxies that back synthesized annotation instances.
    SynthesizedAnnotation,
    /// Processor named by the marker's default `value`.
    SimpleReflectiveProcessor,
}

/// Attribute of the marker annotation holding its processor references.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Metadata entry for a well-known type.
pub type WellKnownInfo = LangItemInfo<WellKnownId>;

/// Registry of well-known types.
pub const WELL_KNOWN_TYPES: &[WellKnownInfo] = &[
    info(
        WellKnownId::Reflective,
        "aot.Reflective",
        "Marks an element as needing reflective access at runtime.",
    ),
    info(
        WellKnownId::SynthesizedAnnotation,
        "aot.SynthesizedAnnotation",
        "Marker interface of synthesized annotation proxies.",
    ),
    info(
        WellKnownId::SimpleReflectiveProcessor,
        "aot.SimpleReflectiveProcessor",
        "Default processor registering plain reflective access for an element.",
    ),
];

/// Resolve a well-known type name to its stable id.
pub fn from_str(name: &str) -> Option<WellKnownId> {
    WELL_KNOWN_TYPES.iter().find(|w| w.matches(name)).map(|w| w.id)
}

/// Return the canonical spelling for a well-known type.
pub fn as_str(id: WellKnownId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a well-known type.
pub fn info_for(id: WellKnownId) -> &'static WellKnownInfo {
    WELL_KNOWN_TYPES
        .iter()
        .find(|w| w.id == id)
        .expect("well-known type info missing")
}

const fn info(id: WellKnownId, canonical: &'static str, description: &'static str) -> WellKnownInfo {
    LangItemInfo {
        id,
        canonical,
        aliases: &[],
        description,
    }
}
