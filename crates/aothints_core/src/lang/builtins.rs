//! Builtin type vocabulary.
//!
//! Every [`crate::model::TypeModel`] starts out with these types declared, so descriptors and tests can refer to
//! `String` or `int` without declaring them.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `Object` must stay first: it is the implicit superclass of every other class.

use super::registry::LangItemInfo;

/// Stable identifier for a builtin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Object,
    String,
    Integer,
    Long,
    Boolean,
    Int,
    LongPrimitive,
    BooleanPrimitive,
    Void,
}

/// Whether a builtin is a reference (class) type or a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Class,
    Primitive,
}

/// Metadata for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub item: LangItemInfo<BuiltinTypeId>,
    pub kind: BuiltinKind,
}

/// Registry of all builtin types.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    info(
        BuiltinTypeId::Object,
        "Object",
        &[],
        "Root of the class hierarchy.",
        BuiltinKind::Class,
    ),
    info(
        BuiltinTypeId::String,
        "String",
        &[],
        "Immutable character sequence.",
        BuiltinKind::Class,
    ),
    info(
        BuiltinTypeId::Integer,
        "Integer",
        &[],
        "Boxed 32-bit integer.",
        BuiltinKind::Class,
    ),
    info(BuiltinTypeId::Long, "Long", &[], "Boxed 64-bit integer.", BuiltinKind::Class),
    info(
        BuiltinTypeId::Boolean,
        "Boolean",
        &[],
        "Boxed boolean.",
        BuiltinKind::Class,
    ),
    info(
        BuiltinTypeId::Int,
        "int",
        &["i32"],
        "32-bit integer primitive.",
        BuiltinKind::Primitive,
    ),
    info(
        BuiltinTypeId::LongPrimitive,
        "long",
        &["i64"],
        "64-bit integer primitive.",
        BuiltinKind::Primitive,
    ),
    info(
        BuiltinTypeId::BooleanPrimitive,
        "boolean",
        &["bool"],
        "Boolean primitive.",
        BuiltinKind::Primitive,
    ),
    info(
        BuiltinTypeId::Void,
        "void",
        &["unit"],
        "Absence of a value; only meaningful as a return type.",
        BuiltinKind::Primitive,
    ),
];

/// Return the full metadata entry for a builtin type.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|b| b.item.id == id)
        .expect("builtin type info missing")
}

/// Return the canonical spelling for a builtin type.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).item.canonical
}

/// Resolve a spelling (canonical or alias) to a builtin type identifier.
///
/// ## Returns
/// - `Some(BuiltinTypeId)` if `name` matches a canonical spelling or alias.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<BuiltinTypeId> {
    if let Some(b) = BUILTIN_TYPES.iter().find(|b| b.item.canonical == name) {
        return Some(b.item.id);
    }
    BUILTIN_TYPES.iter().find(|b| b.item.matches(name)).map(|b| b.item.id)
}

const fn info(
    id: BuiltinTypeId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    kind: BuiltinKind,
) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        item: LangItemInfo {
            id,
            canonical,
            aliases,
            description,
        },
        kind,
    }
}
