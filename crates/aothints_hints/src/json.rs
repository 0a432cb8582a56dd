//! Native-image configuration files.
//!
//! Renders [`RuntimeHints`] in the JSON layout consumed by GraalVM `native-image`:
//! - `reflect-config.json`: one entry per type, with member-category flags, `fields`, invocable `methods` and
//!   introspection-only `queriedMethods` (constructors appear as `<init>`).
//! - `proxy-config.json`: one entry per interface proxy.
//!
//! Output is deterministic: types sorted by name, members by signature, proxies in registration order.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::reflection::{ExecutableHint, ExecutableMode, TypeHint};
use crate::runtime::RuntimeHints;

pub const REFLECT_CONFIG_FILE: &str = "reflect-config.json";
pub const PROXY_CONFIG_FILE: &str = "proxy-config.json";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize hints: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("`{name}` is not a plain file name")]
    InvalidFileName { name: String },

    #[error("reflection and proxy configuration would both be written to `{name}`")]
    ConflictingFileNames { name: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TypeEntry<'a> {
    name: &'a str,
    #[serde(flatten)]
    flags: BTreeMap<&'static str, bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    methods: Vec<MethodEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    queried_methods: Vec<MethodEntry<'a>>,
}

#[derive(Serialize)]
struct FieldEntry<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodEntry<'a> {
    name: &'a str,
    parameter_types: Vec<&'a str>,
}

#[derive(Serialize)]
struct ProxyEntry<'a> {
    interfaces: Vec<&'a str>,
}

#[derive(Serialize)]
struct CombinedEntries<'a> {
    reflection: Vec<TypeEntry<'a>>,
    proxies: Vec<ProxyEntry<'a>>,
}

impl<'a> TypeEntry<'a> {
    fn from_hint(hint: &'a TypeHint) -> Self {
        let flags = hint.member_categories().map(|c| (c.json_flag(), true)).collect();
        let fields = hint.fields().map(|f| FieldEntry { name: f.name() }).collect();

        let executables: Vec<&ExecutableHint> = hint.constructors().chain(hint.methods()).collect();
        let entries = |mode: ExecutableMode| -> Vec<MethodEntry<'a>> {
            executables
                .iter()
                .copied()
                .filter(|e| e.mode() == mode)
                .map(|e| MethodEntry {
                    name: e.name(),
                    parameter_types: e.parameter_types().iter().map(|p| p.name()).collect(),
                })
                .collect()
        };

        Self {
            name: hint.type_reference().name(),
            flags,
            fields,
            methods: entries(ExecutableMode::Invoke),
            queried_methods: entries(ExecutableMode::Introspect),
        }
    }
}

fn reflection_entries(hints: &RuntimeHints) -> Vec<TypeEntry<'_>> {
    hints.reflection().type_hints().map(TypeEntry::from_hint).collect()
}

fn proxy_entries(hints: &RuntimeHints) -> Vec<ProxyEntry<'_>> {
    hints
        .proxies()
        .interface_proxies()
        .map(|proxy| ProxyEntry {
            interfaces: proxy.interfaces().iter().map(|i| i.name()).collect(),
        })
        .collect()
}

/// A single path component naming a file: no separators, no root, not `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Writes [`RuntimeHints`] as native-image configuration.
#[derive(Debug, Clone)]
pub struct NativeConfigurationWriter {
    pretty: bool,
    reflect_file: String,
    proxy_file: String,
}

impl Default for NativeConfigurationWriter {
    fn default() -> Self {
        Self {
            pretty: true,
            reflect_file: REFLECT_CONFIG_FILE.to_string(),
            proxy_file: PROXY_CONFIG_FILE.to_string(),
        }
    }
}

impl NativeConfigurationWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output instead of two-space indented JSON.
    pub fn compact() -> Self {
        Self::default().with_pretty(false)
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Override the file names used by [`NativeConfigurationWriter::write_to_dir`].
    pub fn with_file_names(mut self, reflect_file: impl Into<String>, proxy_file: impl Into<String>) -> Self {
        self.reflect_file = reflect_file.into();
        self.proxy_file = proxy_file.into();
        self
    }

    pub fn reflection_json(&self, hints: &RuntimeHints) -> Result<String, WriteError> {
        self.render(&reflection_entries(hints))
    }

    pub fn proxy_json(&self, hints: &RuntimeHints) -> Result<String, WriteError> {
        self.render(&proxy_entries(hints))
    }

    /// Both configurations in one document: `{"reflection": [...], "proxies": [...]}`.
    pub fn combined_json(&self, hints: &RuntimeHints) -> Result<String, WriteError> {
        self.render(&CombinedEntries {
            reflection: reflection_entries(hints),
            proxies: proxy_entries(hints),
        })
    }

    /// Check that both file names stay inside the target directory and differ from each other.
    pub fn validate_file_names(&self) -> Result<(), WriteError> {
        for name in [&self.reflect_file, &self.proxy_file] {
            if !is_plain_file_name(name) {
                return Err(WriteError::InvalidFileName { name: name.clone() });
            }
        }
        if self.reflect_file == self.proxy_file {
            return Err(WriteError::ConflictingFileNames {
                name: self.reflect_file.clone(),
            });
        }
        Ok(())
    }

    /// Write the reflection and proxy configuration files into `dir`, creating it if needed.
    ///
    /// ## Returns
    /// - The paths written, reflection first.
    ///
    /// ## Errors
    /// - [`WriteError::InvalidFileName`] or [`WriteError::ConflictingFileNames`] before anything is touched.
    pub fn write_to_dir(&self, dir: &Path, hints: &RuntimeHints) -> Result<Vec<PathBuf>, WriteError> {
        self.validate_file_names()?;
        fs::create_dir_all(dir).map_err(|source| WriteError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let files = [
            (self.reflect_file.as_str(), self.reflection_json(hints)?),
            (self.proxy_file.as_str(), self.proxy_json(hints)?),
        ];
        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = dir.join(name);
            fs::write(&path, format!("{content}\n")).map_err(|source| WriteError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "wrote native configuration");
            written.push(path);
        }
        Ok(written)
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, WriteError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}
