//! Qualified type names as they appear in hints.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a type by its fully qualified name, e.g. `demo.Bean` or `demo.Outer$Inner`.
///
/// Hints are keyed by name rather than by model id so that a [`crate::RuntimeHints`] outlives the model it was
/// computed from and can be compared or serialized on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeReference(String);

impl TypeReference {
    pub fn of(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name without the package prefix.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, simple)| simple)
    }

    /// Package prefix, empty for types in the default package.
    pub fn package_name(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(package, _)| package)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeReference {
    fn from(name: &str) -> Self {
        Self::of(name)
    }
}

impl From<String> for TypeReference {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for TypeReference {
    fn borrow(&self) -> &str {
        &self.0
    }
}
