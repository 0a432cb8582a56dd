//! Configuration for a scan run.

use std::path::PathBuf;

use aothints_hints::{NativeConfigurationWriter, WriteError};
use aothints_hints::json::{PROXY_CONFIG_FILE, REFLECT_CONFIG_FILE};

/// How scan results are rendered and where they go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory to write configuration files into; `None` prints one combined document instead
    pub output_dir: Option<PathBuf>,
    /// Indent JSON output
    pub pretty: bool,
    /// File name for reflection hints inside `output_dir`
    pub reflect_file_name: String,
    /// File name for proxy hints inside `output_dir`
    pub proxy_file_name: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            pretty: true,
            reflect_file_name: REFLECT_CONFIG_FILE.to_string(),
            proxy_file_name: PROXY_CONFIG_FILE.to_string(),
        }
    }
}

impl ScanConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set whether JSON is indented
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the configuration file names
    pub fn with_file_names(mut self, reflect: impl Into<String>, proxy: impl Into<String>) -> Self {
        self.reflect_file_name = reflect.into();
        self.proxy_file_name = proxy.into();
        self
    }

    /// Reject file names that collide or leave `output_dir`.
    pub fn validate(&self) -> Result<(), WriteError> {
        self.writer().validate_file_names()
    }

    /// Writer matching this config
    pub fn writer(&self) -> NativeConfigurationWriter {
        NativeConfigurationWriter::new()
            .with_pretty(self.pretty)
            .with_file_names(self.reflect_file_name.as_str(), self.proxy_file_name.as_str())
    }
}
