//! CLI module for the reflection-hint scanner
//!
//! ## Commands
//!
//! - `scan <model> --type <name>...` - Register hints for the given root types and print or write them
//! - `entries <model> --type <name>...` - List the marked elements and the processor each one resolves to
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//! Root types always come from the user; the driver never picks them itself.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::ScanConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The model or the processor setup is wrong, as opposed to a processor failing on an element.
    pub const CONFIGURATION: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a configuration error (exit code 2).
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::CONFIGURATION)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Discover reflectively-accessed elements and emit ahead-of-time hints
#[derive(Parser, Debug)]
#[command(name = "aothints")]
#[command(version = VERSION)]
#[command(about = "Discover reflectively-accessed elements and emit ahead-of-time hints", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register hints for the given root types
    Scan {
        /// Model descriptor (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Root type to scan, by qualified name (repeatable)
        #[arg(long = "type", short = 't', value_name = "NAME", required = true)]
        types: Vec<String>,
        /// Write reflect-config.json and proxy-config.json into this directory instead of printing
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
        /// File name for reflection hints (with --out)
        #[arg(long, value_name = "NAME", requires = "out")]
        reflect_file: Option<String>,
        /// File name for proxy hints (with --out)
        #[arg(long, value_name = "NAME", requires = "out")]
        proxy_file: Option<String>,
    },

    /// List marked elements and their processors without registering hints
    Entries {
        /// Model descriptor (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Root type to scan, by qualified name (repeatable)
        #[arg(long = "type", short = 't', value_name = "NAME", required = true)]
        types: Vec<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Scan {
            model,
            types,
            out,
            compact,
            reflect_file,
            proxy_file,
        } => {
            let config = scan_config(out, compact, reflect_file, proxy_file);
            commands::scan(&model, &types, &config)
        }
        Command::Entries { model, types } => commands::list_entries(&model, &types),
    }
}

/// Map scan flags onto a [`ScanConfig`].
fn scan_config(
    out: Option<PathBuf>,
    compact: bool,
    reflect_file: Option<String>,
    proxy_file: Option<String>,
) -> ScanConfig {
    let defaults = ScanConfig::default();
    let mut config = ScanConfig::new().with_pretty(!compact).with_file_names(
        reflect_file.unwrap_or(defaults.reflect_file_name),
        proxy_file.unwrap_or(defaults.proxy_file_name),
    );
    if let Some(dir) = out {
        config = config.with_output_dir(dir);
    }
    config
}

// ============================================================================
// Tests
// ============================================================================
