//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use aothints_core::{TypeId, TypeModel};
use aothints_hints::RuntimeHints;

use super::{CliError, CliResult, ExitCode};
use crate::config::ScanConfig;
use crate::descriptor;
use crate::registrar::{ReflectiveRuntimeHintsRegistrar, RegistrarError};

/// Maximum descriptor size (10 MB)
const MAX_DESCRIPTOR_SIZE: u64 = 10 * 1024 * 1024;

// ============================================================================
// Model loading (shared between commands)
// ============================================================================

/// Read a descriptor file.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_DESCRIPTOR_SIZE`
pub fn read_descriptor(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_DESCRIPTOR_SIZE {
        return Err(CliError::failure(format!(
            "Model descriptor '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_DESCRIPTOR_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Load a model, rendering descriptor problems as diagnostics.
fn load_model(path: &Path) -> CliResult<TypeModel> {
    let source = read_descriptor(path)?;
    descriptor::load_model(&path.to_string_lossy(), &source)
        .map_err(|e| CliError::configuration(format!("{:?}", miette::Report::new(e))))
}

/// Resolve root type names given on the command line.
fn resolve_roots(model: &TypeModel, names: &[String]) -> CliResult<Vec<TypeId>> {
    names
        .iter()
        .map(|name| {
            model
                .lookup(name)
                .ok_or_else(|| CliError::configuration(format!("Error: type `{name}` is not declared in the model")))
        })
        .collect()
}

fn registrar_error(err: RegistrarError) -> CliError {
    let message = format!("Error: {err}");
    if err.is_configuration_error() {
        CliError::configuration(message)
    } else {
        CliError::failure(message)
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Register hints for `type_names` and print them, or write them to the configured directory.
pub fn scan(model_path: &Path, type_names: &[String], config: &ScanConfig) -> CliResult<ExitCode> {
    if config.output_dir.is_some() {
        config
            .validate()
            .map_err(|e| CliError::configuration(format!("Error: {e}")))?;
    }
    let model = load_model(model_path)?;
    let roots = resolve_roots(&model, type_names)?;

    let mut hints = RuntimeHints::new();
    ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, &model, &roots)
        .map_err(registrar_error)?;

    let writer = config.writer();
    match &config.output_dir {
        Some(dir) => {
            let written = writer
                .write_to_dir(dir, &hints)
                .map_err(|e| CliError::failure(format!("Error: {e}")))?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        None => {
            let json = writer
                .combined_json(&hints)
                .map_err(|e| CliError::failure(format!("Error: {e}")))?;
            println!("{json}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print one line per marked element: the element and the processor handling it.
pub fn list_entries(model_path: &Path, type_names: &[String]) -> CliResult<ExitCode> {
    let model = load_model(model_path)?;
    let roots = resolve_roots(&model, type_names)?;

    let entries = ReflectiveRuntimeHintsRegistrar::default()
        .collect_entries(&model, &roots)
        .map_err(registrar_error)?;

    if entries.is_empty() {
        println!("No reflective elements reachable from the given types");
    }
    for entry in &entries {
        println!(
            "{}  ->  {}",
            model.describe(entry.element()),
            entry.processor().display_key()
        );
    }
    Ok(ExitCode::SUCCESS)
}
