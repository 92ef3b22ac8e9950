//! CLI logic for the netdiagram tool.
//!
//! Reads a TOML manifest, builds a [`Diagram`] from it and renders the
//! result with the configured Graphviz program.

pub mod error_adapter;
pub mod manifest;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::{fs, path::Path};

use log::info;

use netdiagram::{Diagram, options::diagram};

use manifest::Manifest;

/// Run the netdiagram CLI application
///
/// Overrides are applied in increasing priority: configuration file, the
/// manifest's file stem, the manifest's `[diagram]` section, then the
/// command-line flags.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(input_path = args.input; "Processing manifest");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input).map_err(|source| CliError::Io {
        path: args.input.clone().into(),
        source,
    })?;

    let manifest = Manifest::parse(&source)
        .map_err(|err| CliError::new_manifest_error(err, &args.input, &source))?;

    let mut overrides = app_config.diagram_overrides();
    if let Some(stem) = Path::new(&args.input).file_stem() {
        overrides.push(diagram::file_name(stem.to_string_lossy()));
    }
    overrides.extend(manifest.diagram_overrides());
    if let Some(dir) = &args.output_dir {
        overrides.push(diagram::out_dir(dir));
    }
    if let Some(format) = &args.format {
        overrides.push(diagram::format(format.as_str()));
    }

    let mut diagram = Diagram::new(overrides);
    diagram.set_assets(app_config.assets().store());

    manifest
        .populate(&mut diagram)
        .map_err(|err| CliError::new_manifest_error(err, &args.input, &source))?;

    diagram.render()?;

    let output = diagram.output_path()?;
    info!(output_file = output.display().to_string(); "Diagram rendered successfully");

    Ok(())
}
