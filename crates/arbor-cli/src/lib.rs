//! CLI logic for the arbor mindmap tool.
//!
//! This module contains the core CLI logic: resolve paths, load the layered
//! configuration, parse the input and write the exported diagram.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, InputFormat};

use std::{fs, io, path::Path};

use log::{info, warn};

use arbor::{ArborError, MindmapBuilder, export::OutputFormat};

/// Run the arbor CLI application
///
/// This function processes the input file through the arbor pipeline and
/// writes the result in the format named by the output extension. An
/// existing output file is left alone unless `--force` is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors and unsupported output extensions
/// - Configuration loading errors, including an invalid palette
/// - Malformed JSON input
/// - Export errors
pub fn run(args: &Args) -> Result<(), ArborError> {
    let output_path = args.output_path();
    let output = output_path.display().to_string();
    info!(
        input_path = args.input,
        output_path = output;
        "Processing mindmap"
    );

    let format = OutputFormat::from_path(&output_path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported output extension: {output}"),
        )
    })?;

    if output_path.exists() && !args.force {
        warn!(output_path = output; "Output file exists, skipping (use --force to overwrite)");
        return Ok(());
    }

    // Load configuration and resolve the palette
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = MindmapBuilder::new(app_config)?;

    let source = fs::read_to_string(&args.input)?;

    let tree = match args.input_format() {
        InputFormat::Json => builder.parse_json(&source)?,
        InputFormat::Markdown | InputFormat::Auto => builder.parse_outline(&source),
    };

    let bytes = builder.export(&tree, format)?;
    write_output(&output_path, &bytes)?;

    info!(output_file = output, format:% = format; "Mindmap exported successfully");

    Ok(())
}

/// Writes `bytes`, creating the parent directory when it is missing.
fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)
}
