//! Command-line argument definitions for the arbor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the input format,
//! configuration file selection, overwrite protection and logging verbosity.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// How the input file is read.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON for `.json` files, outline text otherwise
    #[default]
    Auto,
    /// Markdown-like outline
    Markdown,
    /// Mindmap document or bare nested value
    Json,
}

/// Command-line arguments for the arbor mindmap tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input outline or JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Output path; the extension picks the format (dot, gv, json, svg, pdf, png).
    /// Defaults to the input path with a `.dot` extension.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub format: InputFormat,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolved output path.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => Path::new(&self.input).with_extension("dot"),
        }
    }

    /// Input format with `auto` resolved from the input extension.
    pub fn input_format(&self) -> InputFormat {
        match self.format {
            InputFormat::Auto => {
                let is_json = Path::new(&self.input)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Markdown
                }
            }
            format => format,
        }
    }
}
