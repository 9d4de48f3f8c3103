//! Export functionality for arbor diagrams.
//!
//! This module provides the [`Exporter`] trait that turns an emitted
//! [`Diagram`] into the bytes of an output file. It is the final stage in
//! the arbor pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Outline text / structured value
//!     ↓ parse
//! Canonical tree
//!     ↓ paint
//! Styled tree
//!     ↓ emit
//! Diagram (nodes + edges)
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`dot`]: Graphviz DOT text, and with the `graphviz` feature, images
//!   rendered by the external `dot` binary
//! - [`json`]: the diagram description as JSON
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`ArborError::Export`] at the crate boundary.
//!
//! [`ArborError::Export`]: crate::ArborError::Export

pub mod dot;
pub mod json;

use std::{fmt, io, path::Path, str::FromStr};

use crate::emit::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Serializes `diagram` into the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted, or
    /// [`Error::Io`] if an external tool fails to run.
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error, including failure to launch an external renderer.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Output file kinds, chosen from the output path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graphviz DOT text (`.dot`, `.gv`)
    Dot,
    /// Diagram description (`.json`)
    Json,
    /// Rendered by Graphviz (`.svg`)
    Svg,
    /// Rendered by Graphviz (`.pdf`)
    Pdf,
    /// Rendered by Graphviz (`.png`)
    Png,
}

impl OutputFormat {
    /// Picks the format from a path's extension, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use arbor::export::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path(Path::new("map.gv")), Some(OutputFormat::Dot));
    /// assert_eq!(OutputFormat::from_path(Path::new("map.PNG")), Some(OutputFormat::Png));
    /// assert_eq!(OutputFormat::from_path(Path::new("map")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.to_ascii_lowercase().parse().ok())
    }

    /// Returns `true` for formats that need the Graphviz `dot` binary.
    pub fn is_rendered(self) -> bool {
        matches!(self, Self::Svg | Self::Pdf | Self::Png)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" | "gv" => Ok(Self::Dot),
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "png" => Ok(Self::Png),
            _ => Err(format!(
                "unsupported output format `{s}`, valid values: dot, gv, json, svg, pdf, png"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dot => "dot",
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Png => "png",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.dot")), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("dir/a.Svg")), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path(Path::new("a.pdf")), Some(OutputFormat::Pdf));
        assert_eq!(OutputFormat::from_path(Path::new("a.txt")), None);
    }

    #[test]
    fn test_rendered_formats() {
        assert!(!OutputFormat::Dot.is_rendered());
        assert!(!OutputFormat::Json.is_rendered());
        assert!(OutputFormat::Svg.is_rendered());
        assert!(OutputFormat::Png.is_rendered());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Render("bad graph".to_string());
        assert_eq!(err.to_string(), "Render error: bad graph");

        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "dot"));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
