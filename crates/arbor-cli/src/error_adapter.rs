//! Error adapter for converting ArborError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! JSON syntax errors carry their source, so they are rendered with a
//! labelled snippet pointing at the offending position. Every other error
//! gets a stable code and, where there is something useful to say, a help
//! line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use arbor::ArborError;

/// Adapter for a JSON syntax error inside a mindmap document.
pub struct DocumentAdapter<'a> {
    /// The wrapped parser error
    err: &'a serde_json::Error,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DocumentAdapter<'a> {
    /// Create a new document adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the reported line and column, clamped to the source.
    fn span(&self) -> SourceSpan {
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(self.err.line().saturating_sub(1))
            .map(str::len)
            .sum();
        let mut offset = (line_start + self.err.column().saturating_sub(1)).min(self.src.len());
        while !self.src.is_char_boundary(offset) {
            offset -= 1;
        }
        let len = self.src[offset..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid mindmap document")
    }
}

impl std::error::Error for DocumentAdapter<'_> {}

impl MietteDiagnostic for DocumentAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("arbor::document"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "pass `--format markdown` if the input is an outline rather than JSON",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`ArborError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a ArborError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ArborError::Io(_) => "arbor::io",
            ArborError::Palette(_) => "arbor::palette",
            ArborError::Structure(_) => "arbor::structure",
            ArborError::Document { .. } => "arbor::document",
            ArborError::Export(_) => "arbor::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ArborError::Palette(_) => {
                "palette colors are `#RRGGBB` or `#RRGGBBAA`, at least two are needed, \
                 and luminance_threshold lies between 0 and 1"
            }
            ArborError::Structure(_) => "this is a bug in arbor, please report it with the input",
            ArborError::Export(_) => {
                "image output runs the Graphviz `dot` binary, check that it is installed and on PATH"
            }
            ArborError::Io(_) | ArborError::Document { .. } => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A JSON syntax error with its source snippet.
    Document(DocumentAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Document(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Document(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Document(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Document(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`ArborError`] into a reportable error.
pub fn to_reportable(err: &ArborError) -> Reportable<'_> {
    match err {
        ArborError::Document { err, src } => Reportable::Document(DocumentAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Renders `err` as a graphical miette report for the given input file.
///
/// The report is headed by the input path, so a failing run over many
/// files still says which one went wrong.
pub fn render_report(err: &ArborError, input_path: &str) -> String {
    let reporter = GraphicalReportHandler::new();
    let reportable = to_reportable(err);

    let mut writer = format!("while processing `{input_path}`\n");
    reporter
        .render_report(&mut writer, &reportable)
        .expect("Writing to String buffer is infallible");
    writer
}
