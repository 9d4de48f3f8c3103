//! Error types for arbor operations.
//!
//! This module provides the main error type [`ArborError`] which wraps
//! every error condition that can occur while building a mindmap.

use std::io;

use thiserror::Error;

use arbor_core::tree::StructuralError;

use crate::palette::PaletteError;

/// The main error type for arbor operations.
///
/// Palette errors are configuration problems raised before any input is
/// read. Structural errors mean a pipeline stage produced a broken tree
/// and are bugs rather than user mistakes.
#[derive(Debug, Error)]
pub enum ArborError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Internal tree error: {0}")]
    Structure(#[from] StructuralError),

    #[error("Invalid mindmap document: {err}")]
    Document { err: serde_json::Error, src: String },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl ArborError {
    /// Create a new `Document` error with the JSON source it came from.
    pub fn new_document_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }
}

impl From<crate::export::Error> for ArborError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
