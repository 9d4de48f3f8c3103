//! Arbor Parser
//!
//! This crate turns mindmap sources into canonical [`Tree`]s:
//!
//! - **Outlines**: markdown-like text with `#` headings, `-`/`*`/`1.` list
//!   items, `key: value` items and a `---` terminator ([`parse_outline`])
//! - **Structured values**: nested mappings, sequences and scalars from any
//!   self-describing serde format ([`build_from_value`])
//!
//! Both paths place their nodes below a synthetic root and normalize the
//! result, so a source with a single top-level node is rooted at that node.
//!
//! Parsing never fails. Lines that match no known construct become free
//! text attached to the most recent node.
//!
//! [`Tree`]: arbor_core::tree::Tree

mod classify;
mod outline;
mod value;

pub use classify::{Line, TERMINATOR, classify, clean_content};
pub use outline::{OutlineBuilder, ScanState, parse_outline};
pub use value::{Value, build_from_value};

/// Label used for the synthetic root when none is configured.
pub const DEFAULT_ROOT_LABEL: &str = "Mindmap";

/// Options shared by both parsing paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    root_label: String,
}

impl ParseConfig {
    /// Creates a configuration whose synthetic root reads `root_label`.
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    /// Content of the synthetic root. It only shows when the source has
    /// more than one top-level node.
    pub fn root_label(&self) -> &str {
        &self.root_label
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LABEL)
    }
}
