//! Mindmap documents: a mindmap value plus paper metadata.
//!
//! Summarizers emit JSON shaped like
//!
//! ```json
//! {
//!   "metadata": { "title": "...", "authors": "...", "institution": "...",
//!                 "date": "...", "tldr": "..." },
//!   "mindmap": { "...": ["..."] }
//! }
//! ```
//!
//! The title becomes the root of the mindmap. JSON of any other shape is
//! taken as a bare mindmap value.

use log::debug;
use serde::{Deserialize, Serialize};

use arbor_parser::Value;

const METADATA_KEY: &str = "metadata";
const MINDMAP_KEY: &str = "mindmap";

/// Paper metadata attached to a mindmap. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    pub authors: String,
    pub institution: String,
    pub date: String,
    pub tldr: String,
}

impl Metadata {
    /// Reads the known fields of a metadata mapping. Non-text fields and
    /// unknown keys are ignored.
    fn from_value(value: &Value) -> Self {
        let Value::Mapping(entries) = value else {
            return Self::default();
        };
        let text = |key: &str| match entries.get(key) {
            Some(Value::Leaf(text)) => text.trim().to_string(),
            _ => String::new(),
        };
        Self {
            title: text("title"),
            authors: text("authors"),
            institution: text("institution"),
            date: text("date"),
            tldr: text("tldr"),
        }
    }
}

/// A mindmap together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MindmapDocument {
    #[serde(default)]
    metadata: Metadata,
    mindmap: Value,
}

impl MindmapDocument {
    pub fn new(metadata: Metadata, mindmap: Value) -> Self {
        Self { metadata, mindmap }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn mindmap(&self) -> &Value {
        &self.mindmap
    }

    /// Recognizes the document shape in a parsed value.
    ///
    /// A document is a mapping with a `mindmap` key and at most a
    /// `metadata` key besides it. Anything else is handed back unchanged.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        let mut entries = match value {
            Value::Mapping(entries) => entries,
            other => return Err(other),
        };
        let is_document = entries.contains_key(MINDMAP_KEY)
            && entries
                .keys()
                .all(|key| key == MINDMAP_KEY || key == METADATA_KEY);
        if !is_document {
            return Err(Value::Mapping(entries));
        }

        let metadata = entries
            .get(METADATA_KEY)
            .map(Metadata::from_value)
            .unwrap_or_default();
        let mindmap = entries
            .shift_remove(MINDMAP_KEY)
            .unwrap_or(Value::Sequence(Vec::new()));
        Ok(Self { metadata, mindmap })
    }

    /// Converts the document into the value to draw.
    ///
    /// With a title, the mindmap hangs below a single node carrying it.
    /// Without one, the mindmap is returned as is.
    pub fn into_value(self) -> Value {
        if self.metadata.title.is_empty() {
            self.mindmap
        } else {
            Value::mapping([(self.metadata.title, self.mindmap)])
        }
    }
}

/// Parses JSON into the value to draw, unwrapping mindmap documents.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] if `source` is not valid JSON.
///
/// # Examples
///
/// ```
/// use arbor::document::read_json;
/// use arbor_parser::Value;
///
/// let value = read_json(r#"{"metadata": {"title": "Paper"}, "mindmap": {"Idea": "Yes"}}"#).unwrap();
/// assert_eq!(
///     value,
///     Value::mapping([("Paper", Value::mapping([("Idea", Value::leaf("Yes"))]))])
/// );
/// ```
pub fn read_json(source: &str) -> Result<Value, serde_json::Error> {
    let value: Value = serde_json::from_str(source)?;
    match MindmapDocument::from_value(value) {
        Ok(document) => {
            debug!(title = document.metadata().title.as_str(); "Mindmap document detected");
            Ok(document.into_value())
        }
        Err(value) => Ok(value),
    }
}
