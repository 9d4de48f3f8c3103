//! Structured values and their conversion into a tree.
//!
//! A [`Value`] is the minimal nested shape a mindmap can be described
//! with: text leaves, ordered sequences and ordered string-keyed mappings.
//! It deserializes from any self-describing serde format, so JSON (or YAML,
//! or TOML) documents can feed the same tree builder.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use arbor_core::tree::{NodeIndex, NodeKind, Tree};

use crate::ParseConfig;

/// A nested, order-preserving structured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Scalar text
    Leaf(String),
    /// Ordered list of values
    Sequence(Vec<Value>),
    /// Ordered key/value entries; iteration follows insertion order
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// Creates a leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Creates a mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns `true` for [`Value::Leaf`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self::Mapping(entries)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, boolean, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Leaf(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Leaf(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Leaf(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Leaf(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Leaf(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Leaf(v))
    }

    // `null` is an empty branch rather than an error.
    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Sequence(Vec::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::Mapping(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Pending work for [`build_from_value`].
enum Work<'a> {
    /// Attach `value` below `parent`; scalars get `kind`.
    Value {
        parent: NodeIndex,
        value: &'a Value,
        kind: NodeKind,
    },
    /// Attach a mapping key below `parent`, then its value below the key.
    Entry {
        parent: NodeIndex,
        key: &'a str,
        value: &'a Value,
    },
}

/// Builds a canonical tree from a structured value.
///
/// The value hangs below a synthetic root labelled with the configured
/// root label. Mapping keys become [`NodeKind::Mapping`] nodes that own
/// their values, sequence elements become siblings, and scalars become
/// leaves. A document with a single top-level key therefore collapses
/// into a tree rooted at that key.
///
/// Traversal uses an explicit work stack, so nesting depth is not bounded
/// by the call stack.
///
/// # Examples
///
/// ```
/// use arbor_parser::{ParseConfig, Value, build_from_value};
///
/// let value: Value = serde_json::from_str(r#"{"Root": ["X", "Y"]}"#).unwrap();
/// let tree = build_from_value(&value, &ParseConfig::default());
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.node(tree.root()).content(), "Root");
/// ```
pub fn build_from_value(value: &Value, config: &ParseConfig) -> Tree {
    let mut tree = Tree::new(config.root_label(), NodeKind::Root);
    let mut work = vec![Work::Value {
        parent: tree.root(),
        value,
        kind: NodeKind::Leaf,
    }];

    while let Some(item) = work.pop() {
        match item {
            Work::Value {
                parent,
                value,
                kind,
            } => {
                let level = tree.node(parent).level() + 1;
                match value {
                    Value::Leaf(text) => {
                        tree.add_child(parent, text.as_str(), level, kind);
                    }
                    Value::Sequence(items) => {
                        work.extend(items.iter().rev().map(|value| Work::Value {
                            parent,
                            value,
                            kind: NodeKind::Sequence,
                        }));
                    }
                    Value::Mapping(entries) => {
                        work.extend(entries.iter().rev().map(|(key, value)| Work::Entry {
                            parent,
                            key: key.as_str(),
                            value,
                        }));
                    }
                }
            }
            Work::Entry { parent, key, value } => {
                let level = tree.node(parent).level() + 1;
                let key = tree.add_child(parent, key, level, NodeKind::Mapping);
                work.push(Work::Value {
                    parent: key,
                    value,
                    kind: NodeKind::Leaf,
                });
            }
        }
    }

    let tree = tree.normalize();
    debug!(nodes_count = tree.len(); "Structured value converted");
    tree
}
