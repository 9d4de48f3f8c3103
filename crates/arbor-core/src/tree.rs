//! Arena-backed mindmap tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeIndex`].
//! A parent owns the ordered list of its children's indices; the child's
//! parent link is a plain index used for level recomputation and color
//! inheritance only. No node holds a reference to another node, so the
//! tree has no ownership cycles and can be walked without recursion.
//!
//! # Lifecycle
//!
//! 1. A builder creates a [`Tree`] with a synthetic [`NodeKind::Root`] and
//!    grows it with [`Tree::add_child`].
//! 2. [`Tree::normalize`] collapses a single-child synthetic root and
//!    renumbers ids and levels in pre-order. The result is the canonical tree.
//! 3. [`Tree::validate`] checks the canonical invariants and reports the
//!    first violation as a [`StructuralError`].
//!
//! In a canonical tree the node id equals its arena index, ids run
//! `0..len` in pre-order, and every parent index is smaller than the
//! indices of its children.

use std::fmt;

use log::{debug, trace};
use thiserror::Error;

/// Index of a node inside a [`Tree`] arena.
///
/// After normalization the index doubles as the node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Index of the root in every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the raw arena position.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a node came from.
///
/// Provenance only; it never affects styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Synthetic root created by a builder
    Root,
    /// `#` heading line
    Heading,
    /// `-`, `*` or `1.` list line, including the value half of a `key: value` item
    ListItem,
    /// Unmatched line attached to the most recent node
    FreeText,
    /// Scalar that is the value of a mapping entry
    Leaf,
    /// Scalar element of a sequence
    Sequence,
    /// Key of a mapping entry
    Mapping,
}

/// A single tree node.
#[derive(Debug, Clone)]
pub struct Node {
    id: usize,
    content: String,
    level: usize,
    kind: NodeKind,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl Node {
    fn new(id: usize, content: String, level: usize, kind: NodeKind) -> Self {
        Self {
            id,
            content,
            level,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Unique id within the tree; the root is `0`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Display text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Depth of the node. Before normalization this is the level inferred
    /// while parsing; afterwards it is exactly `parent.level + 1`.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Non-owning link to the parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Violation of a canonical tree invariant.
///
/// Normalization never produces one of these on its own; seeing it means
/// a pipeline stage has a bug, so callers treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("node {node} is structurally invalid: {reason}")]
pub struct StructuralError {
    node: usize,
    reason: String,
}

impl StructuralError {
    /// Creates a new error for the node at `node`.
    pub fn new(node: usize, reason: impl Into<String>) -> Self {
        Self {
            node,
            reason: reason.into(),
        }
    }

    /// Arena index of the offending node.
    pub fn node(&self) -> usize {
        self.node
    }

    /// Human readable description of the violated invariant.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// An ordered, rooted tree stored in an arena.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Creates a tree holding only a root node at level 0.
    pub fn new(root_content: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            nodes: vec![Node::new(0, root_content.into(), 0, kind)],
        }
    }

    /// Appends a node as the last child of `parent` and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        content: impl Into<String>,
        level: usize,
        kind: NodeKind,
    ) -> NodeIndex {
        assert!(
            parent.0 < self.nodes.len(),
            "Adding child: parent node {parent} does not exist"
        );

        let idx = NodeIndex(self.nodes.len());
        let mut node = Node::new(idx.0, content.into(), level, kind);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(idx);
        idx
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeIndex {
        NodeIndex::ROOT
    }

    /// Returns the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to this tree.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Returns the node at `idx`, if it exists.
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.0)
    }

    /// Children of `idx` in insertion order.
    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.nodes[idx.0].children
    }

    /// Parent of `idx`, `None` for the root.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.nodes[idx.0].parent
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never `true`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent/child links.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.parent.is_some()).count()
    }

    /// Pre-order traversal from the root: a node, then its children left
    /// to right. Uses an explicit stack, so depth is not bounded by the
    /// call stack.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Produces the canonical form of the tree.
    ///
    /// 1. If the root is a synthetic [`NodeKind::Root`] with exactly one
    ///    child, that child becomes the root.
    /// 2. Nodes are copied into a fresh arena in pre-order: the root keeps
    ///    id 0 and level 0, every other node gets the next sequential id
    ///    and `parent.level + 1`.
    ///
    /// Only synthetic roots are collapsed, so normalizing a canonical tree
    /// returns the same ids, levels and contents.
    pub fn normalize(mut self) -> Self {
        let mut root = self.root();
        let root_node = self.node(root);
        if root_node.kind == NodeKind::Root && root_node.children.len() == 1 {
            root = root_node.children[0];
            debug!(
                collapsed_into = self.node(root).content.as_str();
                "Collapsing synthetic root"
            );
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = vec![(root, None)];

        while let Some((old_idx, new_parent)) = stack.pop() {
            let new_idx = NodeIndex(nodes.len());
            let old = &mut self.nodes[old_idx.0];
            let level = new_parent.map_or(0, |parent| nodes[parent.0].level + 1);

            let mut node = Node::new(new_idx.0, std::mem::take(&mut old.content), level, old.kind);
            node.parent = new_parent;
            trace!(id = new_idx.0, level; "Renumbered node");

            stack.extend(old.children.iter().rev().map(|&child| (child, Some(new_idx))));
            nodes.push(node);

            if let Some(parent) = new_parent {
                nodes[parent.0].children.push(new_idx);
            }
        }

        debug!(nodes_count = nodes.len(); "Tree normalized");
        Self { nodes }
    }

    /// Checks the canonical invariants.
    ///
    /// Every node's id must equal its index, the root must sit at index 0
    /// with level 0 and no parent, and every other node must have a parent
    /// that precedes it, lists it as a child, and sits exactly one level
    /// above it.
    ///
    /// # Errors
    ///
    /// Returns a [`StructuralError`] for the first node that breaks an
    /// invariant.
    pub fn validate(&self) -> Result<(), StructuralError> {
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.id != idx {
                return Err(StructuralError::new(
                    idx,
                    format!("id {} does not match its position", node.id),
                ));
            }

            let Some(parent) = node.parent else {
                if idx != 0 {
                    return Err(StructuralError::new(idx, "only the root may lack a parent"));
                }
                if node.level != 0 {
                    return Err(StructuralError::new(
                        idx,
                        format!("root level is {}, expected 0", node.level),
                    ));
                }
                continue;
            };

            if parent.0 >= idx {
                return Err(StructuralError::new(
                    idx,
                    format!("parent {parent} does not precede the node"),
                ));
            }
            let parent_node = &self.nodes[parent.0];
            if !parent_node.children.contains(&NodeIndex(idx)) {
                return Err(StructuralError::new(
                    idx,
                    format!("parent {parent} does not list the node as a child"),
                ));
            }
            if node.level != parent_node.level + 1 {
                return Err(StructuralError::new(
                    idx,
                    format!(
                        "level {} is not one below parent level {}",
                        node.level, parent_node.level
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`Tree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeIndex>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(idx).iter().rev().copied());
        Some(idx)
    }
}
