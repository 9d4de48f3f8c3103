//! Graph emitter: flattens a styled tree into node and edge records.
//!
//! The result is purely declarative. Positions are left to whatever layout
//! engine consumes it.

use log::debug;
use serde::Serialize;

use arbor_core::{
    color::Color,
    style::{CornerStyle, Shape, StyleDefaults},
};

use crate::palette::StyledTree;

/// One node of the emitted diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: usize,
    pub label: String,
    pub fill: Color,
    pub font: Color,
    pub border: Color,
    pub shape: Shape,
    pub corner_style: CornerStyle,
}

/// One parent-to-child link. Its color is the child's fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub color: Color,
}

/// A flat diagram description: global defaults plus nodes and edges in
/// pre-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    defaults: StyleDefaults,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl Diagram {
    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }
}

/// Emits the diagram description of a styled tree.
///
/// Nodes come out in pre-order, each followed (in the edge list) by the
/// edge from its parent, so there is always exactly one edge fewer than
/// there are nodes.
pub fn emit(styled: &StyledTree) -> Diagram {
    let tree = styled.tree();
    let mut nodes = Vec::with_capacity(tree.len());
    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));

    for idx in tree.preorder() {
        let node = tree.node(idx);
        let style = styled.style(idx);

        nodes.push(NodeRecord {
            id: node.id(),
            label: node.content().to_string(),
            fill: style.fill_color(),
            font: style.font_color(),
            border: style.border_color(),
            shape: style.shape(),
            corner_style: style.corner_style(),
        });

        if let Some(parent) = node.parent() {
            edges.push(EdgeRecord {
                from: tree.node(parent).id(),
                to: node.id(),
                color: style.fill_color(),
            });
        }
    }

    debug!(nodes_count = nodes.len(), edges_count = edges.len(); "Diagram emitted");
    Diagram {
        defaults: styled.defaults().clone(),
        nodes,
        edges,
    }
}
