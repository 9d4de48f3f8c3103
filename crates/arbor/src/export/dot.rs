//! Graphviz DOT export.
//!
//! [`to_graph`] maps a [`Diagram`] onto the `dot_structures` model and
//! [`to_dot`] prints it. With the `graphviz` feature, [`GraphvizExporter`]
//! pipes the same graph through the external `dot` binary to produce SVG,
//! PDF or PNG.
//!
//! The graph sets `rankdir` from the diagram direction, node defaults from
//! the style defaults, and edge defaults that hide arrowheads and attach
//! edges on the sides facing each other. Nodes are named `node_<id>`.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::debug;

use arbor_core::color::Color;

use crate::{
    emit::Diagram,
    export::{Error, Exporter},
};

/// Default edge color, overridden per edge by the child's fill.
const EDGE_COLOR: Color = Color::BLACK;

/// DOT identifier of a node.
fn node_id(id: usize) -> NodeId {
    NodeId(Id::Plain(format!("node_{id}")), None)
}

/// Quoted DOT string with `"`, `\` and line breaks escaped.
fn quoted(text: &str) -> Id {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    Id::Escaped(escaped)
}

fn plain(key: &str, value: impl ToString) -> Attribute {
    Attribute(Id::Plain(key.to_string()), Id::Plain(value.to_string()))
}

fn escaped(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

fn color(key: &str, value: Color) -> Attribute {
    escaped(key, &value.to_string())
}

/// Builds the DOT graph of a diagram.
pub fn to_graph(diagram: &Diagram) -> Graph {
    let defaults = diagram.defaults();
    let (tail_port, head_port) = defaults.direction().edge_ports();

    let mut stmts = Vec::with_capacity(diagram.nodes().len() + diagram.edges().len() + 3);
    stmts.push(Stmt::GAttribute(GraphAttributes::Graph(vec![
        plain("rankdir", defaults.direction().to_dot_value()),
        plain("layout", "dot"),
    ])));
    stmts.push(Stmt::GAttribute(GraphAttributes::Node(vec![
        plain("shape", defaults.shape().to_dot_value()),
        escaped("style", defaults.corner_style().to_dot_value()),
        plain("color", "white"),
        escaped("fontname", defaults.font_name()),
        plain("fontsize", defaults.font_size()),
    ])));
    stmts.push(Stmt::GAttribute(GraphAttributes::Edge(vec![
        plain("dir", "none"),
        color("color", EDGE_COLOR),
        plain("penwidth", defaults.edge_width()),
        plain("tailport", tail_port),
        plain("headport", head_port),
    ])));

    for record in diagram.nodes() {
        let mut attributes = vec![
            escaped("label", &record.label),
            color("fillcolor", record.fill),
            color("fontcolor", record.font),
            color("color", record.border),
        ];
        if record.shape != defaults.shape() {
            attributes.push(plain("shape", record.shape.to_dot_value()));
        }
        if record.corner_style != defaults.corner_style() {
            attributes.push(escaped("style", record.corner_style.to_dot_value()));
        }
        stmts.push(Stmt::Node(Node {
            id: node_id(record.id),
            attributes,
        }));
    }

    for record in diagram.edges() {
        stmts.push(Stmt::Edge(Edge {
            ty: EdgeTy::Pair(Vertex::N(node_id(record.from)), Vertex::N(node_id(record.to))),
            attributes: vec![color("color", record.color)],
        }));
    }

    Graph::DiGraph {
        id: Id::Plain("mindmap".to_string()),
        strict: false,
        stmts,
    }
}

/// Prints the DOT text of a diagram.
pub fn to_dot(diagram: &Diagram) -> String {
    let dot = to_graph(diagram).print(&mut PrinterContext::default());
    debug!(bytes = dot.len(); "DOT generated");
    dot
}

/// Writes diagrams as DOT text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, Error> {
        let mut dot = to_dot(diagram);
        if !dot.ends_with('\n') {
            dot.push('\n');
        }
        Ok(dot.into_bytes())
    }
}

/// Image formats the `dot` binary is asked to produce.
#[cfg(feature = "graphviz")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Pdf,
    Png,
}

#[cfg(feature = "graphviz")]
impl ImageFormat {
    fn to_graphviz(self) -> graphviz_rust::cmd::Format {
        use graphviz_rust::cmd::Format;

        match self {
            Self::Svg => Format::Svg,
            Self::Pdf => Format::Pdf,
            Self::Png => Format::Png,
        }
    }
}

/// Renders diagrams to images by running Graphviz.
///
/// Needs the `dot` executable on `PATH`.
#[cfg(feature = "graphviz")]
#[derive(Debug, Clone, Copy)]
pub struct GraphvizExporter {
    format: ImageFormat,
}

#[cfg(feature = "graphviz")]
impl GraphvizExporter {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }
}

#[cfg(feature = "graphviz")]
impl Exporter for GraphvizExporter {
    fn export_diagram(&self, diagram: &Diagram) -> Result<Vec<u8>, Error> {
        use graphviz_rust::cmd::CommandArg;

        log::info!(format:? = self.format; "Running Graphviz");
        let bytes = graphviz_rust::exec_dot(
            to_dot(diagram),
            vec![CommandArg::Format(self.format.to_graphviz())],
        )?;
        if bytes.is_empty() {
            return Err(Error::Render("Graphviz produced no output".to_string()));
        }
        Ok(bytes)
    }
}
