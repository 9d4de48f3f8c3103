//! Arbor - turn outlines and structured documents into colored mindmaps.
//!
//! Parsing, coloring and Graphviz export for mindmaps. Sources are either
//! markdown-like outlines or nested JSON values; both become the same
//! canonical tree, get colored by branch, and come out as DOT text, a JSON
//! diagram description, or (with the `graphviz` feature) a rendered image.

pub mod config;
pub mod document;
pub mod emit;
pub mod export;
pub mod palette;

mod error;

pub use arbor_core::{color, style, tree};
pub use arbor_parser::{ParseConfig, Value};

pub use error::ArborError;

use log::{debug, info, trace};

use arbor_core::{style::StyleDefaults, tree::Tree};

use config::AppConfig;
use emit::Diagram;
use export::{Exporter, OutputFormat};
use palette::{Palette, StyledTree};

/// Builder for parsing and rendering mindmaps.
///
/// The palette is validated when the builder is created, so a bad
/// configuration fails before any input is looked at.
///
/// # Examples
///
/// ```rust
/// use arbor::{MindmapBuilder, config::AppConfig};
///
/// let builder = MindmapBuilder::new(AppConfig::default())
///     .expect("default palette is valid");
///
/// let tree = builder.parse_outline("# Paper\n- Method\n- Results\n");
/// let dot = builder.render_dot(&tree).expect("Failed to render");
/// assert!(dot.contains("node_2"));
/// ```
#[derive(Debug, Clone)]
pub struct MindmapBuilder {
    palette: Palette,
    style: StyleDefaults,
    parse_config: ParseConfig,
}

impl Default for MindmapBuilder {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            style: StyleDefaults::default(),
            parse_config: ParseConfig::default(),
        }
    }
}

impl MindmapBuilder {
    /// Create a new mindmap builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Palette`] if the configured palette has fewer
    /// than two colors, contains a malformed color, or has a luminance
    /// threshold outside `[0, 1]`.
    pub fn new(config: AppConfig) -> Result<Self, ArborError> {
        let palette = config.palette().resolve()?;
        debug!(
            palette_size = palette.len(),
            luminance_threshold = palette.luminance_threshold();
            "Palette resolved"
        );

        Ok(Self {
            palette,
            style: config.style().defaults(),
            parse_config: config.outline().parse_config(),
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn style(&self) -> &StyleDefaults {
        &self.style
    }

    /// Parse an outline into a canonical tree.
    ///
    /// Never fails: unrecognized lines become free text.
    pub fn parse_outline(&self, source: &str) -> Tree {
        info!(bytes = source.len(); "Parsing outline");
        let tree = arbor_parser::parse_outline(source, &self.parse_config);
        trace!(tree:?; "Parsed tree");
        tree
    }

    /// Convert a structured value into a canonical tree.
    pub fn parse_value(&self, value: &Value) -> Tree {
        info!("Converting structured value");
        let tree = arbor_parser::build_from_value(value, &self.parse_config);
        trace!(tree:?; "Converted tree");
        tree
    }

    /// Parse JSON, either a mindmap document or a bare value, into a
    /// canonical tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Document`] if `source` is not valid JSON.
    pub fn parse_json(&self, source: &str) -> Result<Tree, ArborError> {
        let value = document::read_json(source)
            .map_err(|err| ArborError::new_document_error(err, source))?;
        Ok(self.parse_value(&value))
    }

    /// Color every node of a tree.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Structure`] if `tree` is not canonical.
    pub fn paint(&self, tree: &Tree) -> Result<StyledTree, ArborError> {
        Ok(palette::paint(tree, &self.palette, &self.style)?)
    }

    /// Color a tree and flatten it into node and edge records.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Structure`] if `tree` is not canonical.
    pub fn diagram(&self, tree: &Tree) -> Result<Diagram, ArborError> {
        let styled = self.paint(tree)?;
        let diagram = emit::emit(&styled);
        info!(
            nodes_count = diagram.nodes().len(),
            edges_count = diagram.edges().len();
            "Diagram built"
        );
        Ok(diagram)
    }

    /// Render a tree as Graphviz DOT text.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Structure`] if `tree` is not canonical.
    pub fn render_dot(&self, tree: &Tree) -> Result<String, ArborError> {
        let diagram = self.diagram(tree)?;
        Ok(export::dot::to_dot(&diagram))
    }

    /// Render a tree as a JSON diagram description.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Structure`] if `tree` is not canonical, or
    /// [`ArborError::Export`] if serialization fails.
    pub fn render_json(&self, tree: &Tree) -> Result<String, ArborError> {
        let diagram = self.diagram(tree)?;
        serde_json::to_string_pretty(&diagram).map_err(|err| ArborError::Export(Box::new(err)))
    }

    /// Render a tree to an image through the Graphviz `dot` binary.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Export`] if Graphviz cannot be run or fails.
    #[cfg(feature = "graphviz")]
    pub fn render(
        &self,
        tree: &Tree,
        format: export::dot::ImageFormat,
    ) -> Result<Vec<u8>, ArborError> {
        let diagram = self.diagram(tree)?;
        Ok(export::dot::GraphvizExporter::new(format).export_diagram(&diagram)?)
    }

    /// Produce the bytes of an output file in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ArborError::Export`] for rendered formats when built
    /// without the `graphviz` feature, or when rendering fails.
    pub fn export(&self, tree: &Tree, format: OutputFormat) -> Result<Vec<u8>, ArborError> {
        let diagram = self.diagram(tree)?;
        info!(format:% = format; "Exporting diagram");

        let exporter = exporter_for(format)?;
        Ok(exporter.export_diagram(&diagram)?)
    }
}

/// Picks the export backend for `format`.
fn exporter_for(format: OutputFormat) -> Result<Box<dyn Exporter>, export::Error> {
    match format {
        OutputFormat::Dot => Ok(Box::new(export::dot::DotExporter)),
        OutputFormat::Json => Ok(Box::new(export::json::JsonExporter)),
        #[cfg(feature = "graphviz")]
        OutputFormat::Svg => Ok(Box::new(export::dot::GraphvizExporter::new(
            export::dot::ImageFormat::Svg,
        ))),
        #[cfg(feature = "graphviz")]
        OutputFormat::Pdf => Ok(Box::new(export::dot::GraphvizExporter::new(
            export::dot::ImageFormat::Pdf,
        ))),
        #[cfg(feature = "graphviz")]
        OutputFormat::Png => Ok(Box::new(export::dot::GraphvizExporter::new(
            export::dot::ImageFormat::Png,
        ))),
        #[cfg(not(feature = "graphviz"))]
        OutputFormat::Svg | OutputFormat::Pdf | OutputFormat::Png => Err(export::Error::Render(
            format!("`{format}` output needs the `graphviz` feature"),
        )),
    }
}
