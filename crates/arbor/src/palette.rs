//! Palette validation and the color assigner.
//!
//! The root takes the first palette color. Each branch leaving the root
//! takes the next color in order, wrapping around but skipping the root's
//! color until the palette runs out. Everything deeper inherits its
//! parent's fill one fade step lighter. Text is white on dark fills and
//! black on light ones; borders always match the fill.

use log::{debug, info};
use thiserror::Error;

use arbor_core::{
    color::{Color, ColorError},
    style::{NodeStyle, StyleDefaults},
    tree::{NodeIndex, StructuralError, Tree},
};

/// Branch colors used when none are configured.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#000000", "#FF6F61", "#6B5B95", "#88B04B", "#F7CAC9", "#92A8D1", "#F7786B", "#DE7A22",
    "#2E8B57", "#FFD700", "#4682B4", "#D9534F", "#5BC0DE", "#FFB347", "#B39EB5", "#E94E77",
];

/// Luminance below which a fill gets white text.
pub const DEFAULT_LUMINANCE_THRESHOLD: f32 = 0.5;

/// A palette that cannot be used.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette needs at least 2 colors, found {count}")]
    Empty { count: usize },

    #[error("palette color #{index} ({value}) is invalid")]
    InvalidColor {
        index: usize,
        value: String,
        #[source]
        source: ColorError,
    },

    #[error("luminance threshold {0} is outside [0, 1]")]
    InvalidThreshold(f32),
}

/// An ordered, validated list of branch colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    luminance_threshold: f32,
}

impl Palette {
    /// Creates a palette from parsed colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Empty`] for fewer than two colors and
    /// [`PaletteError::InvalidThreshold`] for a threshold outside `[0, 1]`.
    pub fn new(colors: Vec<Color>, luminance_threshold: f32) -> Result<Self, PaletteError> {
        if colors.len() < 2 {
            return Err(PaletteError::Empty {
                count: colors.len(),
            });
        }
        if !(0.0..=1.0).contains(&luminance_threshold) {
            return Err(PaletteError::InvalidThreshold(luminance_threshold));
        }
        Ok(Self {
            colors,
            luminance_threshold,
        })
    }

    /// Parses hex color strings into a palette.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidColor`] naming the first entry that is
    /// not `#RRGGBB` or `#RRGGBBAA`, or any error of [`Palette::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor::palette::{Palette, PaletteError};
    ///
    /// let palette = Palette::parse(&["#000000", "#FF0000"], 0.5).unwrap();
    /// assert_eq!(palette.len(), 2);
    ///
    /// let err = Palette::parse(&["#000000"], 0.5).unwrap_err();
    /// assert!(matches!(err, PaletteError::Empty { count: 1 }));
    /// ```
    pub fn parse<S: AsRef<str>>(
        colors: &[S],
        luminance_threshold: f32,
    ) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .enumerate()
            .map(|(index, color)| {
                let color = color.as_ref();
                Color::new(color).map_err(|source| PaletteError::InvalidColor {
                    index,
                    value: color.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors, luminance_threshold)
    }

    /// Number of colors. Always at least two.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; kept for symmetry with [`Palette::len`].
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn luminance_threshold(&self) -> f32 {
        self.luminance_threshold
    }

    /// Fill of the root node.
    pub fn root_color(&self) -> Color {
        self.colors[0]
    }

    /// Fill of the `sibling`-th child of the root.
    pub fn branch_color(&self, sibling: usize) -> Color {
        self.colors[(sibling + 1) % self.colors.len()]
    }

    /// Text color readable on `fill`.
    pub fn font_color(&self, fill: Color) -> Color {
        if fill.luminance() < self.luminance_threshold {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::parse(DEFAULT_PALETTE, DEFAULT_LUMINANCE_THRESHOLD)
            .expect("default palette is valid")
    }
}

/// A canonical tree together with the resolved style of every node.
///
/// Styles are fixed once painted.
#[derive(Debug, Clone)]
pub struct StyledTree {
    tree: Tree,
    styles: Vec<NodeStyle>,
    defaults: StyleDefaults,
}

impl StyledTree {
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Style of the node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not belong to the tree.
    pub fn style(&self, idx: NodeIndex) -> &NodeStyle {
        &self.styles[idx.index()]
    }

    /// Diagram-wide defaults the styles were resolved from.
    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    /// Returns the tree, dropping the styles.
    pub fn into_tree(self) -> Tree {
        self.tree
    }
}

/// Assigns fill, border and font colors to every node of a canonical tree.
///
/// # Errors
///
/// Returns a [`StructuralError`] if the tree is not canonical. That only
/// happens when an upstream stage is broken.
///
/// # Examples
///
/// ```
/// use arbor::palette::{Palette, paint};
/// use arbor_core::style::StyleDefaults;
/// use arbor_parser::{ParseConfig, parse_outline};
///
/// let tree = parse_outline("# A\n- B\n- C\n", &ParseConfig::default());
/// let palette = Palette::parse(&["#000000", "#FF0000", "#00FF00"], 0.5).unwrap();
/// let styled = paint(&tree, &palette, &StyleDefaults::default()).unwrap();
///
/// let b = tree.children(tree.root())[0];
/// assert_eq!(styled.style(b).fill_color().to_string(), "#FF0000");
/// ```
pub fn paint(
    tree: &Tree,
    palette: &Palette,
    defaults: &StyleDefaults,
) -> Result<StyledTree, StructuralError> {
    tree.validate()?;
    info!(nodes_count = tree.len(), palette_size = palette.len(); "Painting tree");

    let root = tree.root();
    let mut fills = vec![palette.root_color(); tree.len()];
    for (sibling, &child) in tree.children(root).iter().enumerate() {
        fills[child.index()] = palette.branch_color(sibling);
    }

    // Pre-order reaches every parent before its children.
    for idx in tree.preorder() {
        let node = tree.node(idx);
        if node.level() < 2 {
            continue;
        }
        if let Some(parent) = node.parent() {
            fills[idx.index()] = fills[parent.index()].faded();
        }
    }

    let styles: Vec<NodeStyle> = fills
        .into_iter()
        .map(|fill| NodeStyle::new(defaults, fill, palette.font_color(fill)))
        .collect();

    debug!(styles_count = styles.len(); "Tree painted");
    Ok(StyledTree {
        tree: tree.clone(),
        styles,
        defaults: defaults.clone(),
    })
}
