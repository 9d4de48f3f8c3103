//! Configuration types for arbor mindmap rendering.
//!
//! This module provides the configuration structures that control how
//! mindmaps are parsed, colored and styled. All types implement
//! [`serde::Deserialize`] and every field is optional, so a configuration
//! file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`PaletteConfig`] - Branch colors and the font luminance threshold.
//! - [`StyleConfig`] - Shape, corners, font, direction and edge width.
//! - [`OutlineConfig`] - Options for the outline parser.
//!
//! # Example
//!
//! ```
//! # use arbor::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.palette().resolve().is_ok());
//! assert_eq!(config.outline().root_label(), "Mindmap");
//! ```

use serde::Deserialize;

use arbor_core::style::{CornerStyle, Direction, Shape, StyleDefaults};
use arbor_parser::{DEFAULT_ROOT_LABEL, ParseConfig};

use crate::palette::{DEFAULT_LUMINANCE_THRESHOLD, DEFAULT_PALETTE, Palette, PaletteError};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Palette section.
    #[serde(default)]
    palette: PaletteConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,

    /// Outline parser section.
    #[serde(default)]
    outline: OutlineConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(palette: PaletteConfig, style: StyleConfig, outline: OutlineConfig) -> Self {
        Self {
            palette,
            style,
            outline,
        }
    }

    /// Returns the palette configuration.
    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the outline parser configuration.
    pub fn outline(&self) -> &OutlineConfig {
        &self.outline
    }
}

/// Branch colors as written in a configuration file.
///
/// Colors stay strings until [`PaletteConfig::resolve`] so that a bad entry
/// is reported with its original spelling.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteConfig {
    /// Ordered hex colors; the first one is the root's.
    #[serde(default = "default_colors")]
    colors: Vec<String>,

    /// Fills darker than this get white text.
    #[serde(default = "default_luminance_threshold")]
    luminance_threshold: f32,
}

fn default_colors() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect()
}

fn default_luminance_threshold() -> f32 {
    DEFAULT_LUMINANCE_THRESHOLD
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            luminance_threshold: default_luminance_threshold(),
        }
    }
}

impl PaletteConfig {
    /// Creates a palette section from raw color strings.
    pub fn new(colors: Vec<String>, luminance_threshold: f32) -> Self {
        Self {
            colors,
            luminance_threshold,
        }
    }

    /// Returns the configured color strings.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn luminance_threshold(&self) -> f32 {
        self.luminance_threshold
    }

    /// Parses and validates the configured palette.
    ///
    /// # Errors
    ///
    /// Returns a [`PaletteError`] if there are fewer than two colors, a
    /// color is not valid hex, or the threshold lies outside `[0, 1]`.
    pub fn resolve(&self) -> Result<Palette, PaletteError> {
        Palette::parse(&self.colors, self.luminance_threshold)
    }
}

/// Visual style options passed through to every node and edge.
///
/// Unset fields fall back to [`StyleDefaults::default`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    shape: Option<Shape>,

    #[serde(default)]
    corner_style: Option<CornerStyle>,

    #[serde(default)]
    font_name: Option<String>,

    #[serde(default)]
    font_size: Option<u32>,

    #[serde(default)]
    direction: Option<Direction>,

    #[serde(default)]
    edge_width: Option<f32>,
}

impl StyleConfig {
    /// Overrides the layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Overrides the node shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Overrides the corner style.
    pub fn with_corner_style(mut self, corner_style: CornerStyle) -> Self {
        self.corner_style = Some(corner_style);
        self
    }

    /// Resolves the section into concrete [`StyleDefaults`].
    pub fn defaults(&self) -> StyleDefaults {
        let fallback = StyleDefaults::default();
        StyleDefaults::new(
            self.shape.unwrap_or(fallback.shape()),
            self.corner_style.unwrap_or(fallback.corner_style()),
            self.font_name.as_deref().unwrap_or(fallback.font_name()),
            self.font_size.unwrap_or(fallback.font_size()),
            self.direction.unwrap_or(fallback.direction()),
            self.edge_width.unwrap_or(fallback.edge_width()),
        )
    }
}

/// Outline parser options.
#[derive(Debug, Clone, Deserialize)]
pub struct OutlineConfig {
    /// Label of the synthetic root shown when a source has several
    /// top-level nodes.
    #[serde(default = "default_root_label")]
    root_label: String,
}

fn default_root_label() -> String {
    DEFAULT_ROOT_LABEL.to_string()
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
        }
    }
}

impl OutlineConfig {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Returns the matching parser configuration.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.root_label.as_str())
    }
}
